//! HTTP module
//!
//! Provides the transport boundary, the reqwest transport with retry and
//! rate limiting, and the per-service client every binding talks to.
//!
//! # Features
//!
//! - **Transport trait**: narrow `send` surface, easy to fake in tests
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Service Client**: endpoint-relative URLs and accepted status codes

mod client;
mod rate_limit;
mod service;
mod transport;
mod url_builder;

pub use client::{HttpClientConfig, HttpClientConfigBuilder, HttpTransport};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use service::{RequestConfig, ServiceClient};
pub use transport::{HttpRequest, RawResponse, Transport};
pub use url_builder::UrlBuilder;
