// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # otcloud
//!
//! Typed Rust bindings for OpenStack-style cloud REST APIs.
//!
//! ## Features
//!
//! - **Body codec**: option structs to JSON request bodies, with required
//!   field checks and optional wrapper keys; strict typed extraction of
//!   responses
//! - **Pager**: sequential, visitor-driven iteration over linked or
//!   marker-based list endpoints
//! - **HTTP transport**: retries with backoff, rate limiting, token auth
//! - **Resource bindings**: compute, EVS, networking, ELB, CTS, RDS, SDRS,
//!   CCE, DataArts, API Gateway and Cloud Databases operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use otcloud::services::networking::natgateways;
//! use otcloud::{CloudConfig, Result, ServiceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = CloudConfig::from_file("cloud.yaml")?.or(CloudConfig::from_env());
//!     let client = ServiceClient::from_config(&config)?;
//!
//!     let gateways = natgateways::list(&client, &natgateways::ListOpts::default()).await?;
//!     for gw in gateways {
//!         println!("{} {}", gw.id, gw.status);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Resource bindings (services)                │
//! │  create / get / update / delete / list / actions                │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬─────────────────────┐
//! │    Codec     │        Pagination         │       HTTP          │
//! ├──────────────┼───────────────────────────┼─────────────────────┤
//! │ RequestBody  │ Pager state machine       │ ServiceClient       │
//! │ require      │ ResourcePage              │ Transport trait     │
//! │ extract_*    │ links / path / marker     │ Retry, Rate Limit   │
//! └──────────────┴───────────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP transport, service client and URL building
pub mod http;

/// Request body building and response extraction
pub mod codec;

/// Page-by-page iteration over list endpoints
pub mod pagination;

/// Endpoint and credential configuration
pub mod config;

/// Resource bindings
pub mod services;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::CloudConfig;
pub use error::{Error, Result};
pub use http::{HttpTransport, RawResponse, RequestConfig, ServiceClient, Transport};
pub use pagination::{Page, Pager, PagerState, ResourcePage};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
