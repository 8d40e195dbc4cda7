//! Transport boundary
//!
//! [`Transport`] is the narrow surface the rest of the crate depends on.
//! [`HttpTransport`](super::HttpTransport) implements it over reqwest;
//! tests substitute in-memory fakes.

use crate::codec;
use crate::error::Result;
use crate::types::{JsonValue, Method, StringMap};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// A fully resolved request handed to a transport
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers
    pub headers: StringMap,
    /// Query parameters appended to the URL
    pub query: HashMap<String, String>,
    /// JSON body
    pub body: Option<JsonValue>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl HttpRequest {
    /// Create a request for a method and URL
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Raw response as returned by a transport
///
/// This is the shared decode-capable value every binding extracts from.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response from a status and body
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a 200 response carrying a JSON document
    pub fn json(value: &JsonValue) -> Self {
        Self::new(200, value.to_string())
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the whole body
    pub fn extract_into<T: DeserializeOwned>(&self) -> Result<T> {
        codec::extract_into(&self.body)
    }

    /// Decode the object under `key`
    pub fn extract_into_struct<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        codec::extract_into_struct(&self.body, key)
    }

    /// Decode the array under `key`
    pub fn extract_into_slice<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        codec::extract_into_slice(&self.body, key)
    }
}

/// Something that can execute an [`HttpRequest`]
///
/// Implementations return the final response whatever its status; status
/// policy belongs to [`ServiceClient`](super::ServiceClient).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request
    async fn send(&self, request: HttpRequest) -> Result<RawResponse>;
}
