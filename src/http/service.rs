//! Service client
//!
//! A [`ServiceClient`] binds a transport to one service endpoint
//! (`https://evs.example.com/v3/{project_id}`) and is passed explicitly to
//! every resource operation.

use super::client::HttpTransport;
use super::transport::{HttpRequest, RawResponse, Transport};
use crate::config::CloudConfig;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
    /// Accepted status codes; empty means any 2xx
    pub ok_codes: Vec<u16>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override max retries for this request
    pub max_retries: Option<u32>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Restrict the accepted status codes
    #[must_use]
    pub fn ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = codes.to_vec();
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    fn accepts(&self, status: u16) -> bool {
        if self.ok_codes.is_empty() {
            (200..300).contains(&status)
        } else {
            self.ok_codes.contains(&status)
        }
    }
}

/// Client for one service endpoint
#[derive(Clone)]
pub struct ServiceClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
    resource_base: Option<String>,
}

impl ServiceClient {
    /// Create a service client over a transport
    pub fn new(transport: Arc<dyn Transport>, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            resource_base: None,
        }
    }

    /// Build a reqwest-backed client from a cloud configuration
    pub fn from_config(config: &CloudConfig) -> Result<Self> {
        let endpoint = config.service_endpoint()?;
        let transport = HttpTransport::with_auth(config.http_client_config(), config.auth.clone())?;
        Ok(Self::new(Arc::new(transport), endpoint))
    }

    /// Use a different base for resource URLs than the endpoint itself
    #[must_use]
    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.resource_base = Some(base.into());
        self
    }

    /// Service endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Base URL that resource paths are appended to
    pub fn resource_base(&self) -> &str {
        self.resource_base.as_deref().unwrap_or(&self.endpoint)
    }

    /// Build a resource URL, e.g. `service_url(&["snapshots", id])`
    pub fn service_url(&self, parts: &[&str]) -> String {
        let base = self.resource_base().trim_end_matches('/');
        let path = parts
            .iter()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// Turn a path into an absolute URL; absolute URLs pass through
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        self.service_url(&[url])
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::GET, url, config).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: JsonValue, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::POST, url, config.json(body)).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, url: &str, body: JsonValue, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::PUT, url, config.json(body)).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, url: &str, body: JsonValue, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::PATCH, url, config.json(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, config: RequestConfig) -> Result<RawResponse> {
        self.request(Method::DELETE, url, config).await
    }

    /// Make a generic request and enforce the accepted status codes
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<RawResponse> {
        let full_url = self.resolve(url);

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url: full_url.clone(),
                headers: config.headers.clone(),
                query: config.query.clone(),
                body: config.body.clone(),
                timeout: config.timeout,
                max_retries: config.max_retries,
            })
            .await?;

        if !config.accepts(response.status) {
            debug!("{method} {full_url} rejected with {}", response.status);
            return Err(Error::http_status(response.status, response.text()));
        }

        Ok(response)
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.endpoint)
            .field("resource_base", &self.resource_base)
            .finish_non_exhaustive()
    }
}
