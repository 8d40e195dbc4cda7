//! Cloud configuration
//!
//! A [`CloudConfig`] describes one service endpoint together with its
//! credentials and HTTP behaviour. It can be loaded from YAML or from
//! `OS_*` environment variables.
//!
//! ```yaml
//! endpoint: "https://evs.eu-de.example.com/v3/{project_id}"
//! project_id: "0123456789abcdef"
//! region: eu-de
//! auth:
//!   type: token
//!   token: "gAAAAAB..."
//! http:
//!   timeout_seconds: 30
//!   max_retries: 3
//!   retry_backoff:
//!     type: exponential
//!     initial_delay_ms: 100
//!     max_delay_ms: 60000
//!   rate_limit:
//!     requests_per_second: 10
//!     burst_size: 10
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Placeholder substituted with the project id in endpoints
pub const PROJECT_ID_PLACEHOLDER: &str = "{project_id}";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Configuration for one cloud service endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Service endpoint, may contain `{project_id}`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Project (tenant) id
    #[serde(default)]
    pub project_id: Option<String>,

    /// Region name
    #[serde(default)]
    pub region: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl CloudConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents).with_context(|| format!("loading {}", path.display()))
    }

    /// Build a config from `OS_ENDPOINT`, `OS_PROJECT_ID`, `OS_REGION_NAME`
    /// and `OS_TOKEN`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth = match lookup("OS_TOKEN").none_if_empty() {
            Some(token) => AuthConfig::Token { token },
            None => AuthConfig::None,
        };

        Self {
            endpoint: lookup("OS_ENDPOINT").none_if_empty(),
            project_id: lookup("OS_PROJECT_ID").none_if_empty(),
            region: lookup("OS_REGION_NAME").none_if_empty(),
            auth,
            http: HttpConfig::default(),
        }
    }

    /// Fill unset fields from another config (self wins)
    #[must_use]
    pub fn or(mut self, fallback: CloudConfig) -> Self {
        self.endpoint = self.endpoint.or(fallback.endpoint);
        self.project_id = self.project_id.or(fallback.project_id);
        self.region = self.region.or(fallback.region);
        if self.auth == AuthConfig::None {
            self.auth = fallback.auth;
        }
        self
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Use token authentication
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthConfig::Token {
            token: token.into(),
        };
        self
    }

    /// Resolved service endpoint with `{project_id}` substituted
    pub fn service_endpoint(&self) -> Result<String> {
        let endpoint = self
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::missing_field("endpoint"))?;

        let resolved = if endpoint.contains(PROJECT_ID_PLACEHOLDER) {
            let project_id = self
                .project_id
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| Error::missing_field("project_id"))?;
            endpoint.replace(PROJECT_ID_PLACEHOLDER, project_id)
        } else {
            endpoint.to_string()
        };

        let url = url::Url::parse(&resolved)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(resolved)
    }

    /// HTTP transport settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_delay_ms),
                Duration::from_millis(self.http.retry_backoff.max_delay_ms),
            );

        builder = match &self.http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// Copy safe to print
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            auth: self.auth.masked(),
            ..self.clone()
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting configuration; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::default(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

fn default_initial_delay() -> u64 {
    100
}

fn default_max_delay() -> u64 {
    60_000
}
