//! Auth configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Keystone-style token sent as `X-Auth-Token`
    Token {
        /// The token value
        token: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header name or query parameter name
        name: String,
        /// Prefix to add before the value (e.g., "Bearer ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Short name of the auth type
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Token { .. } => "token",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::CustomHeaders { .. } => "custom_headers",
        }
    }

    /// Copy of this config with every secret replaced by `***`
    pub fn masked(&self) -> Self {
        const MASK: &str = "***";
        match self {
            AuthConfig::None => AuthConfig::None,
            AuthConfig::Token { .. } => AuthConfig::Token {
                token: MASK.to_string(),
            },
            AuthConfig::Bearer { .. } => AuthConfig::Bearer {
                token: MASK.to_string(),
            },
            AuthConfig::Basic { username, .. } => AuthConfig::Basic {
                username: username.clone(),
                password: MASK.to_string(),
            },
            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                ..
            } => AuthConfig::ApiKey {
                location: *location,
                name: name.clone(),
                prefix: prefix.clone(),
                value: MASK.to_string(),
            },
            AuthConfig::CustomHeaders { headers } => AuthConfig::CustomHeaders {
                headers: headers
                    .keys()
                    .map(|k| (k.clone(), MASK.to_string()))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
    }

    #[test]
    fn test_auth_config_yaml() {
        let config: AuthConfig = serde_yaml::from_str("type: token\ntoken: abc").unwrap();
        assert_eq!(
            config,
            AuthConfig::Token {
                token: "abc".to_string()
            }
        );

        let config: AuthConfig =
            serde_yaml::from_str("type: api_key\nname: X-Key\nvalue: v").unwrap();
        assert!(matches!(
            config,
            AuthConfig::ApiKey {
                location: Location::Header,
                ..
            }
        ));
    }

    #[test]
    fn test_masked_hides_secrets() {
        let config = AuthConfig::Basic {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        assert_eq!(
            config.masked(),
            AuthConfig::Basic {
                username: "admin".to_string(),
                password: "***".to_string(),
            }
        );
        assert_eq!(config.kind(), "basic");
    }
}
