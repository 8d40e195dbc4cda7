//! Custom TLS security policies

use super::loadbalancers::ResourceRef;
use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// A TLS security policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPolicy {
    /// Policy ID
    pub id: String,
    /// Owning project
    #[serde(default)]
    pub project_id: String,
    /// Name
    #[serde(default)]
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Listeners using this policy
    #[serde(default)]
    pub listeners: Vec<ResourceRef>,
    /// Enabled TLS versions
    #[serde(default)]
    pub protocols: Vec<String>,
    /// Enabled cipher suites
    #[serde(default)]
    pub ciphers: Vec<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: String,
    /// Last update time
    #[serde(default)]
    pub updated_at: String,
}

/// Options for [`update`]; empty fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    /// New name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// New description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// TLS versions, e.g. `TLSv1.2`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,
    /// Cipher suites
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ciphers: Vec<String>,
}

impl RequestBody for UpdateOpts {}

/// Update a security policy
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<SecurityPolicy> {
    require("id", id)?;
    let body = build_request_body(opts, "security_policy")?;
    let raw = client
        .put(
            &client.service_url(&["security-policies", id]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into_struct("security_policy")
}
