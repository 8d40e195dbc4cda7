//! Custom authorizers
//!
//! The request body is sent bare, without a wrapper key. The gateway ID
//! only selects the URL and is never serialized.

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// Identity source checked before the authorizer is invoked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Parameter name
    pub name: String,
    /// `HEADER` or `QUERY`
    pub location: String,
    /// Regular expression the value must match
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validation: String,
}

/// Options shared by authorizer create and [`update`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// Dedicated gateway ID
    #[serde(skip)]
    pub gateway_id: String,
    /// Authorizer name
    pub name: String,
    /// `FRONTEND` or `BACKEND`
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `FUNC`
    pub authorizer_type: String,
    /// Function URN
    pub authorizer_uri: String,
    /// Identity sources
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<Identity>,
    /// Result cache lifetime in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Opaque data passed to the function
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_data: String,
    /// Whether the request body is forwarded to the function
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need_body: Option<bool>,
}

impl RequestBody for CreateOpts {
    fn validate(&self) -> Result<()> {
        require("gateway_id", &self.gateway_id)?;
        require("name", &self.name)?;
        require("type", &self.kind)?;
        require("authorizer_type", &self.authorizer_type)?;
        require("authorizer_uri", &self.authorizer_uri)
    }
}

/// A custom authorizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizerResp {
    /// Authorizer ID
    pub id: String,
    /// Name
    pub name: String,
    /// `FRONTEND` or `BACKEND`
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `FUNC`
    pub authorizer_type: String,
    /// Function URN
    pub authorizer_uri: String,
    /// Identity sources
    pub identities: Vec<Identity>,
    /// Result cache lifetime in minutes
    pub ttl: u32,
    /// Opaque data passed to the function
    pub user_data: String,
    /// Whether the request body is forwarded
    pub need_body: bool,
    /// Creation time
    pub create_time: String,
}

/// Replace the settings of an authorizer
pub async fn update(
    client: &ServiceClient,
    authorizer_id: &str,
    opts: &CreateOpts,
) -> Result<AuthorizerResp> {
    require("authorizer_id", authorizer_id)?;
    let body = build_request_body(opts, "")?;
    let url = client.service_url(&[
        "apigw",
        "instances",
        opts.gateway_id.as_str(),
        "authorizers",
        authorizer_id,
    ]);
    let raw = client
        .put(&url, body, RequestConfig::new().ok_codes(&[200]))
        .await?;
    raw.extract_into()
}
