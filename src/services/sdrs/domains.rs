//! Active-active domains

use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// An active-active domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    /// Domain ID
    pub id: String,
    /// Domain name
    pub name: String,
    /// Description
    pub description: String,
}

/// Domains available to the project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResponse {
    /// Domains
    pub domains: Vec<Domain>,
}

/// Query the active-active domains
pub async fn get(client: &ServiceClient) -> Result<GetResponse> {
    let raw = client
        .get(&client.service_url(&["active-domains"]), RequestConfig::new())
        .await?;
    raw.extract_into()
}
