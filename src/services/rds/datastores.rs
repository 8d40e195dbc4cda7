//! Datastore versions

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// An engine version available for new instances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataStore {
    /// Version ID
    pub id: String,
    /// Version name, e.g. `5.7`
    pub name: String,
    /// Engine ID
    pub datastore: String,
    /// Image ID
    pub image: String,
    /// Package name
    pub packages: String,
    /// 1 when the version can be used
    pub active: i32,
}

impl DataStore {
    /// Whether new instances may use this version
    pub fn is_active(&self) -> bool {
        self.active == 1
    }
}

/// List the versions of an engine (`MySQL`, `PostgreSQL`, `SQLServer`)
pub async fn list(client: &ServiceClient, datastore_name: &str) -> Result<Vec<DataStore>> {
    require("datastore_name", datastore_name)?;
    let url = client.service_url(&["datastores", datastore_name, "versions"]);
    let raw = client.get(&url, RequestConfig::new()).await?;
    raw.extract_into_slice("datastores")
}
