//! Single-key snapshot metadata

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::types::StringMap;

/// Read one metadata key of a snapshot
///
/// The result holds the single requested entry, e.g. `{"purpose": "backup"}`.
pub async fn get_one(client: &ServiceClient, snapshot_id: &str, key: &str) -> Result<StringMap> {
    require("snapshot_id", snapshot_id)?;
    require("key", key)?;

    let url = client.service_url(&["snapshots", snapshot_id, "metadata", key]);
    let raw = client.get(&url, RequestConfig::new()).await?;
    raw.extract_into_struct("meta")
}
