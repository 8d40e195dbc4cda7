//! Volume snapshots
//!
//! Timestamps come back as `2016-02-16T16:54:14.981520`, without a zone
//! designator, and decode into [`NaiveDateTime`].

pub mod metadata;

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient, UrlBuilder};
use crate::pagination::{is_empty_at, next_from_links, Page, Pager, ResourcePage};
use crate::types::{rfc3339_milli_no_z, JsonObject, StringMap};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const RESOURCE: &str = "snapshots";

/// A volume snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot ID
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Source volume
    #[serde(default)]
    pub volume_id: String,
    /// `creating`, `available`, `error`, ...
    #[serde(default)]
    pub status: String,
    /// Size in GiB
    #[serde(default)]
    pub size: u32,
    /// User metadata
    #[serde(default)]
    pub metadata: StringMap,
    /// Creation time
    #[serde(default, with = "rfc3339_milli_no_z")]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time
    #[serde(default, with = "rfc3339_milli_no_z")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Options for [`create`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// Volume to snapshot
    pub volume_id: String,
    /// Snapshot an in-use volume
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// User metadata
    #[serde(skip_serializing_if = "StringMap::is_empty")]
    pub metadata: StringMap,
}

impl RequestBody for CreateOpts {
    fn validate(&self) -> Result<()> {
        require("volume_id", &self.volume_id)
    }
}

/// Options for [`update`]; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RequestBody for UpdateOpts {}

/// Options for [`update_metadata`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMetadataOpts {
    /// Metadata replacing the current set
    pub metadata: StringMap,
}

impl RequestBody for UpdateMetadataOpts {}

/// Filters for [`list`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    /// Exact name match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Only snapshots of this volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_id: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Start after this snapshot ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// One page of `snapshots/detail`
#[derive(Debug, Clone)]
pub struct SnapshotPage(Page);

impl SnapshotPage {
    /// Snapshots on this page
    pub fn snapshots(&self) -> Result<Vec<Snapshot>> {
        self.0.extract_into_slice("snapshots")
    }
}

impl ResourcePage for SnapshotPage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "snapshots")
    }

    fn next_page_url(&self) -> Option<String> {
        next_from_links(&self.0, "snapshots_links")
    }
}

/// Create a snapshot of a volume
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Snapshot> {
    let body = build_request_body(opts, "snapshot")?;
    let raw = client
        .post(
            &client.service_url(&[RESOURCE]),
            body,
            RequestConfig::new().ok_codes(&[202]),
        )
        .await?;
    raw.extract_into_struct("snapshot")
}

/// Fetch one snapshot
pub async fn get(client: &ServiceClient, id: &str) -> Result<Snapshot> {
    require("id", id)?;
    let raw = client
        .get(&client.service_url(&[RESOURCE, id]), RequestConfig::new())
        .await?;
    raw.extract_into_struct("snapshot")
}

/// Rename or redescribe a snapshot
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<Snapshot> {
    require("id", id)?;
    let body = build_request_body(opts, "snapshot")?;
    let raw = client
        .put(
            &client.service_url(&[RESOURCE, id]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into_struct("snapshot")
}

/// Delete a snapshot
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    require("id", id)?;
    client
        .delete(
            &client.service_url(&[RESOURCE, id]),
            RequestConfig::new().ok_codes(&[202]),
        )
        .await?;
    Ok(())
}

/// Replace the metadata of a snapshot, returning the stored set
pub async fn update_metadata(
    client: &ServiceClient,
    id: &str,
    opts: &UpdateMetadataOpts,
) -> Result<JsonObject> {
    require("id", id)?;
    let body = build_request_body(opts, "")?;
    let raw = client
        .put(
            &client.service_url(&[RESOURCE, id, "metadata"]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into_struct("metadata")
}

/// URL of the first `snapshots/detail` page for a filter set
pub fn list_url(client: &ServiceClient, opts: &ListOpts) -> Result<String> {
    let path = UrlBuilder::new()
        .with_endpoints([RESOURCE, "detail"])
        .with_query_params(opts)?
        .build();
    Ok(client.service_url(&[&path]))
}

/// Pager over matching snapshots
pub fn pager<'a>(client: &'a ServiceClient, opts: &ListOpts) -> Result<Pager<'a, SnapshotPage>> {
    Ok(Pager::new(client, list_url(client, opts)?))
}

/// Every matching snapshot, following `snapshots_links`
pub async fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Vec<Snapshot>> {
    let mut pager = pager(client, opts)?;
    pager.collect_items(SnapshotPage::snapshots).await
}
