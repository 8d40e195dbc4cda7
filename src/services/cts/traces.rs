//! Audit traces of a tracker
//!
//! Pages are chained through `meta_data.marker`, sent back as the `next`
//! query parameter.

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient, UrlBuilder};
use crate::pagination::{is_empty_at, next_from_marker, Page, Pager, ResourcePage};
use serde::{Deserialize, Serialize};

/// Query options for [`list`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListTracesOpts {
    /// `system` or `data`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_type: Option<String>,
    /// `normal`, `warning` or `incident`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_status: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Start of the window, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// End of the window, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    /// Marker from a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Cloud service type, e.g. `ECS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Operator name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Resource ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Resource name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    /// Resource type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Trace ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Trace name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_name: Option<String>,
}

/// Domain of the operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUser {
    /// Domain ID
    #[serde(default)]
    pub id: String,
    /// Domain name
    #[serde(default)]
    pub name: String,
}

/// Operator of a traced action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID
    #[serde(default)]
    pub id: String,
    /// User name
    #[serde(default)]
    pub name: String,
    /// User domain
    #[serde(default)]
    pub domain: BaseUser,
}

/// One recorded operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trace {
    /// Trace ID
    pub trace_id: String,
    /// Operation name
    pub trace_name: String,
    /// `normal`, `warning` or `incident`
    pub trace_status: String,
    /// `ConsoleAction`, `ApiCall`, `SystemAction`
    pub trace_type: String,
    /// Request body as recorded
    pub request: String,
    /// Response body as recorded
    pub response: String,
    /// Returned status code
    pub code: String,
    /// API version of the call
    pub api_version: String,
    /// Free-form remarks
    pub message: String,
    /// When the trace was recorded, epoch milliseconds
    pub record_time: i64,
    /// When the operation happened, epoch milliseconds
    pub time: i64,
    /// Operator
    pub user: UserInfo,
    /// Cloud service type
    pub service_type: String,
    /// Resource type
    pub resource_type: String,
    /// Caller IP
    pub source_ip: String,
    /// Resource ID
    pub resource_id: String,
    /// Resource name
    pub resource_name: String,
    /// Request ID
    pub request_id: String,
    /// Extra location details
    pub location_info: String,
    /// Endpoint of the resource detail page
    pub endpoint: String,
    /// Resource URL
    pub resource_url: String,
}

/// Paging details of a trace listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaData {
    /// Traces on this page
    pub count: u32,
    /// Marker of the next page, empty on the last one
    pub marker: String,
}

/// One page of traces as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTracesResponse {
    /// Traces
    #[serde(default)]
    pub traces: Vec<Trace>,
    /// Paging details
    #[serde(default)]
    pub meta_data: MetaData,
}

/// Pager page over traces
#[derive(Debug, Clone)]
pub struct TracePage(Page);

impl TracePage {
    /// Traces on this page
    pub fn traces(&self) -> Result<Vec<Trace>> {
        self.0.extract_into_slice("traces")
    }
}

impl ResourcePage for TracePage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "traces")
    }

    fn next_page_url(&self) -> Option<String> {
        // Missing or empty `traces` ends the walk
        if self.is_empty().unwrap_or(true) {
            return None;
        }
        next_from_marker(&self.0, &["meta_data", "marker"], "next")
    }
}

fn list_url(client: &ServiceClient, tracker_name: &str, opts: &ListTracesOpts) -> Result<String> {
    require("tracker_name", tracker_name)?;
    let path = UrlBuilder::new()
        .with_endpoints([tracker_name, "trace"])
        .with_query_params(opts)?
        .build();
    Ok(client.service_url(&[&path]))
}

/// Fetch a single page of traces
pub async fn list(
    client: &ServiceClient,
    tracker_name: &str,
    opts: &ListTracesOpts,
) -> Result<ListTracesResponse> {
    let url = list_url(client, tracker_name, opts)?;
    let raw = client.get(&url, RequestConfig::new()).await?;
    raw.extract_into()
}

/// Pager over every trace matching `opts`
pub fn pager<'a>(
    client: &'a ServiceClient,
    tracker_name: &str,
    opts: &ListTracesOpts,
) -> Result<Pager<'a, TracePage>> {
    Ok(Pager::new(client, list_url(client, tracker_name, opts)?))
}

/// Every trace matching `opts`, following markers
pub async fn list_all(
    client: &ServiceClient,
    tracker_name: &str,
    opts: &ListTracesOpts,
) -> Result<Vec<Trace>> {
    let mut pager = pager(client, tracker_name, opts)?;
    pager.collect_items(TracePage::traces).await
}
