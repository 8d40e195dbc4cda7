//! Cluster actions

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use serde::{Deserialize, Serialize};

/// How running jobs are treated on stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StopMode {
    /// Kill running jobs
    Immediately,
    /// Wait for running jobs up to `delay_time`
    Gracefully,
}

/// Options for [`stop`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOpts {
    /// Stop mode, server default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_mode: Option<StopMode>,
    /// Graceful stop timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_time: Option<u32>,
}

impl RequestBody for StopOpts {}

/// Jobs started by a cluster action
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobId {
    /// Job IDs
    #[serde(rename = "jobId", default)]
    pub job_id: Vec<String>,
}

/// Stop a CDM cluster
pub async fn stop(client: &ServiceClient, cluster_id: &str, opts: &StopOpts) -> Result<JobId> {
    require("cluster_id", cluster_id)?;
    let body = build_request_body(opts, "stop")?;
    let raw = client
        .post(
            &client.service_url(&["clusters", cluster_id, "action"]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into()
}
