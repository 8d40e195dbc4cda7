//! Cluster operations

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, ServiceClient};
use serde::Serialize;
use tracing::info;

/// Whether to attach or detach the master EIP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterIpAction {
    /// Attach an EIP
    #[default]
    Bind,
    /// Detach the current EIP
    Unbind,
}

/// EIP to bind
#[derive(Debug, Clone, Default, Serialize)]
pub struct EipSpec {
    /// EIP ID
    pub id: String,
}

/// Options for [`update_master_ip`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateIpOpts {
    /// Bind or unbind
    pub action: MasterIpAction,
    /// EIP, required when binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<EipSpec>,
}

impl RequestBody for UpdateIpOpts {
    fn validate(&self) -> Result<()> {
        match (&self.action, &self.spec) {
            (MasterIpAction::Bind, None) => Err(Error::validation("spec.id")),
            (MasterIpAction::Bind, Some(spec)) => require("spec.id", &spec.id),
            (MasterIpAction::Unbind, _) => Ok(()),
        }
    }
}

/// Bind or unbind the public IP of a cluster's API server
pub async fn update_master_ip(
    client: &ServiceClient,
    cluster_id: &str,
    opts: &UpdateIpOpts,
) -> Result<()> {
    require("cluster_id", cluster_id)?;
    let body = build_request_body(opts, "spec")?;
    client
        .put(
            &client.service_url(&["clusters", cluster_id, "mastereip"]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    info!("master EIP {:?} on cluster {cluster_id}", opts.action);
    Ok(())
}
