//! Cluster nodes
//!
//! Responses follow the Kubernetes object layout (`kind`, `apiVersion`,
//! `metadata`, `spec`, `status`) and lists are returned in one piece under
//! `items`.

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Node name
    pub name: String,
    /// Node ID
    #[serde(rename = "uid")]
    pub id: String,
    /// Kubernetes labels
    pub labels: StringMap,
    /// Kubernetes annotations
    pub annotations: StringMap,
}

/// Login credentials of a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginSpec {
    /// Key pair name
    pub ssh_key: String,
}

/// A node disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSpec {
    /// Size in GiB
    pub size: u32,
    /// `SATA`, `SAS`, `SSD`
    #[serde(rename = "volumetype")]
    pub volume_type: String,
}

/// Desired node configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spec {
    /// ECS flavor
    pub flavor: String,
    /// Availability zone
    pub az: String,
    /// Operating system
    pub os: String,
    /// Login settings
    pub login: LoginSpec,
    /// System disk
    pub root_volume: VolumeSpec,
    /// Data disks
    pub data_volumes: Vec<VolumeSpec>,
    /// Billing mode, 0 for pay-per-use
    pub billing_mode: i32,
    /// Number of nodes created from this spec
    pub count: u32,
    /// Kubernetes labels applied on creation
    pub k8s_tags: StringMap,
}

/// Observed node state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    /// `Build`, `Active`, `Abnormal`, `Deleting`, ...
    pub phase: String,
    /// Underlying ECS ID
    #[serde(rename = "ServerID")]
    pub server_id: String,
    /// Bound EIP
    #[serde(rename = "PublicIP")]
    pub public_ip: String,
    /// Private address
    #[serde(rename = "privateIP")]
    pub private_ip: String,
    /// Job of the last operation
    #[serde(rename = "jobID")]
    pub job_id: String,
    /// Reason of the current phase
    pub reason: String,
    /// Details of the current phase
    pub message: String,
}

/// A cluster node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Always `Node`
    pub kind: String,
    /// API version, `v3`
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Metadata
    pub metadata: Metadata,
    /// Desired state
    pub spec: Spec,
    /// Observed state
    pub status: Status,
}

/// Client-side filters for [`list`]; empty fields match everything
#[derive(Debug, Clone, Default)]
pub struct ListOpts {
    /// Node name
    pub name: String,
    /// Node ID
    pub uid: String,
    /// Phase
    pub phase: String,
}

impl ListOpts {
    fn matches(&self, node: &Node) -> bool {
        (self.name.is_empty() || node.metadata.name == self.name)
            && (self.uid.is_empty() || node.metadata.id == self.uid)
            && (self.phase.is_empty() || node.status.phase == self.phase)
    }
}

/// CCE expects a JSON content type even on bodyless requests
fn request_config() -> RequestConfig {
    RequestConfig::new().header("Content-Type", "application/json")
}

/// Fetch one node
pub async fn get(client: &ServiceClient, cluster_id: &str, node_id: &str) -> Result<Node> {
    require("cluster_id", cluster_id)?;
    require("node_id", node_id)?;
    let raw = client
        .get(
            &client.service_url(&["clusters", cluster_id, "nodes", node_id]),
            request_config(),
        )
        .await?;
    raw.extract_into_struct("")
}

/// List the nodes of a cluster
pub async fn list(client: &ServiceClient, cluster_id: &str, opts: &ListOpts) -> Result<Vec<Node>> {
    require("cluster_id", cluster_id)?;
    let raw = client
        .get(
            &client.service_url(&["clusters", cluster_id, "nodes"]),
            request_config(),
        )
        .await?;
    let nodes: Vec<Node> = raw.extract_into_slice("items")?;
    Ok(nodes.into_iter().filter(|n| opts.matches(n)).collect())
}

/// Delete a node
pub async fn delete(client: &ServiceClient, cluster_id: &str, node_id: &str) -> Result<()> {
    require("cluster_id", cluster_id)?;
    require("node_id", node_id)?;
    client
        .delete(
            &client.service_url(&["clusters", cluster_id, "nodes", node_id]),
            request_config().ok_codes(&[200]),
        )
        .await?;
    Ok(())
}
