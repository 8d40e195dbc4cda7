//! Database instances

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::pagination::PageLink;
use serde::{Deserialize, Serialize};

/// Database engine and version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datastore {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
}

/// Flavor reference of an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flavor {
    pub id: String,
    pub links: Vec<PageLink>,
}

/// Attached storage, size in GB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub size: u32,
    /// Used space in GB, only reported once the instance is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<f64>,
}

/// A database instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub id: String,
    pub name: String,
    /// `BUILD`, `ACTIVE`, `REBOOT`, ...
    pub status: String,
    pub hostname: String,
    /// Kept as sent by the API
    pub created: String,
    pub updated: String,
    pub datastore: Datastore,
    pub flavor: Flavor,
    pub volume: Volume,
    pub links: Vec<PageLink>,
}

/// Volume request for [`CreateOpts`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeOpts {
    pub size: u32,
}

/// Options for [`create`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "flavorRef")]
    pub flavor_ref: String,
    pub volume: VolumeOpts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datastore: Option<Datastore>,
}

impl RequestBody for CreateOpts {
    fn validate(&self) -> Result<()> {
        require("flavorRef", &self.flavor_ref)?;
        require("volume.size", &self.volume.size)
    }
}

/// Create an instance; the result reflects the `BUILD` state
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<Instance> {
    let body = build_request_body(opts, "instance")?;
    let raw = client
        .post(
            &client.service_url(&["instances"]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into_struct("instance")
}

pub async fn get(client: &ServiceClient, id: &str) -> Result<Instance> {
    require("id", id)?;
    let raw = client
        .get(&client.service_url(&["instances", id]), RequestConfig::new())
        .await?;
    raw.extract_into_struct("instance")
}
