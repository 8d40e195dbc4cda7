//! Load balancers
//!
//! v3 lists are marker paginated: each page carries
//! `page_info.next_marker`, which becomes the `marker` query parameter of
//! the following request.

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient, UrlBuilder};
use crate::pagination::{is_empty_at, next_from_marker, Page, Pager, ResourcePage};
use serde::{Deserialize, Serialize};

const RESOURCE: &str = "loadbalancers";

/// Reference to a child resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource ID
    pub id: String,
}

/// Elastic IP bound to a load balancer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EipInfo {
    /// EIP ID
    #[serde(default)]
    pub eip_id: String,
    /// EIP address
    #[serde(default)]
    pub eip_address: String,
    /// 4 or 6
    #[serde(default)]
    pub ip_version: u8,
}

/// Public IP bound to a load balancer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIpInfo {
    /// Public IP ID
    #[serde(default, rename = "publicip_id")]
    pub public_ip_id: String,
    /// Public IP address
    #[serde(default, rename = "publicip_address")]
    pub public_ip_address: String,
    /// 4 or 6
    #[serde(default)]
    pub ip_version: u8,
}

/// A load balancer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Load balancer ID
    pub id: String,
    /// Name
    #[serde(default)]
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Owning project
    #[serde(default)]
    pub project_id: String,
    /// `ACTIVE`, `PENDING_CREATE`, `ERROR`
    #[serde(default)]
    pub provisioning_status: String,
    /// `ONLINE`, `FROZEN`, ...
    #[serde(default)]
    pub operating_status: String,
    /// Administrative state
    #[serde(default)]
    pub admin_state_up: bool,
    /// Private IPv4 VIP
    #[serde(default)]
    pub vip_address: String,
    /// Subnet of the VIP
    #[serde(default)]
    pub vip_subnet_cidr_id: String,
    /// Port of the VIP
    #[serde(default)]
    pub vip_port_id: String,
    /// Availability zones
    #[serde(default)]
    pub availability_zone_list: Vec<String>,
    /// Bound EIPs
    #[serde(default)]
    pub eips: Vec<EipInfo>,
    /// Bound public IPs
    #[serde(default, rename = "publicips")]
    pub public_ips: Vec<PublicIpInfo>,
    /// Attached listeners
    #[serde(default)]
    pub listeners: Vec<ResourceRef>,
    /// Attached pools
    #[serde(default)]
    pub pools: Vec<ResourceRef>,
    /// Creation time
    #[serde(default)]
    pub created_at: String,
    /// Last update time
    #[serde(default)]
    pub updated_at: String,
}

/// Status of a backend member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatus {
    /// Member ID
    pub id: String,
    /// Backend address
    #[serde(default)]
    pub address: String,
    /// Backend port
    #[serde(default)]
    pub protocol_port: u16,
    /// Provisioning status
    #[serde(default)]
    pub provisioning_status: String,
    /// Health as seen by the load balancer
    #[serde(default)]
    pub operating_status: String,
}

/// Status of a pool and its members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    /// Pool ID
    pub id: String,
    /// Pool name
    #[serde(default)]
    pub name: String,
    /// Provisioning status
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status
    #[serde(default)]
    pub operating_status: String,
    /// Members
    #[serde(default)]
    pub members: Vec<MemberStatus>,
}

/// Status of a listener and its pools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerStatus {
    /// Listener ID
    pub id: String,
    /// Listener name
    #[serde(default)]
    pub name: String,
    /// Provisioning status
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status
    #[serde(default)]
    pub operating_status: String,
    /// Pools
    #[serde(default)]
    pub pools: Vec<PoolStatus>,
}

/// Load balancer node of a status tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerStatus {
    /// Load balancer ID
    pub id: String,
    /// Name
    #[serde(default)]
    pub name: String,
    /// Provisioning status
    #[serde(default)]
    pub provisioning_status: String,
    /// Operating status
    #[serde(default)]
    pub operating_status: String,
    /// Listeners
    #[serde(default)]
    pub listeners: Vec<ListenerStatus>,
}

/// Result of [`get_statuses`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTree {
    /// Root of the tree
    pub loadbalancer: LoadBalancerStatus,
}

/// Filters for [`list`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    /// Name filter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    /// VIP filter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vip_address: Vec<String>,
    /// Provisioning status filter
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provisioning_status: Vec<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Start after this load balancer ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// One page of load balancers
#[derive(Debug, Clone)]
pub struct LoadBalancerPage(Page);

impl LoadBalancerPage {
    /// Load balancers on this page
    pub fn loadbalancers(&self) -> Result<Vec<LoadBalancer>> {
        self.0.extract_into_slice("loadbalancers")
    }
}

impl ResourcePage for LoadBalancerPage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "loadbalancers")
    }

    fn next_page_url(&self) -> Option<String> {
        // An empty page ends the walk even when it carries a marker, and so
        // does a page without the array
        if self.is_empty().unwrap_or(true) {
            return None;
        }
        next_from_marker(&self.0, &["page_info", "next_marker"], "marker")
    }
}

/// Fetch one load balancer
pub async fn get(client: &ServiceClient, id: &str) -> Result<LoadBalancer> {
    require("id", id)?;
    let raw = client
        .get(&client.service_url(&[RESOURCE, id]), RequestConfig::new())
        .await?;
    raw.extract_into_struct("loadbalancer")
}

/// Fetch the status tree of a load balancer
pub async fn get_statuses(client: &ServiceClient, id: &str) -> Result<StatusTree> {
    require("id", id)?;
    let raw = client
        .get(
            &client.service_url(&[RESOURCE, id, "statuses"]),
            RequestConfig::new(),
        )
        .await?;
    raw.extract_into_struct("statuses")
}

/// Pager over matching load balancers
pub fn pager<'a>(client: &'a ServiceClient, opts: &ListOpts) -> Result<Pager<'a, LoadBalancerPage>> {
    let path = UrlBuilder::new()
        .with_endpoints([RESOURCE])
        .with_query_params(opts)?
        .build();
    Ok(Pager::new(client, client.service_url(&[&path])))
}

/// Every matching load balancer
pub async fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Vec<LoadBalancer>> {
    let mut pager = pager(client, opts)?;
    pager.collect_items(LoadBalancerPage::loadbalancers).await
}
