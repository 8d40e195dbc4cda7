//! NAT gateways

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient, UrlBuilder};
use crate::pagination::{is_empty_at, next_from_links, Page, Pager, ResourcePage};
use serde::{Deserialize, Serialize};

const RESOURCE: &str = "nat_gateways";

/// A NAT gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatGateway {
    /// Gateway ID
    pub id: String,
    /// Name
    #[serde(default)]
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Router the gateway is attached to
    #[serde(default)]
    pub router_id: String,
    /// Network behind the gateway
    #[serde(default)]
    pub internal_network_id: String,
    /// Owning project
    #[serde(default)]
    pub tenant_id: String,
    /// Size class, `"1"` to `"4"`
    #[serde(default)]
    pub spec: String,
    /// `ACTIVE`, `PENDING_CREATE`, ...
    #[serde(default)]
    pub status: String,
    /// Administrative state
    #[serde(default)]
    pub admin_state_up: bool,
}

/// Options for [`create`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// Name
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Size class
    pub spec: String,
    /// Router to attach to
    pub router_id: String,
    /// Network behind the gateway
    pub internal_network_id: String,
    /// Owning project, defaults to the caller's
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
}

impl RequestBody for CreateOpts {
    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("spec", &self.spec)?;
        require("router_id", &self.router_id)?;
        require("internal_network_id", &self.internal_network_id)
    }
}

/// Options for [`update`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New size class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
}

impl RequestBody for UpdateOpts {}

/// Filters for [`list`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOpts {
    /// Name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Router filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    /// Status filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Start after this gateway ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// One page of NAT gateways
#[derive(Debug, Clone)]
pub struct NatGatewayPage(Page);

impl NatGatewayPage {
    /// Gateways on this page
    pub fn nat_gateways(&self) -> Result<Vec<NatGateway>> {
        self.0.extract_into_slice("nat_gateways")
    }
}

impl ResourcePage for NatGatewayPage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "nat_gateways")
    }

    fn next_page_url(&self) -> Option<String> {
        next_from_links(&self.0, "nat_gateways_links")
    }
}

/// Create a NAT gateway
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<NatGateway> {
    let body = build_request_body(opts, "nat_gateway")?;
    let raw = client
        .post(
            &client.service_url(&[RESOURCE]),
            body,
            RequestConfig::new().ok_codes(&[201]),
        )
        .await?;
    raw.extract_into_struct("nat_gateway")
}

/// Fetch one NAT gateway
pub async fn get(client: &ServiceClient, id: &str) -> Result<NatGateway> {
    require("id", id)?;
    let raw = client
        .get(&client.service_url(&[RESOURCE, id]), RequestConfig::new())
        .await?;
    raw.extract_into_struct("nat_gateway")
}

/// Update a NAT gateway
pub async fn update(client: &ServiceClient, id: &str, opts: &UpdateOpts) -> Result<NatGateway> {
    require("id", id)?;
    let body = build_request_body(opts, "nat_gateway")?;
    let raw = client
        .put(
            &client.service_url(&[RESOURCE, id]),
            body,
            RequestConfig::new().ok_codes(&[200]),
        )
        .await?;
    raw.extract_into_struct("nat_gateway")
}

/// Delete a NAT gateway
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    require("id", id)?;
    client
        .delete(
            &client.service_url(&[RESOURCE, id]),
            RequestConfig::new().ok_codes(&[204]),
        )
        .await?;
    Ok(())
}

/// Pager over matching NAT gateways
pub fn pager<'a>(client: &'a ServiceClient, opts: &ListOpts) -> Result<Pager<'a, NatGatewayPage>> {
    let path = UrlBuilder::new()
        .with_endpoints([RESOURCE])
        .with_query_params(opts)?
        .build();
    Ok(Pager::new(client, client.service_url(&[&path])))
}

/// Every matching NAT gateway
pub async fn list(client: &ServiceClient, opts: &ListOpts) -> Result<Vec<NatGateway>> {
    let mut pager = pager(client, opts)?;
    pager.collect_items(NatGatewayPage::nat_gateways).await
}
