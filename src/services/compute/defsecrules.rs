//! Default security group rules
//!
//! Rules added to every new security group of the project. The list
//! endpoint is not paginated.

use crate::codec::{build_request_body, require, RequestBody};
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::pagination::{is_empty_at, Page, Pager, ResourcePage};
use serde::{Deserialize, Serialize};

const RESOURCE: &str = "os-security-group-default-rules";

/// IP range of a rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRange {
    /// Source CIDR
    #[serde(default)]
    pub cidr: String,
}

/// A default security group rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRule {
    /// Rule ID
    pub id: String,
    /// Lower bound of the port range
    #[serde(default)]
    pub from_port: i32,
    /// Upper bound of the port range
    #[serde(default)]
    pub to_port: i32,
    /// `tcp`, `udp` or `icmp`
    #[serde(default)]
    pub ip_protocol: String,
    /// Allowed source range
    #[serde(default)]
    pub ip_range: IpRange,
}

/// Options for [`create`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    /// `tcp`, `udp` or `icmp`
    pub ip_protocol: String,
    /// Lower bound of the port range
    pub from_port: i32,
    /// Upper bound of the port range
    pub to_port: i32,
    /// Source CIDR
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cidr: String,
}

impl RequestBody for CreateOpts {
    fn validate(&self) -> Result<()> {
        require("ip_protocol", &self.ip_protocol)
    }
}

/// Single page of default rules
#[derive(Debug, Clone)]
pub struct DefaultRulePage(Page);

impl DefaultRulePage {
    /// Rules on this page
    pub fn rules(&self) -> Result<Vec<DefaultRule>> {
        self.0.extract_into_slice("security_group_default_rules")
    }
}

impl ResourcePage for DefaultRulePage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "security_group_default_rules")
    }

    fn next_page_url(&self) -> Option<String> {
        None
    }
}

/// List every default rule
pub async fn list(client: &ServiceClient) -> Result<Vec<DefaultRule>> {
    let mut pager: Pager<'_, DefaultRulePage> = Pager::new(client, client.service_url(&[RESOURCE]));
    pager.collect_items(DefaultRulePage::rules).await
}

/// Add a default rule
pub async fn create(client: &ServiceClient, opts: &CreateOpts) -> Result<DefaultRule> {
    let body = build_request_body(opts, "security_group_default_rule")?;
    let raw = client
        .post(&client.service_url(&[RESOURCE]), body, RequestConfig::new())
        .await?;
    raw.extract_into_struct("security_group_default_rule")
}

/// Fetch one default rule
pub async fn get(client: &ServiceClient, id: &str) -> Result<DefaultRule> {
    require("id", id)?;
    let raw = client
        .get(&client.service_url(&[RESOURCE, id]), RequestConfig::new())
        .await?;
    raw.extract_into_struct("security_group_default_rule")
}

/// Remove a default rule
pub async fn delete(client: &ServiceClient, id: &str) -> Result<()> {
    require("id", id)?;
    client
        .delete(&client.service_url(&[RESOURCE, id]), RequestConfig::new())
        .await?;
    Ok(())
}
