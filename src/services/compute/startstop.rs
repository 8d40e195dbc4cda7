//! Server start/stop actions

use crate::codec::require;
use crate::error::Result;
use crate::http::{RequestConfig, ServiceClient};
use crate::types::JsonObject;
use serde_json::Value;
use tracing::info;

/// Power on a stopped server
pub async fn start(client: &ServiceClient, server_id: &str) -> Result<()> {
    action(client, server_id, "os-start").await
}

/// Power off a running server
pub async fn stop(client: &ServiceClient, server_id: &str) -> Result<()> {
    action(client, server_id, "os-stop").await
}

async fn action(client: &ServiceClient, server_id: &str, name: &str) -> Result<()> {
    require("server_id", server_id)?;

    let mut body = JsonObject::new();
    body.insert(name.to_string(), Value::Null);

    let url = client.service_url(&["servers", server_id, "action"]);
    client
        .post(&url, Value::Object(body), RequestConfig::new().ok_codes(&[202]))
        .await?;

    info!("{name} accepted for server {server_id}");
    Ok(())
}
