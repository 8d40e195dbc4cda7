//! Cloud Container Engine (v3) bindings
//!
//! CCE resources live under `/api/v3/projects/{project_id}`, so the
//! client is usually built with
//! [`with_resource_base`](crate::ServiceClient::with_resource_base).

pub mod clusters;
pub mod nodes;
