//! Resource bindings
//!
//! One module per service, one submodule per resource. Every operation
//! takes the [`ServiceClient`](crate::ServiceClient) for its service
//! explicitly, builds the request with the body codec and decodes the
//! response the same way:
//!
//! ```rust,ignore
//! use otcloud::services::evs::snapshots;
//!
//! let client = ServiceClient::from_config(&config)?;
//! let snap = snapshots::get(&client, "a1b2").await?;
//! let all = snapshots::list(&client, &snapshots::ListOpts::default()).await?;
//! ```

pub mod apigw;
pub mod cce;
pub mod compute;
pub mod cts;
pub mod dataarts;
pub mod db;
pub mod elb;
pub mod evs;
pub mod networking;
pub mod rds;
pub mod sdrs;
