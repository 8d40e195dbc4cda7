//! Authentication module
//!
//! Supports: Token (`X-Auth-Token`), Bearer, Basic, API Key, Custom Headers
//!
//! Credentials are static; acquiring or refreshing tokens is left to the
//! caller, which hands the result to [`AuthConfig`].

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
