//! Networking bindings

pub mod natgateways;
