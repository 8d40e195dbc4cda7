//! Elastic Load Balance (v3) bindings

pub mod loadbalancers;
pub mod security_policy;
