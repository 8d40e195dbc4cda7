//! API Gateway (dedicated, v2) bindings

pub mod authorizer;
