//! Cloud Databases (v1) bindings

pub mod instances;
