//! Cloud Trace Service bindings

pub mod traces;
