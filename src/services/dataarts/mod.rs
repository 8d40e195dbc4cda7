//! DataArts Studio CDM (v1.1) bindings

pub mod cluster;
