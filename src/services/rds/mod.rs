//! Relational Database Service (v1) bindings

pub mod datastores;
