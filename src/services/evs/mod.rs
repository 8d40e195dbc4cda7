//! Elastic Volume Service bindings

pub mod snapshots;
