//! Storage Disaster Recovery Service bindings

pub mod domains;
