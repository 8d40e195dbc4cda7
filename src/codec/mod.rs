//! Body codec module
//!
//! Turns request option structs into JSON request bodies and response
//! bodies back into typed results.
//!
//! # Overview
//!
//! - [`build_request_body`] validates required fields, serializes the options
//!   and optionally nests them under a wrapper key (`{"snapshot": {...}}`).
//! - [`extract_into`] decodes a whole response body.
//! - [`extract_into_struct`] / [`extract_into_slice`] decode the object or
//!   array found under a named root field.
//!
//! Extraction is strict: a missing root field is an [`Error::Shape`](crate::Error::Shape).
//! The `_or_default` variants are the explicit opt-in for tolerant parsing.

mod extract;
mod request;

pub use extract::{
    extract_into, extract_into_slice, extract_into_slice_or_default, extract_into_struct,
    extract_into_struct_or_default, extract_value,
};
pub use request::{build_request_body, require, IsZero, RequestBody};

#[cfg(test)]
mod tests;
