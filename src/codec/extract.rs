//! Response body extraction
//!
//! Every function here is a pure decode of raw bytes; nothing is cached.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a whole response body
pub fn extract_into<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

/// Parse a body into a generic JSON value
pub fn extract_value(body: &[u8]) -> Result<Value> {
    extract_into(body)
}

/// Decode the object found under `key` in the root object
///
/// An empty `key` decodes the whole body, which must then be an object.
pub fn extract_into_struct<T: DeserializeOwned>(body: &[u8], key: &str) -> Result<T> {
    let root = extract_value(body)?;
    let value = take_key(root, key)?;
    into_struct(value, key)
}

/// Decode the array found under `key` in the root object
///
/// `null` under the key decodes to an empty vec.
pub fn extract_into_slice<T: DeserializeOwned>(body: &[u8], key: &str) -> Result<Vec<T>> {
    let root = extract_value(body)?;
    let value = take_key(root, key)?;
    into_slice(value, key)
}

/// Like [`extract_into_struct`], but an absent key yields `T::default()`
pub fn extract_into_struct_or_default<T>(body: &[u8], key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let root = extract_value(body)?;
    match take_key(root, key) {
        Ok(value) => into_struct(value, key),
        Err(Error::Shape { .. }) => Ok(T::default()),
        Err(e) => Err(e),
    }
}

/// Like [`extract_into_slice`], but an absent key yields an empty vec
pub fn extract_into_slice_or_default<T: DeserializeOwned>(body: &[u8], key: &str) -> Result<Vec<T>> {
    let root = extract_value(body)?;
    match take_key(root, key) {
        Ok(value) => into_slice(value, key),
        Err(Error::Shape { .. }) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Move the value under `key` out of the root object
fn take_key(root: Value, key: &str) -> Result<Value> {
    if key.is_empty() {
        return Ok(root);
    }

    match root {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| Error::shape(key, "key not found in response body")),
        other => Err(Error::shape(
            key,
            format!("expected a JSON object at the root, found {}", kind(&other)),
        )),
    }
}

fn into_struct<T: DeserializeOwned>(value: Value, key: &str) -> Result<T> {
    if !value.is_object() {
        return Err(Error::shape(
            key,
            format!("expected a JSON object, found {}", kind(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|e| Error::decode(format!("field '{key}': {e}")))
}

fn into_slice<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| Error::decode(format!("field '{key}': {e}"))),
        other => Err(Error::shape(
            key,
            format!("expected a JSON array, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
