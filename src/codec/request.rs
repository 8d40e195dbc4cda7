//! Request body building
//!
//! Option structs carry their omit-empty rules as serde attributes
//! (`skip_serializing_if`) and their required fields through
//! [`RequestBody::validate`].

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// A serializable set of request options
///
/// Implementors list their required fields in `validate`, usually with
/// [`require`]. Nested option structs are validated by calling their own
/// `validate` from the parent.
pub trait RequestBody: Serialize {
    /// Check required fields before anything is sent
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl RequestBody for Value {}

impl<V: Serialize> RequestBody for HashMap<String, V> {}

impl<V: Serialize> RequestBody for BTreeMap<String, V> {}

/// Zero-value check used for required fields
pub trait IsZero {
    /// Returns true when the value counts as "not provided"
    fn is_zero(&self) -> bool;
}

impl IsZero for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl<T> IsZero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T> IsZero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> IsZero for [T] {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> IsZero for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> IsZero for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl IsZero for Value {
    fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
        }
    }
}

impl<T: IsZero + ?Sized> IsZero for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

macro_rules! impl_is_zero_numeric {
    ($($t:ty),*) => {
        $(
            impl IsZero for $t {
                #[allow(clippy::float_cmp)]
                fn is_zero(&self) -> bool {
                    *self == (0 as $t)
                }
            }
        )*
    };
}

impl_is_zero_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Fail with a validation error when a required field holds its zero value
pub fn require<T: IsZero + ?Sized>(field: &str, value: &T) -> Result<()> {
    if value.is_zero() {
        return Err(Error::validation(field));
    }
    Ok(())
}

/// Build a JSON request body from an options struct
///
/// When `wrapper_key` is non-empty the serialized options are nested under
/// it, e.g. `{"security_policy": {...}}`.
pub fn build_request_body<T>(opts: &T, wrapper_key: &str) -> Result<Value>
where
    T: RequestBody + ?Sized,
{
    opts.validate()?;

    let body = serde_json::to_value(opts).map_err(|e| Error::encoding(e.to_string()))?;

    if wrapper_key.is_empty() {
        return Ok(body);
    }

    let mut wrapped = Map::new();
    wrapped.insert(wrapper_key.to_string(), body);
    Ok(Value::Object(wrapped))
}
