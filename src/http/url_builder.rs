//! Resource path and query string construction

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// Builds `a/b/c?x=1&y=2` style relative URLs
///
/// Query structs are plain `Serialize` types; `null`, empty strings and
/// empty arrays are skipped, arrays repeat their key.
#[derive(Debug, Clone, Default)]
pub struct UrlBuilder {
    endpoints: Vec<String>,
    query: Vec<(String, String)>,
}

impl UrlBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append path segments
    #[must_use]
    pub fn with_endpoints<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.endpoints
            .extend(parts.into_iter().map(|p| p.as_ref().to_string()));
        self
    }

    /// Append a single query parameter
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append every field of a serializable query struct
    pub fn with_query_params<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        let value = serde_json::to_value(params).map_err(|e| Error::encoding(e.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            Value::Null => return Ok(self),
            _ => return Err(Error::encoding("query parameters must serialize to an object")),
        };

        let mut entries: Vec<_> = map.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key, value) in entries {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        if let Some(s) = scalar(&key, item)? {
                            self.query.push((key.clone(), s));
                        }
                    }
                }
                other => {
                    if let Some(s) = scalar(&key, other)? {
                        self.query.push((key, s));
                    }
                }
            }
        }
        Ok(self)
    }

    /// Render the relative URL
    pub fn build(&self) -> String {
        let path = self
            .endpoints
            .iter()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        if self.query.is_empty() {
            return path;
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{path}?{query}")
    }
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::encoding(format!(
            "query parameter '{key}' must be a scalar"
        ))),
    }
}
