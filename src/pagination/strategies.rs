//! Next-link strategies
//!
//! APIs advertise continuation in a handful of shapes. Each helper reads
//! one of them from a [`Page`] and never fails: a missing or malformed
//! link simply means there is no next page.

use super::types::{extract_next_url, Page, PageLink, ResourcePage};
use crate::error::Result;
use serde_json::Value;
use tracing::debug;

/// Default location of an embedded next link
pub const DEFAULT_LINK_PATH: &[&str] = &["links", "next"];

// ============================================================================
// Named Links Array
// ============================================================================

/// Next URL from a named links array
///
/// `{"nat_gateways": [...], "nat_gateways_links": [{"href": "...", "rel": "next"}]}`
pub fn next_from_links(page: &Page, key: &str) -> Option<String> {
    let body = page.json()?;
    next_from_links_value(&body, key)
}

fn next_from_links_value(body: &Value, key: &str) -> Option<String> {
    let entries = body.get(key)?.as_array()?;
    let links: Vec<PageLink> = entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect();
    extract_next_url(&links)
}

// ============================================================================
// Embedded Link Path
// ============================================================================

/// Next URL from a single embedded link field
///
/// The value at `path` may be the URL itself or an object with `href`.
/// `{"links": {"next": "https://..."}}`
pub fn next_from_path(page: &Page, path: &[&str]) -> Option<String> {
    let body = page.json()?;
    next_from_path_value(&body, path)
}

fn next_from_path_value(body: &Value, path: &[&str]) -> Option<String> {
    match lookup_path(body, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => match map.get("href") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Marker
// ============================================================================

/// Next URL built from a marker found in the body
///
/// The current page URL is reused with `param` set to the marker at
/// `marker_path`, e.g. `meta_data.marker` -> `?next=<marker>`.
pub fn next_from_marker(page: &Page, marker_path: &[&str], param: &str) -> Option<String> {
    let body = page.json()?;
    let marker = match lookup_path(&body, marker_path)? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let mut url = page.url().clone();
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != param)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(param, &marker);

    Some(url.to_string())
}

// ============================================================================
// Helpers
// ============================================================================

/// Walk a path of object keys
pub fn lookup_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for part in path {
        match current {
            Value::Object(map) => {
                current = map.get(*part)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Whether the array under `key` is empty
///
/// A missing key is `Error::Shape`; `null` counts as empty.
pub fn is_empty_at(page: &Page, key: &str) -> Result<bool> {
    let items: Vec<Value> = page.extract_into_slice(key)?;
    Ok(items.is_empty())
}

// ============================================================================
// Generic Page
// ============================================================================

/// Resource-agnostic page
///
/// Items are the first array field of the root object that is not a links
/// field; continuation is read from any `*_links` array, then from
/// `links.next`.
#[derive(Debug, Clone)]
pub struct GenericPage {
    page: Page,
}

impl GenericPage {
    /// Name of the field holding the items, if any
    pub fn items_key(&self) -> Option<String> {
        let body = self.page.json()?;
        let map = body.as_object()?;
        map.iter()
            .find(|(k, v)| v.is_array() && !is_links_key(k))
            .map(|(k, _)| k.clone())
    }

    /// Items of this page
    pub fn items(&self) -> Result<Vec<Value>> {
        match self.items_key() {
            Some(key) => self.page.extract_into_slice(&key),
            None => {
                // Validate the body even when there is nothing to return
                let _: Value = self.page.extract_into()?;
                Ok(Vec::new())
            }
        }
    }

    /// Items under an explicit key
    pub fn items_at(&self, key: &str) -> Result<Vec<Value>> {
        self.page.extract_into_slice(key)
    }
}

fn is_links_key(key: &str) -> bool {
    key == "links" || key.ends_with("_links")
}

impl ResourcePage for GenericPage {
    fn from_page(page: Page) -> Self {
        Self { page }
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.items()?.is_empty())
    }

    fn next_page_url(&self) -> Option<String> {
        let body = self.page.json()?;
        let map = body.as_object()?;

        for key in map.keys().filter(|k| k.ends_with("_links")) {
            if let Some(next) = next_from_links_value(&body, key) {
                debug!("next link found in '{key}'");
                return Some(next);
            }
        }

        next_from_path_value(&body, DEFAULT_LINK_PATH)
    }
}
