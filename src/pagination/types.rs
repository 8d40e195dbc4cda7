//! Pagination types and traits
//!
//! Defines the page abstraction every list binding implements.

use crate::codec;
use crate::error::Result;
use crate::http::RawResponse;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// One fetched page: the raw body plus the request that produced it
#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Page {
    /// Wrap a response fetched from `url`
    pub fn new(url: Url, response: RawResponse) -> Self {
        Self {
            url,
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }

    /// Build a page from a JSON document (mostly useful in tests)
    pub fn from_json(url: &str, body: &Value) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?, RawResponse::json(body)))
    }

    /// URL this page was fetched from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP status of the page response
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the body, `None` if it is not valid JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Decode the whole body
    pub fn extract_into<T: DeserializeOwned>(&self) -> Result<T> {
        codec::extract_into(&self.body)
    }

    /// Decode the object under `key`
    pub fn extract_into_struct<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        codec::extract_into_struct(&self.body, key)
    }

    /// Decode the array under `key`
    pub fn extract_into_slice<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        codec::extract_into_slice(&self.body, key)
    }
}

/// Relation of a page link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRel {
    /// Following page
    Next,
    /// Preceding page
    #[serde(alias = "prev")]
    Previous,
    /// Any other relation (`self`, `bookmark`, ...)
    #[serde(other)]
    Other,
}

/// A `{"href": ..., "rel": ...}` entry of a `<resource>_links` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Target URL, absolute or relative to the page
    pub href: String,
    /// Link relation
    pub rel: LinkRel,
}

impl PageLink {
    /// Create a link
    pub fn new(href: impl Into<String>, rel: LinkRel) -> Self {
        Self {
            href: href.into(),
            rel,
        }
    }

    /// Whether this is a usable next link
    pub fn is_next(&self) -> bool {
        self.rel == LinkRel::Next && !self.href.trim().is_empty()
    }
}

/// Find the href of the first usable `next` link
pub fn extract_next_url(links: &[PageLink]) -> Option<String> {
    links.iter().find(|l| l.is_next()).map(|l| l.href.clone())
}

/// Capability set the pager needs from a resource page
///
/// Each list binding wraps [`Page`] in its own type and implements this
/// trait, usually with one of the helpers in this module.
pub trait ResourcePage: Sized {
    /// Wrap a freshly fetched page
    fn from_page(page: Page) -> Self;

    /// The underlying page
    fn page(&self) -> &Page;

    /// Whether the page holds no items
    fn is_empty(&self) -> Result<bool>;

    /// Next page URL; `None` ends iteration
    fn next_page_url(&self) -> Option<String>;
}

/// Pager state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// Requesting the current URL
    Fetching,
    /// Running the visitor on the fetched page
    Visiting,
    /// Visitor asked for more and a next link was found
    Continuing,
    /// Iteration finished without error
    Done,
    /// Iteration aborted by an error
    Failed,
}

impl PagerState {
    /// Whether no further requests will be issued
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}
