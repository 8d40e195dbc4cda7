//! Pager
//!
//! Drives a list endpoint page by page. Exactly one request is in flight
//! at a time and the visitor for page N returns before page N+1 is
//! requested.

use super::types::{Page, PagerState, ResourcePage};
use crate::error::{Error, Result};
use crate::http::{RequestConfig, ServiceClient};
use std::marker::PhantomData;
use tracing::{debug, warn};
use url::Url;

/// Iterates a paginated list endpoint
pub struct Pager<'a, P> {
    client: &'a ServiceClient,
    initial_url: String,
    config: RequestConfig,
    state: PagerState,
    pages_visited: usize,
    _page: PhantomData<fn() -> P>,
}

impl<'a, P: ResourcePage> Pager<'a, P> {
    /// Create a pager seeded with the first page URL
    pub fn new(client: &'a ServiceClient, url: impl Into<String>) -> Self {
        Self {
            client,
            initial_url: url.into(),
            config: RequestConfig::default(),
            state: PagerState::Fetching,
            pages_visited: 0,
            _page: PhantomData,
        }
    }

    /// Request settings applied to every page fetch
    #[must_use]
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }

    /// Current state
    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Number of pages handed to the visitor so far
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// URL of the first page
    pub fn initial_url(&self) -> &str {
        &self.initial_url
    }

    /// Rewind a finished pager to its first page
    pub fn reset(&mut self) {
        self.state = PagerState::Fetching;
        self.pages_visited = 0;
    }

    /// Visit every page in order
    ///
    /// The visitor returns `Ok(true)` to continue, `Ok(false)` to stop
    /// early, or an error which is returned unchanged. Iteration also ends
    /// when a page carries no usable next link.
    pub async fn each_page<F, E>(&mut self, mut visitor: F) -> std::result::Result<(), E>
    where
        F: FnMut(&P) -> std::result::Result<bool, E>,
        E: From<Error>,
    {
        if self.state.is_terminal() {
            return Err(Error::pagination(format!(
                "pager for {} already finished ({:?}), call reset() to iterate again",
                self.initial_url, self.state
            ))
            .into());
        }

        let mut url = self.client.resolve(&self.initial_url);

        loop {
            self.transition(PagerState::Fetching);
            let page = match self.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    self.transition(PagerState::Failed);
                    return Err(e.into());
                }
            };

            self.transition(PagerState::Visiting);
            let resource = P::from_page(page);
            if let Ok(true) = resource.is_empty() {
                debug!("page {} of {} is empty", self.pages_visited + 1, self.initial_url);
            }
            self.pages_visited += 1;

            match visitor(&resource) {
                Err(e) => {
                    self.transition(PagerState::Failed);
                    return Err(e);
                }
                Ok(false) => {
                    debug!("visitor stopped after {} page(s)", self.pages_visited);
                    self.transition(PagerState::Done);
                    return Ok(());
                }
                Ok(true) => {}
            }

            match next_url(&resource) {
                Some(next) => {
                    self.transition(PagerState::Continuing);
                    url = next;
                }
                None => {
                    self.transition(PagerState::Done);
                    return Ok(());
                }
            }
        }
    }

    /// Collect every page
    pub async fn all_pages(&mut self) -> Result<Vec<P>>
    where
        P: Clone,
    {
        let mut pages = Vec::new();
        self.each_page(|page: &P| {
            pages.push(page.clone());
            Ok::<_, Error>(true)
        })
        .await?;
        Ok(pages)
    }

    /// Collect the items of every page through an extraction function
    pub async fn collect_items<T, X>(&mut self, extract: X) -> Result<Vec<T>>
    where
        X: Fn(&P) -> Result<Vec<T>>,
    {
        let mut items = Vec::new();
        self.each_page(|page: &P| {
            items.extend(extract(page)?);
            Ok::<_, Error>(true)
        })
        .await?;
        Ok(items)
    }

    async fn fetch(&self, url: &str) -> Result<Page> {
        let parsed = Url::parse(url)?;
        let response = self.client.get(url, self.config.clone()).await?;
        Ok(Page::new(parsed, response))
    }

    fn transition(&mut self, next: PagerState) {
        debug!("pager {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Resolve the next link of a page against the page URL
fn next_url<P: ResourcePage>(resource: &P) -> Option<String> {
    let href = resource.next_page_url()?;
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let current = resource.page().url();
    match current.join(href) {
        Ok(next) if next == *current => {
            warn!("next link {next} points back at the current page, stopping");
            None
        }
        Ok(next) => Some(next.to_string()),
        Err(e) => {
            warn!("ignoring malformed next link '{href}': {e}");
            None
        }
    }
}

impl<P> std::fmt::Debug for Pager<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("initial_url", &self.initial_url)
            .field("state", &self.state)
            .field("pages_visited", &self.pages_visited)
            .finish_non_exhaustive()
    }
}
