//! Pagination module
//!
//! Supports: named links arrays, embedded link fields, markers, single pages
//!
//! # Overview
//!
//! Every list binding wraps the fetched [`Page`] in its own type and
//! implements [`ResourcePage`]. The [`Pager`] depends only on that trait:
//! it fetches a page, hands it to the caller's visitor, then follows the
//! page's next link until the visitor stops or no link remains.

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{
    is_empty_at, lookup_path, next_from_links, next_from_marker, next_from_path, GenericPage,
    DEFAULT_LINK_PATH,
};
pub use types::{extract_next_url, LinkRel, Page, PageLink, PagerState, ResourcePage};

#[cfg(test)]
mod tests;
