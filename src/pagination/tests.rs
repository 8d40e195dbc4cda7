//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::http::RawResponse;
use crate::testing::{client, FakeTransport, ENDPOINT};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Test page: `{"items": [...], "items_links": [...]}`
#[derive(Debug, Clone)]
struct ItemsPage(Page);

impl ItemsPage {
    fn items(&self) -> Result<Vec<String>> {
        self.0.extract_into_slice("items")
    }
}

impl ResourcePage for ItemsPage {
    fn from_page(page: Page) -> Self {
        Self(page)
    }

    fn page(&self) -> &Page {
        &self.0
    }

    fn is_empty(&self) -> Result<bool> {
        is_empty_at(&self.0, "items")
    }

    fn next_page_url(&self) -> Option<String> {
        next_from_links(&self.0, "items_links")
    }
}

// ============================================================================
// PageLink Tests
// ============================================================================

#[test]
fn test_page_link_deserialize() {
    let links: Vec<PageLink> = serde_json::from_value(json!([
        {"href": "https://a/1", "rel": "self"},
        {"href": "https://a/0", "rel": "prev"},
        {"href": "https://a/2", "rel": "next"}
    ]))
    .unwrap();

    assert_eq!(links[0].rel, LinkRel::Other);
    assert_eq!(links[1].rel, LinkRel::Previous);
    assert_eq!(links[2].rel, LinkRel::Next);
    assert_eq!(extract_next_url(&links), Some("https://a/2".to_string()));
}

#[test]
fn test_extract_next_url_ignores_empty_href() {
    let links = vec![
        PageLink::new("", LinkRel::Next),
        PageLink::new("https://a/0", LinkRel::Previous),
    ];
    assert_eq!(extract_next_url(&links), None);
}

#[test]
fn test_pager_state_terminal() {
    assert!(PagerState::Done.is_terminal());
    assert!(PagerState::Failed.is_terminal());
    assert!(!PagerState::Fetching.is_terminal());
    assert!(!PagerState::Visiting.is_terminal());
    assert!(!PagerState::Continuing.is_terminal());
}

// ============================================================================
// Strategy Tests
// ============================================================================

#[test]
fn test_next_from_links_missing_or_malformed() {
    let page = Page::from_json(ENDPOINT, &json!({"items": []})).unwrap();
    assert_eq!(next_from_links(&page, "items_links"), None);

    let page = Page::from_json(ENDPOINT, &json!({"items_links": "nope"})).unwrap();
    assert_eq!(next_from_links(&page, "items_links"), None);

    let page = Page::from_json(ENDPOINT, &json!({"items_links": [{"href": 3}]})).unwrap();
    assert_eq!(next_from_links(&page, "items_links"), None);
}

#[test]
fn test_next_from_path() {
    let page = Page::from_json(
        ENDPOINT,
        &json!({"links": {"next": "https://api.example.com/v1/project/x?page=2"}}),
    )
    .unwrap();
    assert_eq!(
        next_from_path(&page, DEFAULT_LINK_PATH),
        Some("https://api.example.com/v1/project/x?page=2".to_string())
    );

    let page = Page::from_json(ENDPOINT, &json!({"links": {"next": {"href": "/x2"}}})).unwrap();
    assert_eq!(
        next_from_path(&page, DEFAULT_LINK_PATH),
        Some("/x2".to_string())
    );

    let page = Page::from_json(ENDPOINT, &json!({"links": {"next": null}})).unwrap();
    assert_eq!(next_from_path(&page, DEFAULT_LINK_PATH), None);
}

#[test]
fn test_next_from_marker() {
    let page = Page::from_json(
        "https://cts.example.com/v2/p/tracker/trace?limit=2&next=old",
        &json!({"traces": [{}, {}], "meta_data": {"count": 2, "marker": "m-2"}}),
    )
    .unwrap();

    assert_eq!(
        next_from_marker(&page, &["meta_data", "marker"], "next"),
        Some("https://cts.example.com/v2/p/tracker/trace?limit=2&next=m-2".to_string())
    );

    let page = Page::from_json(
        "https://cts.example.com/v2/p/tracker/trace",
        &json!({"traces": [], "meta_data": {"count": 0, "marker": ""}}),
    )
    .unwrap();
    assert_eq!(next_from_marker(&page, &["meta_data", "marker"], "next"), None);
}

#[test]
fn test_is_empty_at_is_strict() {
    let page = Page::from_json(ENDPOINT, &json!({"items": [], "more": null})).unwrap();
    assert!(is_empty_at(&page, "items").unwrap());
    assert!(is_empty_at(&page, "more").unwrap());

    let page = Page::from_json(ENDPOINT, &json!({"other": 1})).unwrap();
    let err = is_empty_at(&page, "items").unwrap_err();
    assert!(matches!(err, Error::Shape { ref key, .. } if key == "items"));
}

#[test]
fn test_lookup_path() {
    let value = json!({"a": {"b": {"c": 1}}});
    assert_eq!(lookup_path(&value, &["a", "b", "c"]), Some(&json!(1)));
    assert_eq!(lookup_path(&value, &["a", "x"]), None);
    assert_eq!(lookup_path(&value, &[]), Some(&value));
}

#[test]
fn test_generic_page() {
    let page = GenericPage::from_page(
        Page::from_json(
            ENDPOINT,
            &json!({
                "servers": [{"id": "a"}, {"id": "b"}],
                "servers_links": [{"href": "https://api.example.com/v1/project/servers?marker=b", "rel": "next"}]
            }),
        )
        .unwrap(),
    );

    assert_eq!(page.items_key(), Some("servers".to_string()));
    assert_eq!(page.items().unwrap().len(), 2);
    assert!(!page.is_empty().unwrap());
    assert_eq!(
        page.next_page_url(),
        Some("https://api.example.com/v1/project/servers?marker=b".to_string())
    );

    let page = GenericPage::from_page(Page::from_json(ENDPOINT, &json!({"count": 0})).unwrap());
    assert!(page.is_empty().unwrap());
    assert_eq!(page.next_page_url(), None);
}

#[test]
fn test_generic_page_items_key_follows_document_order() {
    let body = r#"{"servers":[{"id":1},{"id":2}],"availability_zones":["az1"]}"#;
    let response = RawResponse {
        status: 200,
        headers: reqwest::header::HeaderMap::new(),
        body: bytes::Bytes::from_static(body.as_bytes()),
    };
    let page = GenericPage::from_page(Page::new(url::Url::parse(ENDPOINT).unwrap(), response));

    assert_eq!(page.items_key(), Some("servers".to_string()));
    assert_eq!(page.items().unwrap(), vec![json!({"id": 1}), json!({"id": 2})]);
}

// ============================================================================
// Pager Tests
// ============================================================================

#[tokio::test]
async fn test_pager_two_page_scenario() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": ["a", "b"], "items_links": [{"href": "/p2", "rel": "next"}]}),
    );
    fake.push_json(200, &json!({"items": ["c"], "items_links": []}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let mut calls = Vec::new();
    pager
        .each_page(|page: &ItemsPage| {
            calls.push(page.items()?);
            Ok::<_, Error>(true)
        })
        .await
        .unwrap();

    assert_eq!(
        calls,
        vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()]
        ]
    );
    assert_eq!(pager.state(), PagerState::Done);
    assert_eq!(pager.pages_visited(), 2);
    assert_eq!(
        fake.urls(),
        vec![
            "https://api.example.com/v1/project/items".to_string(),
            "https://api.example.com/p2".to_string()
        ]
    );
}

#[tokio::test]
async fn test_pager_single_empty_page() {
    let fake = FakeTransport::new();
    fake.push_json(200, &json!({"items": []}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let mut calls = Vec::new();
    pager
        .each_page(|page: &ItemsPage| {
            calls.push(page.items()?);
            Ok::<_, Error>(true)
        })
        .await
        .unwrap();

    assert_eq!(calls, vec![Vec::<String>::new()]);
    assert_eq!(pager.state(), PagerState::Done);
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_pager_visits_pages_in_order() {
    let fake = FakeTransport::new();
    for i in 1..=3 {
        let links = if i < 3 {
            json!([{"href": format!("{ENDPOINT}/items?page={}", i + 1), "rel": "next"}])
        } else {
            json!([{"href": format!("{ENDPOINT}/items?page=2"), "rel": "previous"}])
        };
        fake.push_json(200, &json!({"items": [format!("item-{i}")], "items_links": links}));
    }

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");
    let items = pager.collect_items(ItemsPage::items).await.unwrap();

    assert_eq!(items, vec!["item-1", "item-2", "item-3"]);
    assert_eq!(pager.pages_visited(), 3);
    assert_eq!(fake.requests().len(), 3);
}

#[tokio::test]
async fn test_pager_visitor_stops_early() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": ["a"], "items_links": [{"href": "/p2", "rel": "next"}]}),
    );
    fake.push_json(
        200,
        &json!({"items": ["b"], "items_links": [{"href": "/p3", "rel": "next"}]}),
    );
    fake.push_json(200, &json!({"items": ["c"]}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let mut seen = 0;
    pager
        .each_page(|_page: &ItemsPage| {
            seen += 1;
            Ok::<_, Error>(seen < 2)
        })
        .await
        .unwrap();

    assert_eq!(seen, 2);
    assert_eq!(pager.state(), PagerState::Done);
    // No request for page 3
    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_pager_transport_error_skips_visitor() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": ["a"], "items_links": [{"href": "/p2", "rel": "next"}]}),
    );
    fake.push_error(Error::transport("connection reset"));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let mut seen = 0;
    let err = pager
        .each_page(|_page: &ItemsPage| {
            seen += 1;
            Ok::<_, Error>(true)
        })
        .await
        .unwrap_err();

    assert_eq!(seen, 1);
    assert!(matches!(err, Error::Transport { ref message } if message == "connection reset"));
    assert_eq!(pager.state(), PagerState::Failed);
}

#[tokio::test]
async fn test_pager_status_error() {
    let fake = FakeTransport::new();
    fake.push_json(503, &json!({"error": "unavailable"}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let mut seen = 0;
    let err = pager
        .each_page(|_page: &ItemsPage| {
            seen += 1;
            Ok::<_, Error>(true)
        })
        .await
        .unwrap_err();

    assert_eq!(seen, 0);
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("unavailable"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[derive(Debug)]
#[allow(dead_code)]
enum VisitError {
    Quota(usize),
    Api(Error),
}

impl From<Error> for VisitError {
    fn from(e: Error) -> Self {
        VisitError::Api(e)
    }
}

#[tokio::test]
async fn test_pager_visitor_error_propagates_unchanged() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": ["a"], "items_links": [{"href": "/p2", "rel": "next"}]}),
    );

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");

    let err = pager
        .each_page(|page: &ItemsPage| Err(VisitError::Quota(page.items()?.len())))
        .await
        .unwrap_err();

    assert!(matches!(err, VisitError::Quota(1)));
    assert_eq!(pager.state(), PagerState::Failed);
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_pager_empty_intermediate_page_continues() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": [], "items_links": [{"href": "/p2", "rel": "next"}]}),
    );
    fake.push_json(200, &json!({"items": ["late"]}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");
    let items = pager.collect_items(ItemsPage::items).await.unwrap();

    assert_eq!(items, vec!["late"]);
    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_pager_malformed_links_end_iteration() {
    let fake = FakeTransport::new();
    fake.push_json(200, &json!({"items": ["a"], "items_links": {"next": 42}}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");
    let pages = pager.all_pages().await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pager.state(), PagerState::Done);
}

#[tokio::test]
async fn test_pager_self_link_stops() {
    let fake = FakeTransport::new();
    fake.push_json(
        200,
        &json!({"items": ["a"], "items_links": [{"href": format!("{ENDPOINT}/items"), "rel": "next"}]}),
    );

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");
    let pages = pager.all_pages().await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(fake.requests().len(), 1);
}

#[tokio::test]
async fn test_pager_terminal_and_reset() {
    let fake = FakeTransport::new();
    fake.push_json(200, &json!({"items": ["a"]}));
    fake.push_json(200, &json!({"items": ["b"]}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items");
    let first = pager.collect_items(ItemsPage::items).await.unwrap();
    assert_eq!(first, vec!["a"]);

    let err = pager.collect_items(ItemsPage::items).await.unwrap_err();
    assert!(matches!(err, Error::Pagination { .. }));
    assert_eq!(fake.requests().len(), 1);

    pager.reset();
    let second = pager.collect_items(ItemsPage::items).await.unwrap();
    assert_eq!(second, vec!["b"]);
    assert_eq!(fake.requests().len(), 2);
}

#[tokio::test]
async fn test_pager_applies_request_config() {
    let fake = FakeTransport::new();
    fake.push_json(200, &json!({"items": []}));

    let client = client(&fake);
    let mut pager: Pager<'_, ItemsPage> = Pager::new(&client, "items")
        .with_config(crate::http::RequestConfig::new().header("OpenStack-API-Version", "volume 3.59"));
    pager.all_pages().await.unwrap();

    let request = fake.last_request();
    assert_eq!(
        request.headers.get("OpenStack-API-Version"),
        Some(&"volume 3.59".to_string())
    );
}
