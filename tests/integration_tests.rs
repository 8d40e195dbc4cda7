//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → HttpTransport → bindings and
//! pager → typed results

use otcloud::http::{HttpClientConfig, HttpTransport, RequestConfig};
use otcloud::pagination::{GenericPage, Pager, PagerState};
use otcloud::services::{compute, cts, evs, networking};
use otcloud::types::BackoffType;
use otcloud::{CloudConfig, Error, ServiceClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_transport() -> Arc<HttpTransport> {
    let config = HttpClientConfig::builder()
        .no_rate_limit()
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .build();
    Arc::new(HttpTransport::with_config(config).unwrap())
}

fn client_for(server: &MockServer) -> ServiceClient {
    ServiceClient::new(fast_transport(), format!("{}/v3/proj", server.uri()))
}

// ============================================================================
// Config → Client
// ============================================================================

#[tokio::test]
async fn test_client_from_yaml_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/abc123/snapshots/s-1"))
        .and(header("X-Auth-Token", "gAAAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshot": {"id": "s-1", "volume_id": "v-1", "status": "available", "size": 8,
                         "created_at": "2023-05-01T10:00:00.123456"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        r#"
endpoint: "{}/v3/{{project_id}}"
project_id: abc123
auth:
  type: token
  token: gAAAA
http:
  max_retries: 0
  rate_limit: null
"#,
        server.uri()
    );
    let config = CloudConfig::from_yaml(&yaml).unwrap();
    let client = ServiceClient::from_config(&config).unwrap();

    let snap = evs::snapshots::get(&client, "s-1").await.unwrap();
    assert_eq!(snap.size, 8);
    assert!(snap.created_at.is_some());
}

// ============================================================================
// Bindings over HTTP
// ============================================================================

#[tokio::test]
async fn test_start_server_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/proj/servers/srv-1/action"))
        .and(body_json(json!({"os-start": null})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    compute::startstop::start(&client_for(&server), "srv-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_not_found_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"itemNotFound": {"message": "gone"}})),
        )
        .mount(&server)
        .await;

    let err = networking::natgateways::get(&client_for(&server), "g-1")
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("gone"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"security_group_default_rules": []})))
        .mount(&server)
        .await;

    let rules = compute::defsecrules::list(&client_for(&server)).await.unwrap();
    assert!(rules.is_empty());
}

// ============================================================================
// Pagination over HTTP
// ============================================================================

#[tokio::test]
async fn test_snapshot_list_follows_relative_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/snapshots/detail"))
        .and(query_param("marker", "s-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [{"id": "s-3"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/snapshots/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [{"id": "s-1"}, {"id": "s-2"}],
            "snapshots_links": [{"href": "detail?limit=2&marker=s-2", "rel": "next"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = evs::snapshots::ListOpts {
        limit: Some(2),
        ..Default::default()
    };
    let all = evs::snapshots::list(&client_for(&server), &opts).await.unwrap();

    let ids: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
}

#[tokio::test]
async fn test_trace_markers_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/system/trace"))
        .and(query_param("next", "t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "traces": [{"trace_id": "t-2"}],
            "meta_data": {"count": 1}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/system/trace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "traces": [{"trace_id": "t-1"}],
            "meta_data": {"count": 1, "marker": "t-1"}
        })))
        .mount(&server)
        .await;

    let all = cts::traces::list_all(
        &client_for(&server),
        "system",
        &cts::traces::ListTracesOpts::default(),
    )
    .await
    .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[1].trace_id, "t-2");
}

#[tokio::test]
async fn test_generic_pager_stops_on_failed_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/items"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/proj/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": ["a"],
            "links": {"next": "items?page=2"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut pager: Pager<'_, GenericPage> =
        Pager::new(&client, "items").with_config(RequestConfig::new().header("X-Trace", "1"));

    let mut seen = Vec::new();
    let err = pager
        .each_page(|page: &GenericPage| {
            seen.extend(page.items()?);
            Ok::<_, Error>(true)
        })
        .await
        .unwrap_err();

    assert_eq!(seen, vec![json!("a")]);
    assert_eq!(err.status(), Some(403));
    assert_eq!(pager.state(), PagerState::Failed);
}
