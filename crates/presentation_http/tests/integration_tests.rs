//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use application::{
    MAX_RESULTS, MISSING_SETTINGS_MESSAGE,
    error::ApplicationError,
    ports::{CandidateFetch, ItemSearchPort, SettingsStore},
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{SearchKeyword, SearchResultItem, SettingsRecord};
use infrastructure::ServerConfig;
use presentation_http::{create_app, state::AppState};
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// In-memory settings store
#[derive(Default)]
struct MemorySettingsStore {
    record: RwLock<Option<SettingsRecord>>,
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn save(&self, record: &SettingsRecord) -> Result<(), ApplicationError> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<SettingsRecord>, ApplicationError> {
        Ok(self.record.read().await.clone())
    }
}

/// Store whose every operation fails
struct BrokenSettingsStore;

#[async_trait]
impl SettingsStore for BrokenSettingsStore {
    async fn save(&self, _record: &SettingsRecord) -> Result<(), ApplicationError> {
        Err(ApplicationError::Storage("disk I/O error".to_string()))
    }

    async fn load(&self) -> Result<Option<SettingsRecord>, ApplicationError> {
        Err(ApplicationError::Storage("disk I/O error".to_string()))
    }
}

/// Upstream returning a fixed outcome and counting calls
struct StubItemSearch {
    outcome: CandidateFetch,
    calls: AtomicUsize,
}

impl StubItemSearch {
    fn new(outcome: CandidateFetch) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSearchPort for StubItemSearch {
    async fn fetch_candidates(
        &self,
        _keyword: &SearchKeyword,
        _application_id: &str,
    ) -> CandidateFetch {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

/// Twenty candidates priced 1000..=1950 in descending order, half with a query string
fn twenty_candidates() -> Vec<SearchResultItem> {
    (0..20u64)
        .rev()
        .map(|i| {
            let url = if i % 2 == 0 {
                format!("https://item.rakuten.co.jp/shop/tea-{i}/")
            } else {
                format!("https://item.rakuten.co.jp/shop/tea-{i}/?variant=large")
            };
            SearchResultItem::new(format!("Green tea {i}"), 1000 + i * 50, url)
        })
        .collect()
}

fn server_with(store: Arc<dyn SettingsStore>, items: Arc<dyn ItemSearchPort>) -> TestServer {
    let state = AppState::new(store, items);
    let app = create_app(state, &ServerConfig::default());
    TestServer::new(app).expect("Failed to create test server")
}

fn create_test_server() -> TestServer {
    server_with(
        Arc::new(MemorySettingsStore::default()),
        StubItemSearch::new(CandidateFetch::Items(twenty_candidates())),
    )
}

async fn configured_server(outcome: CandidateFetch) -> (TestServer, Arc<StubItemSearch>) {
    let store = Arc::new(MemorySettingsStore::default());
    store
        .save(&SettingsRecord::new("A1", "B1", None).expect("valid settings"))
        .await
        .expect("save settings");
    let items = StubItemSearch::new(outcome);
    (server_with(store, items.clone()), items)
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn root_returns_status_text() {
    let server = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Rakuten API backend service is running");
}

#[tokio::test]
async fn health_returns_ok() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn ready_reports_unconfigured_store() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["ready"], true);
    assert_eq!(json["store"]["healthy"], true);
    assert_eq!(json["store"]["configured"], false);
}

#[tokio::test]
async fn ready_reports_configured_store() {
    let (server, _) = configured_server(CandidateFetch::Items(vec![])).await;

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["store"]["configured"], true);
}

#[tokio::test]
async fn ready_returns_503_when_store_fails() {
    let server = server_with(
        Arc::new(BrokenSettingsStore),
        StubItemSearch::new(CandidateFetch::Items(vec![])),
    );

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["ready"], false);
    assert_eq!(json["store"]["healthy"], false);
}

// ============ Settings Endpoint Tests ============

#[tokio::test]
async fn get_settings_returns_empty_object_when_unset() {
    let server = create_test_server();

    let response = server.get("/api/settings").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({}));
}

#[tokio::test]
async fn save_then_get_settings() {
    let server = create_test_server();

    let response = server
        .post("/api/settings")
        .json(&json!({"applicationId": "A1", "affiliateTag": "B1"}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({"success": true}));

    let response = server.get("/api/settings").await;
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({"applicationId": "A1", "affiliateTag": "B1", "applicationSecret": ""})
    );
}

#[tokio::test]
async fn save_settings_stores_values_verbatim() {
    let server = create_test_server();

    server
        .post("/api/settings")
        .json(&json!({"applicationId": " A1 ", "affiliateTag": "B1\t"}))
        .await
        .assert_status_ok();

    let json: Value = server.get("/api/settings").await.json();
    assert_eq!(json["applicationId"], " A1 ");
    assert_eq!(json["affiliateTag"], "B1\t");
}

#[tokio::test]
async fn save_settings_replaces_previous_record() {
    let server = create_test_server();

    server
        .post("/api/settings")
        .json(&json!({"applicationId": "A1", "affiliateTag": "B1", "applicationSecret": "S1"}))
        .await
        .assert_status_ok();
    server
        .post("/api/settings")
        .json(&json!({"applicationId": "A2", "affiliateTag": "B2"}))
        .await
        .assert_status_ok();

    let json: Value = server.get("/api/settings").await.json();
    assert_eq!(json["applicationId"], "A2");
    assert_eq!(json["affiliateTag"], "B2");
    assert_eq!(json["applicationSecret"], "");
}

#[tokio::test]
async fn save_settings_missing_field_returns_400() {
    let server = create_test_server();

    let response = server
        .post("/api/settings")
        .json(&json!({"applicationId": "A1"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "validation_error");
    assert!(
        json["error"]
            .as_str()
            .expect("error message")
            .contains("affiliateTag is required")
    );

    // Nothing was stored
    let json: Value = server.get("/api/settings").await.json();
    assert_eq!(json, json!({}));
}

#[tokio::test]
async fn save_settings_blank_field_returns_400() {
    let server = create_test_server();

    let response = server
        .post("/api/settings")
        .json(&json!({"applicationId": "   ", "affiliateTag": "B1"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_settings_malformed_json_returns_400() {
    let server = create_test_server();

    let response = server
        .post("/api/settings")
        .content_type("application/json")
        .bytes("{\"applicationId\": ".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "validation_error");
}

#[tokio::test]
async fn save_settings_store_failure_returns_500() {
    let server = server_with(
        Arc::new(BrokenSettingsStore),
        StubItemSearch::new(CandidateFetch::Items(vec![])),
    );

    let response = server
        .post("/api/settings")
        .json(&json!({"applicationId": "A1", "affiliateTag": "B1"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "internal_error");
}

// ============ Search Endpoint Tests ============

#[tokio::test]
async fn search_without_keyword_returns_400() {
    let (server, items) = configured_server(CandidateFetch::Items(vec![])).await;

    let response = server.post("/api/search").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(
        json["error"]
            .as_str()
            .expect("error message")
            .contains("keyword is required")
    );
    assert_eq!(items.calls(), 0);
}

#[tokio::test]
async fn search_with_blank_keyword_returns_400() {
    let (server, items) = configured_server(CandidateFetch::Items(vec![])).await;

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "  "}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(items.calls(), 0);
}

#[tokio::test]
async fn search_without_settings_returns_500() {
    let items = StubItemSearch::new(CandidateFetch::Items(twenty_candidates()));
    let server = server_with(Arc::new(MemorySettingsStore::default()), items.clone());

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "green tea"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "missing_configuration");
    assert_eq!(json["error"], MISSING_SETTINGS_MESSAGE);
    assert_eq!(items.calls(), 0);
}

#[tokio::test]
async fn search_returns_cheapest_items_with_affiliate_tag() {
    let (server, items) = configured_server(CandidateFetch::Items(twenty_candidates())).await;

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "green tea"}))
        .await;

    response.assert_status_ok();
    assert_eq!(items.calls(), 1);

    let json: Value = response.json();
    let results = json["items"].as_array().expect("items array");
    assert_eq!(results.len(), MAX_RESULTS);

    let prices: Vec<u64> = results
        .iter()
        .map(|item| item["price"].as_u64().expect("numeric price"))
        .collect();
    let expected: Vec<u64> = (0..10).map(|i| 1000 + i * 50).collect();
    assert_eq!(prices, expected);

    for item in results {
        let url = item["url"].as_str().expect("url");
        assert!(
            url.ends_with("/?af=B1") || url.ends_with("variant=large&af=B1"),
            "unexpected url: {url}"
        );
        assert!(item["name"].as_str().expect("name").starts_with("Green tea"));
    }
}

#[tokio::test]
async fn search_with_no_candidates_returns_empty_list() {
    let (server, _) = configured_server(CandidateFetch::Items(vec![])).await;

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "nothing matches"}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({"items": []}));
}

#[tokio::test]
async fn search_rejected_parameters_returns_400() {
    let (server, _) = configured_server(CandidateFetch::InvalidParameter).await;

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "green tea"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["code"], "bad_request");
}

#[tokio::test]
async fn search_upstream_failure_returns_500() {
    let (server, _) =
        configured_server(CandidateFetch::Failed("too_many_requests".to_string())).await;

    let response = server
        .post("/api/search")
        .json(&json!({"keyword": "green tea"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["code"], "upstream_error");
}

#[tokio::test]
async fn search_malformed_json_returns_400() {
    let (server, items) = configured_server(CandidateFetch::Items(vec![])).await;

    let response = server
        .post("/api/search")
        .content_type("application/json")
        .bytes("not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(items.calls(), 0);
}

// ============ Middleware Tests ============

#[tokio::test]
async fn response_carries_generated_request_id() {
    let server = create_test_server();

    let response = server.get("/health").await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .expect("ascii header");
    assert!(uuid::Uuid::parse_str(header).is_ok());
}

#[tokio::test]
async fn response_echoes_incoming_request_id() {
    let server = create_test_server();
    let id = "0192d5f0-3c1a-7b2e-9f00-1234567890ab";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header");
    assert_eq!(header, id);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let server = create_test_server();

    let response = server.get("/api/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ============ OpenAPI Tests ============

#[tokio::test]
async fn openapi_document_is_served() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json["paths"]["/api/search"].is_object());
    assert!(json["paths"]["/api/settings"].is_object());
}
