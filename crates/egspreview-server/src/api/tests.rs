use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use egspreview_store::{EgsCatalog, GraphqlClient, ProductDetail, RelayClient, StoreError};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

/// In-memory catalog: slug -> product id, product id -> detail JSON.
#[derive(Default)]
struct FakeCatalog {
    mappings: HashMap<(String, String), String>,
    details: HashMap<String, serde_json::Value>,
    fail_lookup: bool,
}

impl FakeCatalog {
    fn with_product(mut self, locale: &str, slug: &str, id: &str, detail: serde_json::Value) -> Self {
        self.mappings
            .insert((locale.to_string(), slug.to_string()), id.to_string());
        self.details.insert(id.to_string(), detail);
        self
    }
}

impl ProductCatalog for FakeCatalog {
    async fn resolve_slug(&self, locale: &str, slug: &str) -> Result<Option<String>, StoreError> {
        if self.fail_lookup {
            return Err(StoreError::UnexpectedStatus {
                status: 502,
                url: "https://www.epicgames.com/graphql".to_string(),
            });
        }
        Ok(self
            .mappings
            .get(&(locale.to_string(), slug.to_string()))
            .cloned())
    }

    async fn fetch_product_detail(
        &self,
        product_id: &str,
        _locale: &str,
    ) -> Result<ProductDetail, StoreError> {
        let value = self
            .details
            .get(product_id)
            .cloned()
            .ok_or_else(|| StoreError::Relay(format!("no detail for {product_id}")))?;
        serde_json::from_value(value).map_err(|e| StoreError::Deserialize {
            context: format!("fake detail {product_id}"),
            source: e,
        })
    }

    fn session_name(&self) -> Option<&str> {
        Some("egs")
    }
}

fn app_with(catalog: FakeCatalog) -> Router {
    build_app(AppState::new(Arc::new(catalog)))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn bar_game() -> serde_json::Value {
    json!({
        "title": "Bar Game",
        "shortDescription": "desc",
        "media": { "card16x9": { "imageSrc": "http://img/a.png" } }
    })
}

#[tokio::test]
async fn unmapped_slug_returns_404_placeholder() {
    let response = get(app_with(FakeCatalog::default()), "/en-US/p/foo").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "content-type: {content_type}");

    let body = body_text(response).await;
    assert!(body.contains(r#"<meta property="og:title" content=""/>"#));
    assert!(body.contains(r##"<meta name="theme-color" content="#000000"/>"##));
    assert!(body.contains(
        r#"<meta property="og:url" content="https://store.epicgames.com/en-US/p/foo"/>"#
    ));
}

#[tokio::test]
async fn mapped_slug_renders_product_preview() {
    let catalog = FakeCatalog::default().with_product("de", "bar", "123", bar_game());
    let response = get(app_with(catalog), "/de/p/bar").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"<meta property="og:title" content="Bar Game"/>"#));
    assert!(body.contains(r#"<meta property="og:description" content="desc"/>"#));
    assert!(body.contains(r#"<meta property="og:image" content="http://img/a.png"/>"#));
    assert!(body.contains(r#"<meta property="og:locale" content="de"/>"#));
    assert!(body.contains(r##"<meta name="theme-color" content="#000000"/>"##));
    assert!(body.contains(
        r#"<meta property="og:url" content="https://store.epicgames.com/de/p/bar"/>"#
    ));
}

#[tokio::test]
async fn accent_color_and_logo_fallback_flow_through() {
    let catalog = FakeCatalog::default().with_product(
        "en-US",
        "baz",
        "456",
        json!({
            "title": "Baz",
            "shortDescription": "d",
            "media": { "logo": { "imageSrc": "http://img/logo.png" } },
            "branding": { "light": { "accentColor": "#abcdef" } }
        }),
    );
    let response = get(app_with(catalog), "/en-US/p/baz").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"<meta property="og:image" content="http://img/logo.png"/>"#));
    assert!(body.contains(r##"<meta name="theme-color" content="#abcdef"/>"##));
}

#[tokio::test]
async fn product_without_images_is_internal_error() {
    let catalog = FakeCatalog::default().with_product(
        "en-US",
        "bare",
        "789",
        json!({ "title": "Bare", "shortDescription": "d", "media": {} }),
    );
    let response = get(app_with(catalog), "/en-US/p/bare").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(!body.contains("789"), "error detail leaked: {body}");
}

#[tokio::test]
async fn upstream_failure_is_internal_error() {
    let catalog = FakeCatalog {
        fail_lookup: true,
        ..FakeCatalog::default()
    };
    let response = get(app_with(catalog), "/en-US/p/foo").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal Server Error");
}

#[tokio::test]
async fn preview_response_carries_request_id() {
    let response = app_with(FakeCatalog::default())
        .oneshot(
            Request::builder()
                .uri("/en-US/p/foo")
                .header("x-request-id", "req-7")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-7");
}

#[tokio::test]
async fn health_reports_relay_session() {
    let response = get(app_with(FakeCatalog::default()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json body");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["relay_session"], "egs");
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = get(app_with(FakeCatalog::default()), "/en-US/bar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// End to end against mocked GraphQL and relay endpoints
// ---------------------------------------------------------------------------

fn wiremock_app(server: &MockServer) -> Router {
    let client = reqwest::Client::new();
    let graphql =
        GraphqlClient::new(client.clone(), &format!("{}/graphql", server.uri())).expect("graphql");
    let relay = RelayClient::new(client, &format!("{}/v1", server.uri()), "egs").expect("relay");
    let catalog = EgsCatalog::new(
        graphql,
        relay,
        "https://egs-platform-service.store.epicgames.com/api/v1/egs/products",
        "DE",
    )
    .expect("catalog");
    build_app(AppState::new(Arc::new(catalog)))
}

#[tokio::test]
async fn end_to_end_unmapped_slug() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("variables", r#"{"pageSlug":"foo","locale":"en-US"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "StorePageMapping": { "mapping": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = get(wiremock_app(&server), "/en-US/p/foo").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains(r#"<meta property="og:title" content=""/>"#));
}

#[tokio::test]
async fn end_to_end_mapped_slug() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .and(query_param("variables", r#"{"pageSlug":"bar","locale":"de"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "StorePageMapping": { "mapping": { "productId": "123" } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = format!(
        "<html><body><pre>{}</pre></body></html>",
        bar_game().to_string().replace('"', "&quot;")
    );
    Mock::given(method("POST"))
        .and(path("/v1"))
        .and(body_partial_json(json!({
            "cmd": "request.get",
            "session": "egs",
            "url": "https://egs-platform-service.store.epicgames.com/api/v1/egs/products/123?country=DE&locale=de&store=EGS"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "",
            "solution": { "status": 200, "response": page }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(wiremock_app(&server), "/de/p/bar").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"<meta property="og:title" content="Bar Game"/>"#));
    assert!(body.contains(r##"<meta name="theme-color" content="#000000"/>"##));
    assert!(body.contains(r#"<meta property="og:image" content="http://img/a.png"/>"#));
}

#[tokio::test]
async fn end_to_end_mapping_without_product_id_is_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "StorePageMapping": { "mapping": { "pageId": "abc" } } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = get(wiremock_app(&server), "/en-US/p/foo").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn end_to_end_health_reads_session_from_relay() {
    let server = MockServer::start().await;

    let response = get(wiremock_app(&server), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("json body");
    assert_eq!(json["data"]["relay_session"], "egs");
}

#[tokio::test]
async fn end_to_end_relay_error_is_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "StorePageMapping": { "mapping": { "productId": "123" } } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "message": "Error solving the challenge. Timeout after 60.0 seconds."
        })))
        .mount(&server)
        .await;

    let response = get(wiremock_app(&server), "/de/p/bar").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
