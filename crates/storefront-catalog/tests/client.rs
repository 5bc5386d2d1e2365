//! Integration tests for `CatalogClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers status classification, body parsing, the
//! upstream's `200 OK` + `null` quirk for unknown ids, and probe reporting.

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_catalog::{CatalogClient, CatalogError};

const TEST_USER_AGENT: &str = "storefront-test/0.1";

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::new(base_url, 5, TEST_USER_AGENT).expect("failed to build test CatalogClient")
}

/// Product JSON in the upstream wire shape: numeric price, extra `rating`
/// object that the client is expected to ignore.
fn product_json(id: u32, title: &str, price: f64, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": "test description",
        "category": category,
        "image": "https://images.example/product.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    })
}

// ---------------------------------------------------------------------------
// Full product list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_products_parses_live_list_with_exact_prices() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            product_json(1, "Backpack", 109.95, "men's clothing"),
            product_json(2, "T-Shirt", 22.3, "men's clothing"),
        ])))
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_products()
        .await
        .expect("expected live product list");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].price, Decimal::new(109_95, 2));
    assert_eq!(products[1].price, Decimal::new(22_30, 2));
}

#[tokio::test]
async fn fetch_products_sends_the_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_products().await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_products_classifies_server_errors_as_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_products().await;

    assert!(
        matches!(
            result,
            Err(CatalogError::UnexpectedStatus { status: 503, ref url }) if url.contains("/products")
        ),
        "expected UnexpectedStatus 503, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_products_reports_block_pages_as_deserialize_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>Checking your browser</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_products().await;

    assert!(
        matches!(
            result,
            Err(CatalogError::Deserialize { ref context, .. }) if context == "product list"
        ),
        "expected Deserialize error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Single product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_returns_the_requested_product() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&product_json(7, "White Gold Plated Princess", 9.99, "jewelery")),
        )
        .mount(&server)
        .await;

    let product = test_client(&server.uri())
        .fetch_product(7)
        .await
        .expect("expected product 7");

    assert_eq!(product.id, 7);
    assert_eq!(product.price, Decimal::new(9_99, 2));
    assert_eq!(product.category, "jewelery");
}

#[tokio::test]
async fn fetch_product_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_product(999).await;

    assert!(
        matches!(result, Err(CatalogError::NotFound { id: 999 })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_product_null_body_is_a_deserialize_error() {
    // The real upstream answers 200 with a literal `null` body for ids it
    // does not know instead of a 404.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).fetch_product(42).await;

    assert!(
        matches!(
            result,
            Err(CatalogError::Deserialize { ref context, .. }) if context == "product 42"
        ),
        "expected Deserialize error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_categories_parses_label_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            "electronics",
            "jewelery",
            "men's clothing",
            "women's clothing",
        ])))
        .mount(&server)
        .await;

    let categories = test_client(&server.uri())
        .fetch_categories()
        .await
        .expect("expected category list");

    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0], "electronics");
}

#[tokio::test]
async fn fetch_products_in_category_percent_encodes_the_path_segment() {
    let server = MockServer::start().await;

    // The apostrophe stays raw in a path segment; only the space is encoded.
    Mock::given(method("GET"))
        .and(path("/products/category/men's%20clothing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            product_json(1, "Backpack", 109.95, "men's clothing"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .fetch_products_in_category("men's clothing")
        .await
        .expect("expected category products");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, "men's clothing");
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_upstream_surfaces_as_http_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = CatalogClient::new(&server.uri(), 1, TEST_USER_AGENT)
        .expect("failed to build test CatalogClient");
    let result = client.fetch_products().await;

    match result {
        Err(CatalogError::Http(e)) => assert!(e.is_timeout(), "expected timeout, got: {e:?}"),
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_surfaces_as_http_error() {
    // Nothing listens on port 9; the connect attempt fails immediately.
    let client = test_client("http://127.0.0.1:9");
    let result = client.fetch_products().await;

    assert!(
        matches!(result, Err(CatalogError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn probe_reports_a_block_page_without_failing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(403).set_body_raw("Access denied", "text/html"))
        .mount(&server)
        .await;

    let report = test_client(&server.uri())
        .probe()
        .await
        .expect("probe should succeed whenever a response comes back");

    assert!(!report.ok);
    assert_eq!(report.status, 403);
    assert_eq!(report.content_type.as_deref(), Some("text/html"));
    assert_eq!(report.body_length, 13);
    assert_eq!(report.body_preview, "Access denied");
}

#[tokio::test]
async fn probe_reports_a_healthy_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&product_json(1, "Backpack", 109.95, "men's clothing")),
        )
        .mount(&server)
        .await;

    let report = test_client(&server.uri()).probe().await.expect("probe report");

    assert!(report.ok);
    assert_eq!(report.status, 200);
    assert!(report.body_preview.starts_with('{'));
}

#[tokio::test]
async fn probe_truncates_long_bodies_in_the_preview() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(500)))
        .mount(&server)
        .await;

    let report = test_client(&server.uri()).probe().await.expect("probe report");

    assert_eq!(report.body_length, 500);
    assert_eq!(report.body_preview.chars().count(), 200);
}
