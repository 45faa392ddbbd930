//! In-process tests of the storefront JSON API.
//!
//! The router runs against the built-in static catalog (12 local products),
//! a three-product stub remote feed and a manual clock, so no network access
//! is needed.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use velour_integration_tests::{TestApp, ids};

// =============================================================================
// Health & Routing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::default();
    let (status, _, body) = app.get_raw("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found: /api/nope"}));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::default();
    let (_, headers, _) = app.get_raw("/api/categories").await;

    assert!(headers.contains_key("x-request-id"));
}

// =============================================================================
// Listing & Filtering
// =============================================================================

#[tokio::test]
async fn test_list_local_first_then_remote() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/products").await;

    assert_eq!(status, StatusCode::OK);
    let ids = ids(&body);
    assert_eq!(ids.len(), 15);
    assert_eq!(ids.first().unwrap(), "1");
    assert_eq!(ids[12..], ["external-1", "external-2", "external-3"]);
}

#[tokio::test]
async fn test_empty_params_are_ignored() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/products?category=&color=&minPrice=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 15);
}

#[tokio::test]
async fn test_category_all_returns_everything() {
    let app = TestApp::default();
    let (_, body) = app.get("/api/products?category=all").await;
    assert_eq!(ids(&body).len(), 15);
}

#[tokio::test]
async fn test_category_and_price_cap() {
    let app = TestApp::default();
    let (_, body) = app.get("/api/products?category=men&maxPrice=6000").await;
    assert_eq!(ids(&body), ["3", "7", "11", "12"]);
}

#[tokio::test]
async fn test_price_cap_uses_sale_price() {
    let app = TestApp::default();

    // Denim jacket lists at 8500 but sells at 6800
    let (_, body) = app.get("/api/products?category=men&maxPrice=6799").await;
    assert!(!ids(&body).contains(&"1".to_string()));

    let (_, body) = app.get("/api/products?category=men&maxPrice=6800").await;
    assert!(ids(&body).contains(&"1".to_string()));
}

#[tokio::test]
async fn test_sub_category_also_matches_main_category() {
    let app = TestApp::default();

    let (_, body) = app.get("/api/products?subCategory=jackets").await;
    assert_eq!(ids(&body), ["1", "5"]);

    let (_, body) = app.get("/api/products?subCategory=accessories").await;
    assert_eq!(ids(&body), ["4", "9", "12", "external-1"]);
}

#[tokio::test]
async fn test_search_name_and_description() {
    let app = TestApp::default();

    let (_, body) = app.get("/api/products?search=LINEN").await;
    assert_eq!(ids(&body), ["2"]);

    let (_, body) = app.get("/api/products?search=remote%20feed").await;
    assert_eq!(ids(&body), ["external-1", "external-2", "external-3"]);
}

#[tokio::test]
async fn test_color_and_size_matching() {
    let app = TestApp::default();

    let (_, body) = app.get("/api/products?color=NAVY").await;
    assert_eq!(ids(&body), ["7"]);

    let (_, body) = app.get("/api/products?size=38").await;
    assert_eq!(ids(&body), ["11"]);

    let (_, body) = app.get("/api/products?size=xl").await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_new_arrivals() {
    let app = TestApp::default();
    let (_, body) = app.get("/api/products?isNew=true").await;
    assert_eq!(ids(&body), ["1", "2", "6", "9", "11", "external-1"]);
}

#[tokio::test]
async fn test_sort_by_price() {
    let app = TestApp::default();

    let (_, body) = app.get("/api/products?sort=price-high").await;
    assert_eq!(ids(&body)[..3], ["external-1", "5", "external-3"]);

    let (_, body) = app.get("/api/products?sort=price-low").await;
    assert_eq!(ids(&body)[..2], ["12", "9"]);
}

#[tokio::test]
async fn test_repeated_param_takes_first_value() {
    let app = TestApp::default();

    let (status, headers, _) = app.get_raw("/api/products?size=M&size=L").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");

    let (_, body) = app.get("/api/products?size=38&size=XS").await;
    assert_eq!(ids(&body), ["11"]);

    let (status, _) = app.get("/api/products?maxPrice=5000&maxPrice=lots").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_params_are_400() {
    let app = TestApp::default();

    let (status, body) = app.get("/api/products?minPrice=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Invalid minPrice: expected an integer, got `abc`"})
    );

    let (status, _) = app.get("/api/products?sort=popular").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/products?isNew=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn test_show_local_product() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/products/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Classic Denim Jacket");
    assert_eq!(body["salePrice"], 6800);

    let (_, body) = app.get("/api/products/2").await;
    assert!(body.get("salePrice").is_none());
}

#[tokio::test]
async fn test_show_unknown_local_product() {
    let app = TestApp::default();

    for uri in ["/api/products/999", "/api/products/abc"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Product not found"}));
    }
    assert_eq!(app.remote.lookups(), 0);
}

#[tokio::test]
async fn test_show_external_product_calls_remote_every_time() {
    let app = TestApp::default();

    let (status, body) = app.get("/api/products/external-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "external-2");
    assert_eq!(body["name"], "Remote Shirt");

    app.get("/api/products/external-2").await;
    assert_eq!(app.remote.lookups(), 2);
    assert_eq!(app.remote.bulk_calls(), 0);
}

#[tokio::test]
async fn test_show_missing_external_product() {
    let app = TestApp::default();

    let (status, body) = app.get("/api/products/external-99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "External product not found"}));

    let (status, body) = app.get("/api/products/external-abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "External product not found"}));
    assert_eq!(app.remote.lookups(), 1);
}

#[tokio::test]
async fn test_show_external_product_while_remote_down() {
    let app = TestApp::default();
    app.remote.set_failing(true);

    let (status, body) = app.get("/api/products/external-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "External product not found"}));
}

#[tokio::test]
async fn test_related_products() {
    let app = TestApp::default();

    let (status, body) = app.get("/api/products/1/related").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), ["3", "5", "7", "11"]);

    let (_, body) = app.get("/api/products/9/related").await;
    assert_eq!(ids(&body), ["4", "12", "external-1"]);

    let (_, body) = app.get("/api/products/external-3/related").await;
    assert_eq!(ids(&body), ["2", "4", "6", "8"]);

    let (status, _) = app.get("/api/products/999/related").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Remote Catalog Cache
// =============================================================================

#[tokio::test]
async fn test_listing_is_cached_for_an_hour() {
    let app = TestApp::default();

    app.get("/api/products").await;
    app.get("/api/products?category=men").await;
    assert_eq!(app.remote.bulk_calls(), 1);

    app.clock.advance(Duration::from_secs(59 * 60));
    app.get("/api/products").await;
    assert_eq!(app.remote.bulk_calls(), 1);

    app.clock.advance(Duration::from_secs(60));
    app.get("/api/products").await;
    assert_eq!(app.remote.bulk_calls(), 2);
}

#[tokio::test]
async fn test_remote_down_without_snapshot_serves_local_only() {
    let app = TestApp::default();
    app.remote.set_failing(true);

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 12);

    // No snapshot and no timestamp change: the next request retries
    app.remote.set_failing(false);
    let (_, body) = app.get("/api/products").await;
    assert_eq!(ids(&body).len(), 15);
    assert_eq!(app.remote.bulk_calls(), 2);
}

#[tokio::test]
async fn test_remote_down_serves_stale_snapshot() {
    let app = TestApp::default();
    app.get("/api/products").await;

    app.remote.set_failing(true);
    app.clock.advance(Duration::from_secs(2 * 60 * 60));

    let (status, body) = app.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body).len(), 15);
    assert_eq!(app.remote.bulk_calls(), 2);
}

// =============================================================================
// Catalog Enumerations
// =============================================================================

#[tokio::test]
async fn test_categories() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/categories").await;

    assert_eq!(status, StatusCode::OK);
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, ["women", "men", "accessories"]);
    assert!(body[0]["subCategories"].is_array());
}

#[tokio::test]
async fn test_filter_options() {
    let app = TestApp::default();
    let (status, body) = app.get("/api/filters").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sizes"], json!(["XS", "S", "M", "L", "XL"]));
    assert_eq!(body["colors"].as_array().unwrap().len(), 10);
    assert_eq!(app.remote.bulk_calls(), 0);
}
