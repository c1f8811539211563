//! Integration tests for the portal's order endpoints.
//!
//! These tests require:
//! - The portal running (cargo run -p orderdesk-portal)
//! - Valid fulfillment proxy credentials in environment
//! - `TEST_ORDER_NUMBER` / `TEST_CUSTOMER_EMAIL` pointing at real data
//!
//! Run with: cargo test -p orderdesk-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Base URL for the portal API (configurable via environment).
fn portal_base_url() -> String {
    std::env::var("PORTAL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn test_order_number() -> Option<String> {
    std::env::var("TEST_ORDER_NUMBER").ok()
}

fn test_customer_email() -> Option<String> {
    std::env::var("TEST_CUSTOMER_EMAIL").ok()
}

#[tokio::test]
#[ignore = "Requires running portal"]
async fn test_health() {
    let resp = Client::new()
        .get(format!("{}/health", portal_base_url()))
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal and fulfillment credentials"]
async fn test_track_order_returns_canonical_shape() {
    let Some(order_number) = test_order_number() else {
        return;
    };

    let resp = Client::new()
        .get(format!("{}/api/orders/{order_number}", portal_base_url()))
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    // canonical invariants visible on the wire
    assert!(body.get("created_at").is_some());
    assert!(body.get("items").is_some_and(Value::is_array));
    assert!(body.get("items_summary").is_some_and(Value::is_array));
    assert!(body.get("shipping_information").is_some_and(Value::is_object));
}

#[tokio::test]
#[ignore = "Requires running portal"]
async fn test_track_unknown_order_is_not_found() {
    let resp = Client::new()
        .get(format!(
            "{}/api/orders/R0000000000-missing",
            portal_base_url()
        ))
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running portal and fulfillment credentials"]
async fn test_search_orders_sorted_most_recent_first() {
    let Some(email) = test_customer_email() else {
        return;
    };

    let resp = Client::new()
        .get(format!("{}/api/orders", portal_base_url()))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let orders = body.as_array().expect("search returns an array");

    let created: Vec<&str> = orders
        .iter()
        .filter_map(|o| o.get("created_at").and_then(Value::as_str))
        .collect();
    let mut sorted = created.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(created, sorted, "orders not sorted created_at descending");
}

#[tokio::test]
#[ignore = "Requires running portal"]
async fn test_search_without_filter_is_bad_request() {
    let resp = Client::new()
        .get(format!("{}/api/orders", portal_base_url()))
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running portal"]
async fn test_search_with_malformed_phone_is_bad_request() {
    let resp = Client::new()
        .get(format!("{}/api/orders", portal_base_url()))
        .query(&[("phone", "12345")])
        .send()
        .await
        .expect("Failed to reach portal");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
