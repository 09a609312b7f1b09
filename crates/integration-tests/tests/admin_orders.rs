//! Integration tests for admin order management.
//!
//! These tests require:
//! - The admin server running (cargo run -p dala-admin)
//! - A reachable Supabase project
//!
//! Run with: cargo test -p dala-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use dala_integration_tests::admin_base_url;

/// Test helper: create an order through the admin form endpoint.
async fn create_test_order(client: &Client, name: &str) -> Value {
    let base_url = admin_base_url();
    let resp = client
        .post(format!("{base_url}/api/orders"))
        .json(&json!({
            "customer_name": name,
            "phone": "77012345678",
            "total": 12000,
            "status": "pending",
        }))
        .send()
        .await
        .expect("Failed to create test order");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("order body")
}

/// Test helper: delete a test order.
async fn delete_test_order(client: &Client, id: &str) {
    let base_url = admin_base_url();
    let _ = client
        .delete(format!("{base_url}/api/orders/{id}"))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running admin server and Supabase credentials"]
async fn test_order_create_then_status_update() {
    let client = Client::new();
    let base_url = admin_base_url();

    let name = format!("it-{}", Uuid::new_v4());
    let created = create_test_order(&client, &name).await;
    let id = created["data"]["id"].as_str().expect("order id").to_owned();

    let resp = client
        .put(format!("{base_url}/api/orders/{id}/status"))
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to update status");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("order body");
    assert_eq!(body["data"]["status"], "confirmed");

    delete_test_order(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and Supabase credentials"]
async fn test_order_status_update_rejects_unknown_status() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .put(format!("{base_url}/api/orders/any-id/status"))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to send status update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert!(body["details"]["status"].is_string());
}

#[tokio::test]
#[ignore = "Requires running admin server and Supabase credentials"]
async fn test_order_list_search_by_name() {
    let client = Client::new();
    let base_url = admin_base_url();

    let name = format!("it-{}", Uuid::new_v4());
    let created = create_test_order(&client, &name).await;
    let id = created["data"]["id"].as_str().expect("order id").to_owned();

    let resp = client
        .get(format!("{base_url}/api/orders"))
        .query(&[("q", name.as_str())])
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("list body");
    let items = body["data"]["items"].as_array().expect("items array");
    assert!(items.iter().any(|o| o["id"] == id.as_str()));

    delete_test_order(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and Supabase credentials"]
async fn test_stats_shape() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/api/stats"))
        .query(&[("period", "month")])
        .send()
        .await
        .expect("Failed to fetch stats");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("stats body");
    assert!(body["data"]["summary"]["total_orders"].is_number());
    assert!(body["data"]["chart"].is_array());
}
