//! End-to-end tests for the product API.
//!
//! Each test starts a daemon over a fresh temporary directory on an
//! OS-assigned port and drives it over real HTTP.
//!
//! Run with: `cargo test -p shelfd --test products_api`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use shelfd::{Config, Daemon};
use tempfile::TempDir;

async fn spawn_app() -> (String, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let daemon = Daemon::from_config(Config::test(dir.path()));

    let addr = daemon
        .start_api_server()
        .await
        .expect("Failed to start API server");

    (format!("http://{}", addr), dir)
}

fn apple() -> Value {
    json!({
        "name": "Apple",
        "category": "Fruits",
        "price": 25,
        "inStock": true,
        "quantity": 100,
        "brand": "FarmFresh"
    })
}

async fn create(base_url: &str, body: &Value) -> Value {
    let response = Client::new()
        .post(format!("{}/products", base_url))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn list(base_url: &str, query: &str) -> (StatusCode, Value) {
    let response = Client::new()
        .get(format!("{}/products{}", base_url, query))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_create_on_empty_store() {
    let (base_url, _dir) = spawn_app().await;

    let body = create(&base_url, &apple()).await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Apple");
    assert_eq!(body["category"], "Fruits");
    assert_eq!(body["price"].as_f64(), Some(25.0));
    assert_eq!(body["inStock"], true);
    assert_eq!(body["quantity"], 100);
    assert_eq!(body["brand"], "FarmFresh");
}

#[tokio::test]
async fn test_list_case_insensitive_with_price_min() {
    let (base_url, _dir) = spawn_app().await;
    create(&base_url, &apple()).await;

    let (status, body) = list(&base_url, "?category=fruits&priceMin=10").await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Apple");
}

#[tokio::test]
async fn test_price_min_with_no_results_is_400() {
    let (base_url, _dir) = spawn_app().await;
    create(&base_url, &apple()).await;

    let (status, _) = list(&base_url, "?priceMin=100").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The upper bound is allowed to match nothing
    let (status, body) = list(&base_url, "?priceMax=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_empty_price_max_is_400() {
    let (base_url, _dir) = spawn_app().await;

    let (status, _) = list(&base_url, "?priceMax=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_beyond_end_is_empty() {
    let (base_url, _dir) = spawn_app().await;
    for name in ["Apple", "Banana", "Cherry"] {
        let mut body = apple();
        body["name"] = json!(name);
        create(&base_url, &body).await;
    }

    let (status, body) = list(&base_url, "?page=2&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Cherry");

    let (status, body) = list(&base_url, "?page=5&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_after_create() {
    let (base_url, _dir) = spawn_app().await;
    let created = create(&base_url, &apple()).await;

    let response = Client::new()
        .get(format!("{}/products/{}", base_url, created["id"]))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let (base_url, _dir) = spawn_app().await;
    create(&base_url, &apple()).await;

    let response = Client::new()
        .put(format!("{}/products/1", base_url))
        .json(&json!({
            "name": "Carrot",
            "category": "Vegetables",
            "price": "3",
            "inStock": false,
            "quantity": 0,
            "brand": "Roots"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Carrot");
    assert_eq!(body["category"], "Vegetables");
    assert_eq!(body["price"].as_f64(), Some(3.0));
    assert_eq!(body["inStock"], false);
    assert_eq!(body["quantity"], 0);
    assert_eq!(body["brand"], "Roots");
}

#[tokio::test]
async fn test_update_missing_product_is_404() {
    let (base_url, _dir) = spawn_app().await;

    let response = Client::new()
        .put(format!("{}/products/7", base_url))
        .json(&apple())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_is_404() {
    let (base_url, _dir) = spawn_app().await;

    let response = Client::new()
        .delete(format!("{}/products/999", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reduces_collection() {
    let (base_url, _dir) = spawn_app().await;
    create(&base_url, &apple()).await;
    let second = create(&base_url, &apple()).await;

    let response = Client::new()
        .delete(format!("{}/products/{}", base_url, second["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());

    let (_, body) = list(&base_url, "").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = Client::new()
        .get(format!("{}/products/{}", base_url, second["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_data_file_holds_bare_sequence() {
    let (base_url, dir) = spawn_app().await;
    create(&base_url, &apple()).await;

    let content = std::fs::read_to_string(dir.path().join("products.json")).unwrap();
    let stored: Value = serde_json::from_str(&content).unwrap();

    assert!(stored.is_array());
    assert_eq!(stored[0]["id"], 1);
}

#[tokio::test]
async fn test_requests_are_logged() {
    let (base_url, dir) = spawn_app().await;
    create(&base_url, &apple()).await;
    list(&base_url, "?category=fruits").await;

    let content = std::fs::read_to_string(dir.path().join("requests.log")).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" POST /products"));
    assert!(lines[1].ends_with(" GET /products?category=fruits"));
    // ISO-8601 UTC timestamp first
    let timestamp = lines[0].split(' ').next().unwrap();
    assert!(timestamp.ends_with('Z'));
    assert!(timestamp.contains('T'));
}

#[tokio::test]
async fn test_corrupt_data_file_is_500() {
    let (base_url, dir) = spawn_app().await;
    std::fs::write(dir.path().join("products.json"), "{ broken").unwrap();

    let (status, body) = list(&base_url, "").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}
