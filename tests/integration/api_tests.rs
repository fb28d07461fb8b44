//! API integration tests against a running server and database

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:5000";

/// Helper to get a client holding a session cookie
async fn get_session_client(email: &str) -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    let response = client
        .post(format!("{}/jwt", BASE_URL))
        .json(&json!({ "email": email }))
        .send()
        .await
        .expect("Failed to send token request");
    assert!(response.status().is_success());

    client
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_banner() {
    let client = Client::new();

    let response = client
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read response");
    assert_eq!(body, "Library Management Server is running");
}

#[tokio::test]
#[ignore]
async fn test_readiness() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_issue_token_sets_cookie() {
    let client = Client::new();

    let response = client
        .post(format!("{}/jwt", BASE_URL))
        .json(&json!({ "email": "integration@test.local" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("No session cookie")
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_session() {
    let client = Client::new();

    let response = client
        .post(format!("{}/all-books", BASE_URL))
        .json(&json!({ "book_name": "Unauthorized" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_fetch_book() {
    let client = get_session_client("integration@test.local").await;

    let response = client
        .post(format!("{}/all-books", BASE_URL))
        .json(&json!({
            "book_name": "Integration Test Book",
            "author_name": "Test Author",
            "category": "integration-tests",
            "book_quantity": 2,
            "rating": 3.5,
            "description": "Created by the integration suite",
            "photo": "http://example.com/cover.jpg",
            "shelf": "A1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["acknowledged"], true);
    let id = body["insertedId"].as_str().expect("No inserted id").to_string();

    let response = client
        .put(format!("{}/all-books/{}", BASE_URL, id))
        .json(&json!({
            "book_name": "Integration Test Book (2nd ed.)",
            "author_name": "Test Author",
            "category": "integration-tests",
            "book_quantity": 1,
            "rating": 4.0,
            "description": "Updated by the integration suite",
            "photo": "http://example.com/cover.jpg"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["matchedCount"], 1);

    let response = client
        .get(format!("{}/all-books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["book_name"], "Integration Test Book (2nd ed.)");
    assert!(book.get("shelf").is_none());

    let response = client
        .get(format!("{}/all-books/category/integration-tests", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let books: Value = response.json().await.expect("Failed to parse response");
    assert!(books
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|b| b["_id"] == id.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_get_book_invalid_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/all-books/not-an-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_list_categories() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books-category", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_book() {
    let email = "borrower@test.local";
    let client = get_session_client(email).await;

    let response = client
        .post(format!("{}/borrowed-books", BASE_URL))
        .json(&json!({
            "user_email": email,
            "book_name": "Integration Test Book",
            "return_date": "2026-12-31"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["insertedId"].as_str().expect("No inserted id").to_string();

    let response = client
        .get(format!("{}/borrowed-books/email/{}", BASE_URL, email))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let records: Value = response.json().await.expect("Failed to parse response");
    assert!(records
        .as_array()
        .expect("Expected an array")
        .iter()
        .any(|r| r["_id"] == id.as_str()));

    let response = client
        .delete(format!("{}/borrowed-books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["deletedCount"], 1);
}

#[tokio::test]
#[ignore]
async fn test_logout_clears_session() {
    let client = get_session_client("integration@test.local").await;

    let response = client
        .post(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/borrowed-books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
