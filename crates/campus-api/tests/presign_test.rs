//! Presigned upload API integration tests.
//!
//! Run with: `cargo test -p campus-api --test presign_test`

mod helpers;

use helpers::auth::{expired_token, foreign_token, session_cookie, valid_token};
use helpers::storage::{FailingStorage, FakeStorage, FAKE_STORAGE_BASE};
use helpers::{build_server, setup_test_app, test_config, test_config_with};
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_presign_requires_session() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .json(&json!({ "field": "photo", "filename": "me.png" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(body["error"], "Missing session");
}

#[tokio::test]
async fn test_presign_with_session_cookie() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .json(&json!({ "field": "photo", "filename": "Me.PNG" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let key = body["key"].as_str().unwrap();
    let url = body["url"].as_str().unwrap();

    assert!(key.starts_with("uploads/photo/"));
    assert!(key.ends_with(".png"));
    assert!(url.starts_with(&format!("{}/{}", FAKE_STORAGE_BASE, key)));
    assert!(url.contains("X-Amz-Method=PUT"));
    assert!(url.contains("X-Amz-Expires=900"));
    // Content type derived from the filename
    assert!(url.contains("ct=image/png"));
}

#[tokio::test]
async fn test_presign_with_bearer_token_and_explicit_content_type() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Authorization", format!("Bearer {}", valid_token()))
        .json(&json!({
            "field": "signature",
            "filename": "sig",
            "contentType": "image/webp"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["key"].as_str().unwrap().ends_with(".bin"));
    assert!(body["url"].as_str().unwrap().contains("ct=image/webp"));
}

#[tokio::test]
async fn test_each_presign_gets_a_fresh_key() {
    let client = setup_test_app();
    let cookie = session_cookie(&valid_token());

    let first: Value = client
        .post("/upload/presign")
        .add_header("Cookie", cookie.clone())
        .json(&json!({ "field": "photo", "filename": "me.png" }))
        .await
        .json();
    let second: Value = client
        .post("/upload/presign")
        .add_header("Cookie", cookie)
        .json(&json!({ "field": "photo", "filename": "me.png" }))
        .await
        .json();

    assert_ne!(first["key"], second["key"]);
}

#[tokio::test]
async fn test_invalid_intent_lists_every_violation() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .json(&json!({ "field": "", "filename": "../etc/passwd", "contentType": "nonsense" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"field"));
    assert!(fields.contains(&"filename"));
    assert!(fields.contains(&"contentType"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .add_header("Content-Type", "application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_error_details_shown_outside_production() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .json(&json!({ "field": "", "filename": "me.png" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error_type"], "Validation");
    assert!(body["details"].as_str().unwrap().contains("field is required"));
    assert_eq!(body["violations"][0]["field"], "field");
}

#[tokio::test]
async fn test_error_details_hidden_in_production() {
    let config = test_config_with(
        None,
        &[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://admin.example.edu"),
        ],
    );
    let client = build_server(&config, Arc::new(FakeStorage));

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .json(&json!({ "field": "", "filename": "me.png" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
    // Violations are part of the contract, not a detail
    assert_eq!(body["violations"][0]["field"], "field");
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let client = setup_test_app();

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&expired_token()))
        .json(&json!({ "field": "photo", "filename": "me.png" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "Session has expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let client = setup_test_app();

    let response = client
        .get("/upload/presign-get")
        .add_query_param("key", "uploads/photo/abc.png")
        .add_header("Cookie", session_cookie(&foreign_token()))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_presign_get_returns_read_url() {
    let client = setup_test_app();

    let response = client
        .get("/upload/presign-get")
        .add_query_param("key", "uploads/photo/abc.png")
        .add_header("Cookie", session_cookie(&valid_token()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["url"],
        format!(
            "{}/uploads/photo/abc.png?X-Amz-Method=GET&X-Amz-Expires=3600",
            FAKE_STORAGE_BASE
        )
    );
}

#[tokio::test]
async fn test_presign_get_rejects_bad_keys() {
    let client = setup_test_app();
    let cookie = session_cookie(&valid_token());

    for key in ["", "/abs/key", "uploads/../secret", "https://cdn.example.com/a.png"] {
        let response = client
            .get("/upload/presign-get")
            .add_query_param("key", key)
            .add_header("Cookie", cookie.clone())
            .await;

        assert_eq!(response.status_code(), 400, "key {:?}", key);
        let body: Value = response.json();
        assert_eq!(body["violations"][0]["field"], "key");
    }
}

#[tokio::test]
async fn test_storage_failure_is_bad_gateway() {
    let client = build_server(&test_config(None), Arc::new(FailingStorage));

    let response = client
        .post("/upload/presign")
        .add_header("Cookie", session_cookie(&valid_token()))
        .json(&json!({ "field": "photo", "filename": "me.png" }))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(body["recoverable"], true);
    // Storage errors are sensitive: no internal detail leaks
    assert!(body.get("details").is_none());
}
