//! Account registration and login

use axum::http::StatusCode;
use serde_json::json;
use tests::{http::post_json, test_server};

#[tokio::test]
async fn register_returns_user_and_token() {
    let server = test_server();
    let (status, body) = post_json(
        server.build_router(),
        "/auth/register",
        &json!({"email": "dev@example.com", "password": "hunter22"}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "dev@example.com");
    assert!(body["user"]["id"].is_string());
    assert!(body["token"].is_string());
    // The digest never leaves the store.
    assert!(body["user"].get("password_digest").is_none());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let server = test_server();
    let router = server.build_router();
    let creds = json!({"email": "dup@example.com", "password": "hunter22"});

    let (status, _) = post_json(router.clone(), "/auth/register", &creds, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(router, "/auth/register", &creds, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn weak_credentials_rejected() {
    let server = test_server();
    let router = server.build_router();

    let (status, body) = post_json(
        router.clone(),
        "/auth/register",
        &json!({"email": "dev@example.com", "password": "short"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_array());

    let (status, _) = post_json(
        router,
        "/auth/register",
        &json!({"email": "not-an-email", "password": "hunter22"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_round_trip() {
    let server = test_server();
    let router = server.build_router();
    let creds = json!({"email": "login@example.com", "password": "hunter22"});

    post_json(router.clone(), "/auth/register", &creds, None).await;

    let (status, body) = post_json(router.clone(), "/auth/login", &creds, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());

    let (status, body) = post_json(
        router.clone(),
        "/auth/login",
        &json!({"email": "login@example.com", "password": "wrong"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = post_json(
        router,
        "/auth/login",
        &json!({"email": "nobody@example.com", "password": "hunter22"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
