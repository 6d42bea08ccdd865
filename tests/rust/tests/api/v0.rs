//! The v0 surface: snake_case shapes, latest-only, deterministic IDs

use axum::http::StatusCode;
use mcpreg_core::identifier::server_id_for;
use serde_json::json;
use tests::{
    http::{get_json, post_json},
    test_server,
};

const V0_OFFICIAL: &str = "io.modelcontextprotocol.registry";

/// Register an account and return a verified publish token.
async fn register_token(router: axum::Router) -> String {
    let (status, body) = post_json(
        router,
        "/auth/register",
        &json!({"email": "publisher@example.com", "password": "hunter22"}),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().expect("token issued").to_string()
}

#[tokio::test]
async fn publish_requires_verified_token() {
    let server = test_server();
    let router = server.build_router();
    let body = json!({"name": "io.test/v0", "description": "d", "version": "1.0.0"});

    let (status, _) = post_json(router.clone(), "/v0/publish", &body, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A bearer header alone is not enough on this surface: the token must
    // verify against the account store.
    let (status, response) = post_json(router, "/v0/publish", &body, Some("made-up-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"], "Invalid or expired Registry JWT token");
}

#[tokio::test]
async fn publish_and_fetch_by_name_and_id() {
    let server = test_server();
    let router = server.build_router();
    let token = register_token(router.clone()).await;

    let (status, published) = post_json(
        router.clone(),
        "/v0/publish",
        &json!({"name": "io.test/lookup", "description": "d", "version": "1.2.3"}),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["version_detail"]["version"], "1.2.3");
    assert_eq!(published["version_detail"]["is_latest"], true);

    let (status, by_name) = get_json(router.clone(), "/v0/servers/io.test%2Flookup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_name["name"], "io.test/lookup");

    let id = server_id_for("io.test/lookup").to_string();
    let (status, by_id) = get_json(router.clone(), &format!("/v0/servers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["_meta"][V0_OFFICIAL]["id"], id.as_str());

    // Version query must match the served version.
    let (status, _) =
        get_json(router.clone(), "/v0/servers/io.test%2Flookup?version=1.2.3").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_json(router, "/v0/servers/io.test%2Flookup?version=9.9.9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_serves_only_latest_versions() {
    let server = test_server();
    let router = server.build_router();
    let token = register_token(router.clone()).await;

    for version in ["1.0.0", "2.0.0"] {
        post_json(
            router.clone(),
            "/v0/publish",
            &json!({"name": "io.test/latest", "description": "d", "version": version}),
            Some(&token),
        )
        .await;
    }

    let (status, body) = get_json(router, "/v0/servers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["count"], 1);
    assert_eq!(body["metadata"]["total"], 1);
    assert_eq!(body["servers"][0]["version_detail"]["version"], "2.0.0");
    assert_eq!(body["servers"][0]["version_detail"]["is_latest"], true);
}

#[tokio::test]
async fn id_lookup_is_deterministic_and_requires_name() {
    let server = test_server();
    let router = server.build_router();

    let (status, body) = get_json(
        router.clone(),
        "/v0/servers/id-lookup?name=io.test%2Fweather",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["serverName"], "io.test/weather");
    assert_eq!(
        body["serverId"],
        server_id_for("io.test/weather").to_string().as_str()
    );

    // The record does not need to exist for the ID to resolve.
    let (repeat_status, repeat) = get_json(
        router.clone(),
        "/v0/servers/id-lookup?name=io.test%2Fweather",
    )
    .await;
    assert_eq!(repeat_status, StatusCode::OK);
    assert_eq!(repeat["serverId"], body["serverId"]);

    let (status, body) = get_json(router, "/v0/servers/id-lookup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Server name is required");
}

#[tokio::test]
async fn unknown_server_is_not_found() {
    let server = test_server();
    let (status, _) = get_json(server.build_router(), "/v0/servers/io.test%2Fnope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
