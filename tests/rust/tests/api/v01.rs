//! The v0.1 surface: camelCase wire shapes, multi-version listing

use axum::http::StatusCode;
use serde_json::json;
use tests::{
    http::{get_json, post_json},
    test_server,
};

const OFFICIAL: &str = "io.modelcontextprotocol.registry/official";

fn publish_body(name: &str, version: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": format!("test server {name}"),
        "version": version,
    })
}

#[tokio::test]
async fn empty_registry_lists_successfully() {
    let server = test_server();
    let (status, body) = get_json(server.build_router(), "/v0.1/servers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servers"], json!([]));
    assert_eq!(body["metadata"]["count"], 0);
    assert!(body["metadata"].get("nextCursor").is_none());
}

#[tokio::test]
async fn publish_requires_bearer_header() {
    let server = test_server();
    let (status, body) = post_json(
        server.build_router(),
        "/v0.1/publish",
        &publish_body("io.test/auth", "1.0.0"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn publish_then_read_back() {
    let server = test_server();
    let router = server.build_router();

    let (status, published) = post_json(
        router.clone(),
        "/v0.1/publish",
        &publish_body("io.test/weather", "1.0.0"),
        Some("any-token"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(published["server"]["name"], "io.test/weather");
    assert_eq!(published["_meta"][OFFICIAL]["isLatest"], true);
    assert_eq!(published["_meta"][OFFICIAL]["status"], "active");

    let (status, body) = get_json(router, "/v0.1/servers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["count"], 1);
    assert_eq!(body["servers"][0]["server"]["version"], "1.0.0");
}

#[tokio::test]
async fn versions_and_version_lookup() {
    let server = test_server();
    let router = server.build_router();

    for version in ["1.0.0", "2.0.0"] {
        let (status, _) = post_json(
            router.clone(),
            "/v0.1/publish",
            &publish_body("io.test/multi", version),
            Some("t"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Name contains a slash, so the path segment is percent-encoded.
    let (status, versions) = get_json(router.clone(), "/v0.1/servers/io.test%2Fmulti/versions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(versions["metadata"]["count"], 2);

    let (status, latest) =
        get_json(router.clone(), "/v0.1/servers/io.test%2Fmulti/versions/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["server"]["version"], "2.0.0");

    let (status, exact) =
        get_json(router.clone(), "/v0.1/servers/io.test%2Fmulti/versions/1.0.0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exact["_meta"][OFFICIAL]["isLatest"], false);

    let (status, _) = get_json(router, "/v0.1/servers/io.test%2Fmulti/versions/9.9.9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_server_is_not_found() {
    let server = test_server();
    let (status, body) = get_json(
        server.build_router(),
        "/v0.1/servers/io.test%2Fmissing/versions",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Server not found");
}

#[tokio::test]
async fn list_returns_every_version_by_default() {
    let server = test_server();
    let router = server.build_router();

    for version in ["1.0.0", "2.0.0", "3.0.0"] {
        post_json(
            router.clone(),
            "/v0.1/publish",
            &publish_body("io.test/all", version),
            Some("t"),
        )
        .await;
    }

    let (_, body) = get_json(router.clone(), "/v0.1/servers").await;
    assert_eq!(body["metadata"]["count"], 3);

    let (_, body) = get_json(router, "/v0.1/servers?version=latest").await;
    assert_eq!(body["metadata"]["count"], 1);
    assert_eq!(body["servers"][0]["server"]["version"], "3.0.0");
}

#[tokio::test]
async fn limit_is_capped_at_100() {
    let server = test_server();
    let router = server.build_router();

    let (status, body) = get_json(router.clone(), "/v0.1/servers?limit=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Limit cannot exceed 100");

    let (status, _) = get_json(router.clone(), "/v0.1/servers?limit=100").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(router, "/v0.1/servers?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cursor_pagination_over_http() {
    let server = test_server();
    let router = server.build_router();

    for i in 0..5 {
        post_json(
            router.clone(),
            "/v0.1/publish",
            &publish_body(&format!("io.test/s{i}"), "1.0.0"),
            Some("t"),
        )
        .await;
    }

    let (_, first) = get_json(router.clone(), "/v0.1/servers?limit=2").await;
    assert_eq!(first["metadata"]["count"], 2);
    let cursor = first["metadata"]["nextCursor"]
        .as_str()
        .expect("more pages remain")
        .to_string();

    let (_, second) = get_json(router, &format!("/v0.1/servers?limit=2&cursor={cursor}")).await;
    assert_eq!(second["metadata"]["count"], 2);
    assert_ne!(
        first["servers"][0]["server"]["name"],
        second["servers"][0]["server"]["name"]
    );
}

#[tokio::test]
async fn invalid_updated_since_is_rejected() {
    let server = test_server();
    let (status, _) = get_json(
        server.build_router(),
        "/v0.1/servers?updated_since=yesterday",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publish_validation_reports_details() {
    let server = test_server();
    let (status, body) = post_json(
        server.build_router(),
        "/v0.1/publish",
        &publish_body("io.test/bad", "latest"),
        Some("t"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_array());
}
