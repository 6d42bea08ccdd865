//! Handlers for the v0.1 surface (the canonical wire format)

use axum::{
    extract::{Path, Query, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    response::Json,
};
use serde::Deserialize;
use tracing::info;

use mcpreg_core::{ListQuery, ServerDetail, ServerList, ServerResponse, VersionSelector};

use super::{parse_updated_since, validated_limit, ApiError};
use crate::server::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub updated_since: Option<String>,
    pub version: Option<String>,
}

/// GET /v0.1/servers
pub async fn list_servers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ServerList>, ApiError> {
    let query = ListQuery {
        search: params.search,
        version: params.version,
        updated_since: parse_updated_since(params.updated_since.as_deref())?,
        cursor: params.cursor,
        limit: validated_limit(params.limit)?,
    };

    Ok(Json(state.v01.list(&query)))
}

/// GET /v0.1/servers/{server_name}/versions
pub async fn server_versions(
    State(state): State<AppState>,
    Path(server_name): Path<String>,
) -> Result<Json<ServerList>, ApiError> {
    let list = state.v01.server_versions(&server_name)?;
    Ok(Json(list))
}

/// GET /v0.1/servers/{server_name}/versions/{version}
///
/// `version` may be the literal `latest` to resolve the flagged version.
pub async fn server_version(
    State(state): State<AppState>,
    Path((server_name, version)): Path<(String, String)>,
) -> Result<Json<ServerResponse>, ApiError> {
    let selector = VersionSelector::from(version.as_str());
    let envelope = state.v01.server_version(&server_name, &selector)?;
    Ok(Json(envelope))
}

/// POST /v0.1/publish
///
/// The caller is expected to have obtained a registry token; this surface
/// only checks that a bearer credential is present. Verification against
/// the account store happens on the older surfaces.
pub async fn publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ServerResponse>, ApiError> {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return Err(ApiError::unauthorized(
            "Invalid or expired Registry JWT token",
        ));
    }

    let record: ServerDetail = serde_json::from_value(body)
        .map_err(|e| ApiError::validation(vec![format!("invalid publish payload: {e}")]))?;

    info!(name = %record.name, version = %record.version, "v0.1 publish request");
    let envelope = state.v01.publish(record)?;
    Ok(Json(envelope))
}
