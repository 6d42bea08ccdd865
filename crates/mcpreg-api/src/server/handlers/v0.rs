//! Handlers for the v0 surface
//!
//! v0 predates the multi-version envelope: each server appears once (its
//! latest version), fields are snake_case, and the registry-owned block
//! lives under `_meta["io.modelcontextprotocol.registry"]` with the
//! version folded into a `version_detail` object. The shapes here remap
//! the canonical core envelope onto that older contract; legacy `/api`
//! reuses them.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use mcpreg_core::{
    cursor,
    identifier::server_id_for,
    ListQuery, Package, Repository, RegistryService, ServerDetail, ServerResponse, Transport,
    VersionSelector,
};

use super::{require_verified_user, validated_limit, ApiError};
use crate::server::AppState;

/// Key under `_meta` holding the v0 registry-owned block
pub const V0_OFFICIAL_META_KEY: &str = "io.modelcontextprotocol.registry";

// ============================================
// Wire shapes
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDetail {
    pub version: String,
    pub release_date: String,
    pub is_latest: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageV0 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteV0 {
    /// `"streamable"` or `"sse"`
    pub transport_type: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Value>>,
}

/// A server on the v0 wire: one (latest) version, snake_case fields.
#[derive(Debug, Clone, Serialize)]
pub struct ServerDetailV0 {
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    pub version_detail: VersionDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<PackageV0>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remotes: Option<Vec<RemoteV0>>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(rename = "_meta")]
    pub meta: Map<String, Value>,
}

/// Rich pagination metadata the older surfaces expose
#[derive(Debug, Clone, Serialize)]
pub struct ListMetaV0 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerListV0 {
    pub servers: Vec<ServerDetailV0>,
    pub metadata: ListMetaV0,
}

/// Remap a canonical envelope onto the v0 contract.
pub fn to_v0_detail(envelope: &ServerResponse) -> ServerDetailV0 {
    let official = &envelope.meta.official;
    let server = &envelope.server;
    let published = official.published_at.to_rfc3339();
    let updated = official.updated_at.to_rfc3339();

    // Publisher-provided keys pass through; the registry block is rebuilt
    // under the v0 key with the deterministic ID.
    let mut meta = server.meta.clone().unwrap_or_default();
    meta.insert(
        V0_OFFICIAL_META_KEY.to_string(),
        json!({
            "id": server_id_for(&server.name).to_string(),
            "published_at": published,
            "updated_at": updated,
            "is_latest": official.is_latest,
            "release_date": updated,
        }),
    );

    ServerDetailV0 {
        name: server.name.clone(),
        description: server.description.clone(),
        status: serde_json::to_value(official.status)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "active".to_string()),
        repository: server.repository.clone(),
        version_detail: VersionDetail {
            version: server.version.clone(),
            release_date: updated.clone(),
            is_latest: official.is_latest,
        },
        packages: server.packages.as_ref().map(|packages| {
            packages
                .iter()
                .map(|p| PackageV0 {
                    registry_type: Some(p.registry_type.clone()),
                    registry_base_url: p.registry_base_url.clone(),
                    identifier: Some(p.identifier.clone()),
                    version: p.version.clone(),
                })
                .collect()
        }),
        remotes: server.remotes.as_ref().map(|remotes| {
            remotes
                .iter()
                .filter_map(|r| match r {
                    Transport::StreamableHttp { url, .. } => Some(RemoteV0 {
                        transport_type: "streamable".to_string(),
                        url: url.clone(),
                        headers: None,
                    }),
                    Transport::Sse { url, .. } => Some(RemoteV0 {
                        transport_type: "sse".to_string(),
                        url: url.clone(),
                        headers: None,
                    }),
                    Transport::Stdio => None,
                })
                .collect()
        }),
        created_at: published,
        updated_at: updated,
        meta,
    }
}

/// Shared list implementation for v0 and legacy: latest-only (the
/// revision default), with the rich metadata block. `page` (1-based)
/// overrides the cursor when present.
pub fn list_with_rich_meta(
    service: &RegistryService,
    cursor_param: Option<String>,
    limit: usize,
    page: Option<usize>,
) -> ServerListV0 {
    // Saturating: an absurd page number lands past the end and yields an
    // empty page rather than overflowing the offset.
    let offset = match page {
        Some(page) if page >= 1 => page.saturating_sub(1).saturating_mul(limit),
        _ => cursor_param.as_deref().map(cursor::decode).unwrap_or(0),
    };

    let query = ListQuery {
        cursor: Some(cursor::encode(offset)),
        limit,
        ..Default::default()
    };
    let result = service.list(&query);
    let total = service.count(&query);

    let end = offset.saturating_add(limit);
    let has_next = end < total;

    ServerListV0 {
        servers: result.servers.iter().map(to_v0_detail).collect(),
        metadata: ListMetaV0 {
            next_cursor: has_next.then(|| cursor::encode(end)),
            count: result.servers.len(),
            total,
            page: page.filter(|p| *p >= 1).unwrap_or(offset / limit + 1),
            total_pages: total.div_ceil(limit),
            has_next,
            has_previous: offset > 0,
        },
    }
}

// ============================================
// Handlers
// ============================================

#[derive(Debug, Deserialize, Default)]
pub struct ListParamsV0 {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

/// GET /v0/servers
pub async fn list_servers(
    State(state): State<AppState>,
    Query(params): Query<ListParamsV0>,
) -> Result<Json<ServerListV0>, ApiError> {
    let limit = validated_limit(params.limit)?;
    Ok(Json(list_with_rich_meta(
        &state.v0,
        params.cursor,
        limit,
        None,
    )))
}

#[derive(Debug, Deserialize, Default)]
pub struct DetailParamsV0 {
    pub version: Option<String>,
}

/// GET /v0/servers/{id}
///
/// `id` is a server name or its deterministic ID. The optional `version`
/// query must match the served (latest) version, else the lookup misses.
pub async fn get_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DetailParamsV0>,
) -> Result<Json<ServerDetailV0>, ApiError> {
    let name = state
        .store
        .names()
        .into_iter()
        .find(|name| *name == id || server_id_for(name).to_string() == id)
        .ok_or_else(ApiError::not_found)?;

    let envelope = state.v0.server_version(&name, &VersionSelector::Latest)?;
    if let Some(version) = &params.version {
        if &envelope.server.version != version {
            return Err(ApiError::not_found());
        }
    }

    Ok(Json(to_v0_detail(&envelope)))
}

#[derive(Debug, Deserialize)]
pub struct IdLookupParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdLookupResponse {
    pub server_name: String,
    pub server_id: String,
    pub note: String,
}

/// GET /v0/servers/id-lookup?name=...
pub async fn id_lookup(
    Query(params): Query<IdLookupParams>,
) -> Result<Json<IdLookupResponse>, ApiError> {
    let name = params
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Server name is required"))?;

    Ok(Json(IdLookupResponse {
        server_id: server_id_for(&name).to_string(),
        server_name: name,
        note: "This ID is deterministic and will always be the same for this server name"
            .to_string(),
    }))
}

/// Publish body on the v0 wire
#[derive(Debug, Deserialize)]
pub struct PublishBodyV0 {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub packages: Option<Vec<PackageV0>>,
    #[serde(default)]
    pub remotes: Option<Vec<RemoteV0>>,
    #[serde(rename = "_meta", default)]
    pub meta: Option<Map<String, Value>>,
}

impl PublishBodyV0 {
    /// Lift a v0 publish body into the canonical record shape.
    pub fn into_record(self) -> ServerDetail {
        ServerDetail {
            name: self.name,
            description: self.description,
            version: self.version,
            title: None,
            repository: self.repository,
            website_url: None,
            icons: None,
            schema: None,
            packages: self.packages.map(|packages| {
                packages
                    .into_iter()
                    .map(|p| Package {
                        registry_type: p.registry_type.unwrap_or_default(),
                        registry_base_url: p.registry_base_url,
                        identifier: p.identifier.unwrap_or_default(),
                        version: p.version,
                        file_sha256: None,
                        runtime_hint: None,
                        transport: Transport::Stdio,
                        runtime_arguments: None,
                        package_arguments: None,
                        environment_variables: None,
                    })
                    .collect()
            }),
            remotes: self.remotes.map(|remotes| {
                remotes
                    .into_iter()
                    .map(|r| {
                        if r.transport_type == "sse" {
                            Transport::Sse {
                                url: r.url,
                                headers: None,
                            }
                        } else {
                            Transport::StreamableHttp {
                                url: r.url,
                                headers: None,
                            }
                        }
                    })
                    .collect()
            }),
            meta: self.meta,
        }
    }
}

/// POST /v0/publish
pub async fn publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ServerDetailV0>, ApiError> {
    let user = require_verified_user(&state, &headers)?;

    let body: PublishBodyV0 = serde_json::from_value(body)
        .map_err(|e| ApiError::validation(vec![format!("invalid publish payload: {e}")]))?;

    info!(name = %body.name, version = %body.version, publisher = %user.email, "v0 publish request");
    let envelope = state.v0.publish(body.into_record())?;
    Ok(Json(to_v0_detail(&envelope)))
}
