//! Handlers for the original `/api` surface
//!
//! The oldest revision: same latest-only listing and wire shapes as v0,
//! plus page-based pagination and a flatter publish body with catalog
//! fields (license, tags, homepage) that newer revisions moved into
//! publisher metadata.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use mcpreg_core::{PUBLISHER_META_KEY, Repository, ServerDetail};

use super::v0::{list_with_rich_meta, to_v0_detail, ServerDetailV0, ServerListV0};
use super::{require_verified_user, validated_limit, ApiError};
use crate::server::AppState;

lazy_static! {
    static ref SEMVER_PATTERN: Regex = Regex::new(r"^\d+\.\d+\.\d+$").expect("valid regex");
}

#[derive(Debug, Deserialize, Default)]
pub struct ListParamsLegacy {
    pub cursor: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
}

/// GET /api/servers
pub async fn list_servers(
    State(state): State<AppState>,
    Query(params): Query<ListParamsLegacy>,
) -> Result<Json<ServerListV0>, ApiError> {
    let limit = validated_limit(params.limit)?;
    Ok(Json(list_with_rich_meta(
        &state.legacy,
        params.cursor,
        limit,
        params.page,
    )))
}

/// Publish body on the legacy wire. Catalog fields beyond the core record
/// are preserved under publisher-provided metadata.
#[derive(Debug, Deserialize)]
pub struct PublishBodyLegacy {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub source_url: Option<String>,
    #[serde(rename = "sourceUrl")]
    pub source_url_camel: Option<String>,
    pub license: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub documentation: Option<String>,
}

impl PublishBodyLegacy {
    /// Field-level validation in the style of the surface's original
    /// schema: required name, description, semver version, source URL
    /// and license.
    fn validate(&self) -> Vec<String> {
        let mut details = Vec::new();
        if self.name.as_deref().map_or(true, str::is_empty) {
            details.push("\"name\" is required".to_string());
        }
        if self.description.as_deref().map_or(true, str::is_empty) {
            details.push("\"description\" is required".to_string());
        }
        match self.version.as_deref() {
            None | Some("") => details.push("\"version\" is required".to_string()),
            Some(v) if !SEMVER_PATTERN.is_match(v) => {
                details.push("\"version\" must be in major.minor.patch form".to_string())
            }
            _ => {}
        }
        if self.source_url().is_none() {
            details.push("\"sourceUrl\" is required".to_string());
        }
        if self.license.as_deref().map_or(true, str::is_empty) {
            details.push("\"license\" is required".to_string());
        }
        details
    }

    fn source_url(&self) -> Option<&str> {
        self.source_url
            .as_deref()
            .or(self.source_url_camel.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Lift into the canonical record shape, folding the catalog fields
    /// into publisher-provided metadata so nothing is lost on read-back.
    fn into_record(self, publisher: &str) -> ServerDetail {
        let mut provided = Map::new();
        provided.insert("publisher".to_string(), json!(publisher));
        if let Some(url) = self.source_url() {
            provided.insert("sourceUrl".to_string(), json!(url));
        }
        if let Some(license) = &self.license {
            provided.insert("license".to_string(), json!(license));
        }
        if let Some(category) = &self.category {
            provided.insert("category".to_string(), json!(category));
        }
        if let Some(author) = &self.author {
            provided.insert("author".to_string(), json!(author));
        }
        if let Some(tags) = &self.tags {
            provided.insert("tags".to_string(), json!(tags));
        }
        if let Some(homepage) = &self.homepage {
            provided.insert("homepage".to_string(), json!(homepage));
        }
        if let Some(documentation) = &self.documentation {
            provided.insert("documentation".to_string(), json!(documentation));
        }

        let mut meta = Map::new();
        meta.insert(PUBLISHER_META_KEY.to_string(), Value::Object(provided));

        ServerDetail {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            version: self.version.unwrap_or_default(),
            title: None,
            repository: self.repository.map(|url| Repository {
                url,
                source: "github".to_string(),
                id: None,
                subfolder: None,
            }),
            website_url: self.homepage,
            icons: None,
            schema: None,
            packages: None,
            remotes: None,
            meta: Some(meta),
        }
    }
}

/// POST /api/publish
pub async fn publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ServerDetailV0>), ApiError> {
    let user = require_verified_user(&state, &headers)?;

    let body: PublishBodyLegacy = serde_json::from_value(body)
        .map_err(|e| ApiError::validation(vec![format!("invalid publish payload: {e}")]))?;

    let details = body.validate();
    if !details.is_empty() {
        return Err(ApiError::validation(details));
    }

    info!(
        name = body.name.as_deref().unwrap_or(""),
        publisher = %user.email,
        "legacy publish request"
    );
    let envelope = state.legacy.publish(body.into_record(&user.email))?;
    Ok((StatusCode::CREATED, Json(to_v0_detail(&envelope))))
}
