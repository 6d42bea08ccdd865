//! HTTP handlers, split per API revision

pub mod auth;
pub mod legacy;
pub mod v0;
pub mod v01;

use axum::{
    http::header::AUTHORIZATION,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;

use mcpreg_core::RegistryError;

use crate::auth::{bearer_token, validate_token, User};
use crate::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Wire error body: `{ "error": ..., "details": [...] }`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// An error response with its status code.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn unauthorized(error: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Server not found")
    }

    pub fn validation(details: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: "Validation failed".to_string(),
                details: Some(details),
            },
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound => Self::not_found(),
            RegistryError::Validation { details } => Self::validation(details),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Resolve the bearer credential to a registered account. Used by the
/// publish endpoints that verify tokens (v0 and legacy).
pub fn require_verified_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| ApiError::unauthorized("Invalid or missing authentication token"))?;

    validate_token(token, state.token_secret.as_bytes())
        .and_then(|claims| state.users.get(&claims.user_id))
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired Registry JWT token"))
}

/// Validate a caller-supplied page size: default 30, hard cap 100. The
/// core engine trusts this check.
pub fn validated_limit(limit: Option<usize>) -> Result<usize, ApiError> {
    match limit {
        None => Ok(mcpreg_core::query::DEFAULT_LIMIT),
        Some(limit) if limit > mcpreg_core::query::MAX_LIMIT => {
            Err(ApiError::bad_request("Limit cannot exceed 100"))
        }
        Some(0) => Err(ApiError::bad_request("Limit must be at least 1")),
        Some(limit) => Ok(limit),
    }
}

/// Parse an `updated_since` query value as an ISO timestamp.
pub fn parse_updated_since(
    value: Option<&str>,
) -> Result<Option<chrono::DateTime<Utc>>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|_| ApiError::bad_request("updated_since must be an ISO 8601 timestamp")),
    }
}
