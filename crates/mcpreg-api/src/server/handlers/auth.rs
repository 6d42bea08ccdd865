//! Registration and login endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiError;
use crate::auth::{create_token, AuthFailure, UserProfile};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

fn validate_credentials(email: &str, password: &str) -> Vec<String> {
    let mut details = Vec::new();
    if email.is_empty() || !email.contains('@') {
        details.push("\"email\" must be a valid email".to_string());
    }
    if password.len() < 6 {
        details.push("\"password\" must be at least 6 characters".to_string());
    }
    details
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let details = validate_credentials(&body.email, &body.password);
    if !details.is_empty() {
        return Err(ApiError::validation(details));
    }

    let user = state
        .users
        .register(&body.email, &body.password)
        .map_err(|failure| match failure {
            AuthFailure::UserExists => {
                ApiError::new(StatusCode::CONFLICT, "User already exists")
            }
            AuthFailure::InvalidCredentials => {
                ApiError::unauthorized("Invalid credentials")
            }
        })?;

    info!(email = %user.email, "new publisher registered");
    let token = create_token(&user, state.token_secret.as_bytes());
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserProfile::from(&user),
            token,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .login(&body.email, &body.password)
        .map_err(|_| ApiError::unauthorized("Invalid credentials"))?;

    let token = create_token(&user, state.token_secret.as_bytes());
    Ok(Json(AuthResponse {
        user: UserProfile::from(&user),
        token,
    }))
}
