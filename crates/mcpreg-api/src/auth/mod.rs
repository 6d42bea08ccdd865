//! Publisher authentication
//!
//! Registration/login against an in-memory user store, and HMAC-signed
//! bearer tokens for the publish endpoints. Tokens are two-part strings:
//! `base64(payload).base64(signature)` with an HMAC-SHA256 signature over
//! the payload.

use chrono::Utc;
use hmac::{Hmac, Mac};
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime: 24 hours.
const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// A registered publisher account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// `base64(salt).base64(sha256(salt || password))`
    password_digest: String,
    pub created_at: chrono::DateTime<Utc>,
}

/// Public view of a user, safe to return from auth endpoints
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Why a registration or login attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    UserExists,
    InvalidCredentials,
}

/// In-memory publisher accounts. Process-lifetime only, like the registry
/// store itself.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account. Fails if the email is already taken.
    pub fn register(&self, email: &str, password: &str) -> Result<User, AuthFailure> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == email) {
            return Err(AuthFailure::UserExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_digest: hash_password(password),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        debug!(email = %email, "registered publisher account");
        Ok(user)
    }

    /// Verify credentials and return the account.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthFailure> {
        let users = self.users.read();
        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or(AuthFailure::InvalidCredentials)?;

        if !verify_password(password, &user.password_digest) {
            return Err(AuthFailure::InvalidCredentials);
        }
        Ok(user.clone())
    }

    /// Look up a user by ID (token subjects reference accounts this way).
    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.read().iter().find(|u| u.id == *id).cloned()
    }
}

/// Claims carried by a registry token
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Create a signed registry token for a user.
pub fn create_token(user: &User, secret: &[u8]) -> String {
    let now = Utc::now().timestamp();
    let claims = serde_json::json!({
        "sub": user.id,
        "email": user.email,
        "iat": now,
        "exp": now + TOKEN_TTL_SECS,
    });
    sign_token(&claims.to_string(), secret)
}

/// Validate a token and extract its claims. Returns `None` for anything
/// malformed, forged, or expired.
pub fn validate_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let (payload_b64, signature_b64) = token.split_once('.')?;

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload_b64.as_bytes());
    let expected_sig = base64_url_decode(signature_b64)?;
    if mac.verify_slice(&expected_sig).is_err() {
        debug!("token signature mismatch");
        return None;
    }

    let payload = String::from_utf8(base64_url_decode(payload_b64)?).ok()?;
    let claims: serde_json::Value = serde_json::from_str(&payload).ok()?;

    let user_id = claims.get("sub")?.as_str()?.parse().ok()?;
    let email = claims.get("email")?.as_str()?.to_string();
    let exp = claims.get("exp")?.as_i64()?;
    let iat = claims.get("iat")?.as_i64()?;

    if Utc::now().timestamp() > exp {
        debug!("token expired at {exp}");
        return None;
    }

    Some(TokenClaims {
        user_id,
        email,
        exp,
        iat,
    })
}

/// Extract the bearer credential from an Authorization header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// Sign a payload and create the token string
fn sign_token(payload: &str, secret: &[u8]) -> String {
    let payload_b64 = base64_url_encode(payload.as_bytes());

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload_b64.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", payload_b64, base64_url_encode(&signature))
}

fn hash_password(password: &str) -> String {
    use rand::Rng;
    let salt: [u8; 16] = rand::thread_rng().gen();

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    format!("{}.{}", base64_url_encode(&salt), base64_url_encode(&digest))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('.') else {
        return false;
    };
    let (Some(salt), Some(expected)) = (base64_url_decode(salt_b64), base64_url_decode(digest_b64))
    else {
        return false;
    };

    let mut hasher = Sha256::new();
    hasher.update(&salt);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    digest.as_slice() == expected.as_slice()
}

/// Base64 URL-safe encoding (no padding)
fn base64_url_encode(data: &[u8]) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    URL_SAFE_NO_PAD.encode(data)
}

/// Base64 URL-safe decoding
fn base64_url_decode(s: &str) -> Option<Vec<u8>> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    URL_SAFE_NO_PAD.decode(s).ok()
}
