//! Server configuration, loaded from the environment.

use std::net::SocketAddr;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Secret for signing registry tokens
    pub token_secret: String,
    /// Number of mock servers to seed at startup (0 disables seeding)
    pub seed_count: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            enable_cors: true,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            token_secret: "your-secret-key".to_string(),
            seed_count: 150,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults. `.env` files are read by the binary before this runs.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: true,
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|origins| origins.split(',').map(|o| o.trim().to_string()).collect())
                .unwrap_or(defaults.allowed_origins),
            token_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.token_secret),
            seed_count: std::env::var("REGISTRY_SEED_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(defaults.seed_count),
        }
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }
}
