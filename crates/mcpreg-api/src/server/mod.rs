//! Registry HTTP server
//!
//! Axum server exposing the three API revisions side by side, each backed
//! by its own service view over a shared store.

mod handlers;
pub mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use mcpreg_core::{seed, ApiRevision, RegistryService, RegistryStore};

use crate::auth::UserStore;
use crate::config::ApiConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RegistryStore>,
    /// Query services, one per revision. Same store, different defaults.
    pub legacy: RegistryService,
    pub v0: RegistryService,
    pub v01: RegistryService,
    pub users: Arc<UserStore>,
    pub token_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<RegistryStore>, token_secret: &str) -> Self {
        Self {
            legacy: RegistryService::new(store.clone(), ApiRevision::Legacy),
            v0: RegistryService::new(store.clone(), ApiRevision::V0),
            v01: RegistryService::new(store.clone(), ApiRevision::V01),
            store,
            users: Arc::new(UserStore::new()),
            token_secret: Arc::from(token_secret),
        }
    }
}

/// Registry API server
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a server, seeding the store when configured to.
    pub fn new(config: ApiConfig) -> Self {
        let store = Arc::new(RegistryStore::new());
        if config.seed_count > 0 {
            seed::seed_registry(&store, config.seed_count);
            info!(servers = store.len(), "registry seeded");
        }

        let state = AppState::new(store, &config.token_secret);
        Self { config, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the Axum router with all three revision surfaces.
    pub fn build_router(&self) -> Router {
        // The static id-lookup segment takes priority over the {id}
        // capture, so both can live under /v0/servers.
        let router = Router::new()
            .route("/health", get(handlers::health))
            // v0.1: canonical camelCase surface, multi-version
            .route("/v0.1/servers", get(handlers::v01::list_servers))
            .route(
                "/v0.1/servers/{server_name}/versions",
                get(handlers::v01::server_versions),
            )
            .route(
                "/v0.1/servers/{server_name}/versions/{version}",
                get(handlers::v01::server_version),
            )
            .route("/v0.1/publish", post(handlers::v01::publish))
            // v0: snake_case surface, latest-only
            .route("/v0/servers", get(handlers::v0::list_servers))
            .route("/v0/servers/id-lookup", get(handlers::v0::id_lookup))
            .route("/v0/servers/{id}", get(handlers::v0::get_server))
            .route("/v0/publish", post(handlers::v0::publish))
            // legacy: page-based pagination, flat publish body
            .route("/api/servers", get(handlers::legacy::list_servers))
            .route("/api/publish", post(handlers::legacy::publish))
            // publisher accounts
            .route("/auth/register", post(handlers::auth::register))
            .route("/auth/login", post(handlers::auth::login));

        let rate_limiter = rate_limit::RateLimiter::new(rate_limit::RateLimitConfig::default());

        let mut router = router
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(rate_limit::rate_limit_middleware))
            // Outermost, so the limiter is in scope when the middleware runs
            .layer(axum::Extension(rate_limiter));

        if self.config.enable_cors {
            router = router.layer(self.cors_layer());
        }

        router
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }

    /// Bind and serve until the process exits.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr();

        info!(%addr, "starting registry API");
        info!(
            cors = self.config.enable_cors,
            seeded = self.state.store.len(),
            "server configuration"
        );

        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;

        Ok(())
    }

    /// Start the server in the background.
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}
