//! Per-client rate limiting middleware
//!
//! Fixed-window counters in a DashMap keyed by client IP. The registry is
//! reachable from anywhere, so limits are per-caller rather than per-path.

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// Configuration for the rate limiter.
#[derive(Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed within the window.
    pub max_requests: u32,
    /// Time window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

/// Shared rate limiter state (clone-friendly via Arc).
#[derive(Clone)]
pub struct RateLimiter {
    /// Map from client key → (window_start, request_count).
    buckets: Arc<DashMap<String, (Instant, u32)>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Check whether a request from `key` is within limits. Returns the
    /// seconds until the window resets when the request is rejected.
    fn check(&self, key: &str) -> Result<(), u64> {
        let mut entry = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| (Instant::now(), 0));
        let (window_start, count) = entry.value_mut();

        if window_start.elapsed() >= self.config.window {
            *window_start = Instant::now();
            *count = 1;
            return Ok(());
        }

        if *count >= self.config.max_requests {
            let remaining = self.config.window.saturating_sub(window_start.elapsed());
            return Err(remaining.as_secs().max(1));
        }

        *count += 1;
        Ok(())
    }
}

/// Axum middleware function for rate limiting.
pub async fn rate_limit_middleware(request: Request, next: Next) -> Response {
    let limiter = request.extensions().get::<RateLimiter>().cloned();

    if let Some(limiter) = limiter {
        // Requests arriving without connect info (e.g., in-process test
        // calls) share one bucket.
        let key = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip().to_string())
            .unwrap_or_else(|| "local".to_string());

        if let Err(retry_after) = limiter.check(&key) {
            warn!(client = %key, "rate limit exceeded");
            return (
                StatusCode::TOO_MANY_REQUESTS,
                [("Retry-After", retry_after.to_string())],
                "Too Many Requests",
            )
                .into_response();
        }
    }

    next.run(request).await
}
