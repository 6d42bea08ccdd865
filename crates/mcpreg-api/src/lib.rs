//! # McpReg API
//!
//! HTTP boundary for the MCP server registry: routing, request validation,
//! bearer-token issuance/verification, rate limiting, and CORS. All registry
//! semantics live in `mcpreg-core`; this crate translates HTTP into core
//! calls and core signals into status codes.

pub mod auth;
pub mod config;
pub mod server;

pub use config::ApiConfig;
pub use server::ApiServer;
