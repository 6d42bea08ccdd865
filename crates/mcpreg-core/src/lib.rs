//! # McpReg Core Library
//!
//! Domain logic and business rules for the MCP server registry.
//!
//! ## Modules
//!
//! - `domain` - Record shapes (ServerDetail, ServerResponse, ServerList)
//! - `store` - In-memory multi-version record store
//! - `query` - Listing, filtering, pagination, and publish
//! - `cursor` - Opaque pagination cursor codec
//! - `identifier` - Deterministic name-based server IDs
//! - `revision` - Per-API-revision behavior configuration
//! - `validation` - Publish payload checks
//! - `seed` - Mock data generation for a fresh registry

pub mod cursor;
pub mod domain;
pub mod error;
pub mod identifier;
pub mod query;
pub mod revision;
pub mod seed;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use domain::*;
pub use error::RegistryError;
pub use query::{ListQuery, RegistryService, VersionSelector};
pub use revision::{ApiRevision, VersionPolicy};
pub use store::RegistryStore;
