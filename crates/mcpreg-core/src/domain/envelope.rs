//! Registry-owned envelope around a published server record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ServerDetail;

/// Key under `_meta` holding registry-owned metadata
pub const OFFICIAL_META_KEY: &str = "io.modelcontextprotocol.registry/official";

/// Key under `_meta` holding publisher-provided metadata
pub const PUBLISHER_META_KEY: &str = "io.modelcontextprotocol.registry/publisher-provided";

/// Lifecycle status of a published version
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ServerStatus {
    #[default]
    Active,
    Deprecated,
    Deleted,
}

/// Registry-owned metadata attached to every published version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMeta {
    pub status: ServerStatus,

    /// First time this (name, version) pair was published. Never changes
    /// on republish.
    pub published_at: DateTime<Utc>,

    /// Last time this version was touched by a publish
    pub updated_at: DateTime<Utc>,

    /// Whether this version is the group's latest. Exactly one version per
    /// name carries `true` whenever the group is non-empty.
    pub is_latest: bool,
}

impl RegistryMeta {
    /// Metadata for a freshly published version
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            status: ServerStatus::Active,
            published_at: now,
            updated_at: now,
            is_latest: true,
        }
    }
}

/// The `_meta` object on a response envelope: the official block plus any
/// other top-level keys, preserved in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseMeta {
    #[serde(rename = "io.modelcontextprotocol.registry/official")]
    pub official: RegistryMeta,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A server record wrapped with registry metadata: one element of a list
/// response and the shape of a detail response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerResponse {
    pub server: ServerDetail,

    #[serde(rename = "_meta")]
    pub meta: ResponseMeta,
}

impl ServerResponse {
    /// Wrap a record with fresh registry metadata
    pub fn published_at(server: ServerDetail, now: DateTime<Utc>) -> Self {
        Self {
            server,
            meta: ResponseMeta {
                official: RegistryMeta::new_at(now),
                extra: Map::new(),
            },
        }
    }

    pub fn is_latest(&self) -> bool {
        self.meta.official.is_latest
    }

    pub fn published(&self) -> DateTime<Utc> {
        self.meta.official.published_at
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.meta.official.updated_at
    }
}

/// Pagination metadata on a list response
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    /// Number of items in this page
    pub count: usize,
}

/// A page of server responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerList {
    pub servers: Vec<ServerResponse>,
    pub metadata: ListMeta,
}
