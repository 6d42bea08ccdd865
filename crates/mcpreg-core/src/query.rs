//! Listing, filtering, pagination, and publish
//!
//! The query engine reads through the record store, applies filters in a
//! fixed order (search, version selector, updated-since), flattens, then
//! paginates with the cursor codec. Publish runs the latest-version policy
//! before writing back.

use chrono::{DateTime, Utc};
use serde_json::Map;
use std::sync::Arc;
use tracing::debug;

use crate::cursor;
use crate::domain::{ListMeta, ServerDetail, ServerList, ServerResponse};
use crate::error::{RegistryError, Result};
use crate::revision::{ApiRevision, VersionPolicy};
use crate::store::RegistryStore;
use crate::validation::validate_publish;

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 30;

/// Maximum page size. Enforced by the boundary layer; the engine trusts
/// this precondition.
pub const MAX_LIMIT: usize = 100;

/// Which version of a name group a lookup targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// The version flagged `isLatest`
    Latest,
    /// An exact version string
    Exact(String),
}

impl From<&str> for VersionSelector {
    fn from(value: &str) -> Self {
        if value == "latest" {
            VersionSelector::Latest
        } else {
            VersionSelector::Exact(value.to_string())
        }
    }
}

/// Filters and pagination for a list request.
///
/// `limit` must already satisfy `1 ..= MAX_LIMIT`; the HTTP layer rejects
/// anything else before constructing the query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Case-insensitive substring match on server names
    pub search: Option<String>,
    /// `"latest"`, an exact version, or absent for the revision default
    pub version: Option<String>,
    /// Keep only versions updated at or after this instant
    pub updated_since: Option<DateTime<Utc>>,
    /// Opaque continuation cursor from a previous page
    pub cursor: Option<String>,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            version: None,
            updated_since: None,
            cursor: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Registry operations for one API revision, reading through an injected
/// store. Revisions share the store; only default behavior differs.
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<RegistryStore>,
    revision: ApiRevision,
}

impl RegistryService {
    pub fn new(store: Arc<RegistryStore>, revision: ApiRevision) -> Self {
        Self { store, revision }
    }

    pub fn store(&self) -> &Arc<RegistryStore> {
        &self.store
    }

    pub fn revision(&self) -> ApiRevision {
        self.revision
    }

    /// List servers with filtering and cursor pagination.
    pub fn list(&self, query: &ListQuery) -> ServerList {
        let matched = self.matched(query);

        let offset = query
            .cursor
            .as_deref()
            .map(cursor::decode)
            .unwrap_or(0);
        let end = offset.saturating_add(query.limit);

        let next_cursor = (end < matched.len()).then(|| cursor::encode(end));
        let page: Vec<ServerResponse> = matched
            .into_iter()
            .skip(offset)
            .take(query.limit)
            .collect();

        debug!(
            revision = ?self.revision,
            offset,
            count = page.len(),
            has_next = next_cursor.is_some(),
            "list query served"
        );

        ServerList {
            metadata: ListMeta {
                next_cursor,
                count: page.len(),
            },
            servers: page,
        }
    }

    /// Total number of envelopes matching the query's filters, ignoring
    /// its cursor and limit.
    pub fn count(&self, query: &ListQuery) -> usize {
        self.matched(query).len()
    }

    /// The materialized, filtered, ordered sequence a list request pages
    /// over: search, then version selection, then updated-since, flattened
    /// in name-iteration order with versions newest-first.
    fn matched(&self, query: &ListQuery) -> Vec<ServerResponse> {
        // Effective version selector: an explicit param always wins; absent
        // falls back to the revision's documented default.
        let selector = match query.version.as_deref() {
            Some(v) => Some(VersionSelector::from(v)),
            None => match self.revision.default_version_policy() {
                VersionPolicy::AllVersions => None,
                VersionPolicy::LatestOnly => Some(VersionSelector::Latest),
            },
        };

        let search = query.search.as_deref().map(str::to_lowercase);

        let mut matched: Vec<ServerResponse> = Vec::new();
        for name in self.store.names() {
            if let Some(needle) = &search {
                if !name.to_lowercase().contains(needle) {
                    continue;
                }
            }

            let Some(versions) = self.store.versions(&name) else {
                continue;
            };

            match &selector {
                Some(sel) => {
                    // One envelope per surviving name; a name without the
                    // requested version contributes nothing.
                    if let Some(v) = resolve(&versions, sel) {
                        matched.push(v);
                    }
                }
                None => matched.extend(versions),
            }
        }

        if let Some(since) = query.updated_since {
            matched.retain(|v| v.updated() >= since);
        }

        matched
    }

    /// All versions of a server, newest-first.
    pub fn server_versions(&self, name: &str) -> Result<ServerList> {
        let versions = self.store.versions(name).ok_or(RegistryError::NotFound)?;
        Ok(ServerList {
            metadata: ListMeta {
                next_cursor: None,
                count: versions.len(),
            },
            servers: versions,
        })
    }

    /// One version of a server, by exact version or `"latest"`.
    pub fn server_version(&self, name: &str, selector: &VersionSelector) -> Result<ServerResponse> {
        self.store
            .version(name, selector)
            .ok_or(RegistryError::NotFound)
    }

    /// Publish a record, creating a new version or updating an existing one.
    ///
    /// Republishing an existing (name, version) pair replaces the record in
    /// place and never changes which version is latest; only a new distinct
    /// version promotes itself and demotes every sibling. That asymmetry is
    /// deliberate.
    pub fn publish(&self, record: ServerDetail) -> Result<ServerResponse> {
        validate_publish(&record)?;

        let now = Utc::now();
        let name = record.name.clone();
        let version = record.version.clone();

        let envelope = self.store.with_group_or_default_mut(&name, |group| {
            match group.iter_mut().find(|v| v.server.version == version) {
                Some(existing) => {
                    // Republish: keep publishedAt and the latest flag,
                    // bump updatedAt, merge publisher metadata top-level.
                    let merged = merge_meta(existing.server.meta.take(), record.meta.clone());
                    existing.server = ServerDetail {
                        meta: merged,
                        ..record.clone()
                    };
                    existing.meta.official.updated_at = now;
                    existing.clone()
                }
                None => {
                    for sibling in group.iter_mut() {
                        sibling.meta.official.is_latest = false;
                    }
                    let envelope = ServerResponse::published_at(record.clone(), now);
                    group.push(envelope.clone());
                    group.sort_by(|a, b| b.published().cmp(&a.published()));
                    envelope
                }
            }
        });

        debug!(name = %name, version = %version, "published server version");
        Ok(envelope)
    }
}

fn resolve(versions: &[ServerResponse], selector: &VersionSelector) -> Option<ServerResponse> {
    match selector {
        VersionSelector::Latest => versions.iter().find(|v| v.is_latest()).cloned(),
        VersionSelector::Exact(version) => versions
            .iter()
            .find(|v| &v.server.version == version)
            .cloned(),
    }
}

/// Top-level merge of publisher metadata: keys from the update replace
/// existing keys wholesale, nothing is merged recursively.
fn merge_meta(
    existing: Option<Map<String, serde_json::Value>>,
    update: Option<Map<String, serde_json::Value>>,
) -> Option<Map<String, serde_json::Value>> {
    match (existing, update) {
        (None, update) => update,
        (existing, None) => existing,
        (Some(mut base), Some(update)) => {
            for (key, value) in update {
                base.insert(key, value);
            }
            Some(base)
        }
    }
}
