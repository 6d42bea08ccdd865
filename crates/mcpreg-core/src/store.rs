//! In-memory record store
//!
//! Process-wide mapping from server name to its ordered version history.
//! Version sequences are kept sorted by `publishedAt` descending after any
//! mutation that adds a version. A single lock over the whole store keeps
//! every mutation (upsert plus latest-recompute) atomic, so readers can
//! never observe a group with zero or two latest flags.
//!
//! Data lives for the process lifetime only; there is no persistence.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::ServerResponse;
use crate::query::VersionSelector;

/// In-memory registry store. Inject one per service (or per test) rather
/// than sharing a module-level singleton.
#[derive(Default)]
pub struct RegistryStore {
    servers: RwLock<BTreeMap<String, Vec<ServerResponse>>>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the (name, version) entry, then re-sort the
    /// group newest-first. Does not touch `isLatest`; that is publish
    /// policy, decided by the caller before the write.
    pub fn upsert_version(&self, envelope: ServerResponse) {
        let mut servers = self.servers.write();
        let group = servers
            .entry(envelope.server.name.clone())
            .or_default();

        match group
            .iter_mut()
            .find(|v| v.server.version == envelope.server.version)
        {
            Some(existing) => *existing = envelope,
            None => group.push(envelope),
        }

        group.sort_by(|a, b| b.published().cmp(&a.published()));
    }

    /// All versions of a name, newest-first. `None` for unknown names.
    pub fn versions(&self, name: &str) -> Option<Vec<ServerResponse>> {
        self.servers.read().get(name).cloned()
    }

    /// One version of a name. Resolving `Latest` trusts the stored flag;
    /// if no version is flagged (which publish never produces), the lookup
    /// is a miss rather than a guess.
    pub fn version(&self, name: &str, selector: &VersionSelector) -> Option<ServerResponse> {
        let servers = self.servers.read();
        let group = servers.get(name)?;
        match selector {
            VersionSelector::Latest => group.iter().find(|v| v.is_latest()).cloned(),
            VersionSelector::Exact(version) => {
                group.iter().find(|v| &v.server.version == version).cloned()
            }
        }
    }

    /// Snapshot of all known names, in iteration order (lexicographic).
    /// Re-calling reflects current store state, not an earlier snapshot.
    pub fn names(&self) -> Vec<String> {
        self.servers.read().keys().cloned().collect()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.servers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.read().is_empty()
    }

    /// Run `f` over a name's group under the write lock, creating the
    /// group if the name is new.
    pub(crate) fn with_group_or_default_mut<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Vec<ServerResponse>) -> T,
    ) -> T {
        let mut servers = self.servers.write();
        f(servers.entry(name.to_string()).or_default())
    }
}
