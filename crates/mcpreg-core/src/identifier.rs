//! Deterministic server identifiers
//!
//! Server IDs are derived from the server name alone so that external
//! callers can predict an ID without querying the registry, and so the same
//! name always maps to the same ID across restarts.

use uuid::Uuid;

/// Fixed namespace for name-based server IDs. Changing this value changes
/// every derived ID, so it is part of the public contract.
pub const REGISTRY_NAMESPACE: Uuid = Uuid::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);

/// Derive the deterministic ID for a server name (UUIDv5 over the
/// registry namespace). Pure: identical input always yields identical
/// output.
pub fn server_id_for(name: &str) -> Uuid {
    Uuid::new_v5(&REGISTRY_NAMESPACE, name.as_bytes())
}
