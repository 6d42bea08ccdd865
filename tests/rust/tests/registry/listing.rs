//! Listing, filtering, pagination, and the seeded store

use std::sync::Arc;

use mcpreg_core::{seed, ApiRevision, ListQuery, RegistryService, RegistryStore};
use pretty_assertions::assert_eq;
use tests::{record, service};

#[test]
fn pagination_chain_covers_everything_once() {
    let svc = service(ApiRevision::V01);
    for i in 0..25 {
        svc.publish(record(&format!("io.test/server-{i:02}"), "1.0.0"))
            .unwrap();
    }

    let mut seen = Vec::new();
    let mut cursor = None;
    loop {
        let page = svc.list(&ListQuery {
            cursor: cursor.clone(),
            limit: 10,
            ..Default::default()
        });
        assert!(page.servers.len() <= 10);
        assert_eq!(page.metadata.count, page.servers.len());
        seen.extend(page.servers.iter().map(|s| s.server.name.clone()));
        match page.metadata.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    assert_eq!(seen.len(), 25);
    let mut deduped = seen.clone();
    deduped.dedup();
    assert_eq!(deduped, seen, "no duplicates across pages");
}

#[test]
fn names_come_back_in_lexicographic_order() {
    let svc = service(ApiRevision::V01);
    for name in ["io.z/last", "io.a/first", "io.m/middle"] {
        svc.publish(record(name, "1.0.0")).unwrap();
    }

    let list = svc.list(&ListQuery::default());
    let names: Vec<_> = list.servers.iter().map(|s| s.server.name.as_str()).collect();
    assert_eq!(names, ["io.a/first", "io.m/middle", "io.z/last"]);
}

#[test]
fn revision_defaults_diverge_over_shared_store() {
    let store = Arc::new(RegistryStore::new());
    let v01 = RegistryService::new(store.clone(), ApiRevision::V01);
    let v0 = RegistryService::new(store.clone(), ApiRevision::V0);
    let legacy = RegistryService::new(store, ApiRevision::Legacy);

    v01.publish(record("io.test/multi", "1.0.0")).unwrap();
    v01.publish(record("io.test/multi", "2.0.0")).unwrap();
    v01.publish(record("io.test/multi", "3.0.0")).unwrap();

    assert_eq!(v01.list(&ListQuery::default()).servers.len(), 3);
    assert_eq!(v0.list(&ListQuery::default()).servers.len(), 1);
    assert_eq!(legacy.list(&ListQuery::default()).servers.len(), 1);
    assert_eq!(
        v0.list(&ListQuery::default()).servers[0].server.version,
        "3.0.0"
    );
}

#[test]
fn search_narrows_before_pagination() {
    let svc = service(ApiRevision::V01);
    for name in [
        "io.test/filesystem",
        "io.test/file-watcher",
        "io.test/database",
    ] {
        svc.publish(record(name, "1.0.0")).unwrap();
    }

    let list = svc.list(&ListQuery {
        search: Some("file".to_string()),
        ..Default::default()
    });
    assert_eq!(list.servers.len(), 2);
    assert!(list
        .servers
        .iter()
        .all(|s| s.server.name.contains("file")));
}

#[test]
fn seeded_store_upholds_latest_invariant() {
    let store = Arc::new(RegistryStore::new());
    seed::seed_registry(&store, 40);
    assert_eq!(store.len(), 40);

    for name in store.names() {
        let versions = store.versions(&name).unwrap();
        assert!(!versions.is_empty());
        let latest = versions.iter().filter(|v| v.is_latest()).count();
        assert_eq!(latest, 1, "name {name} must have exactly one latest");
        // Newest-first ordering
        for pair in versions.windows(2) {
            assert!(pair[0].published() >= pair[1].published());
        }
    }
}

#[test]
fn seeded_names_are_unique_and_namespaced() {
    let store = Arc::new(RegistryStore::new());
    seed::seed_registry(&store, 75);

    let names = store.names();
    assert_eq!(names.len(), 75);
    let mut deduped = names.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), 75);
    assert!(names.iter().all(|n| n.contains('/')));
}
