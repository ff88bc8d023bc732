//! Concurrent access across tenants and between writers and readers.

use std::sync::{Arc, Barrier};
use std::thread;

use tempfile::tempdir;

use inkdex::test_utils::entry;
use inkdex::{Content, SearchService};

use crate::common::service_at;

#[test]
fn test_service_is_send_and_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<SearchService>();
    assert_sync::<SearchService>();
}

#[test]
fn test_parallel_writers_on_distinct_tenants() {
    let root = tempdir().expect("tempdir");
    let service = Arc::new(service_at(root.path()));
    let start = Arc::new(Barrier::new(2));
    let mut handles = vec![];

    for tenant in ["alice", "bob"] {
        let service = Arc::clone(&service);
        let start = Arc::clone(&start);
        let handle = thread::spawn(move || {
            start.wait();
            for n in 0..20 {
                let item = Content::Entry(entry(
                    &format!("{tenant}-{n}"),
                    &format!("{tenant} writes about lichen, item {n}"),
                ));
                service.upsert(tenant, &item).expect("upsert");
            }
        });
        handles.push(handle);
    }
    for handle in handles {
        handle.join().expect("writer thread");
    }

    for tenant in ["alice", "bob"] {
        let results = service.search(tenant, "lichen").expect("search");
        assert_eq!(results.hits.len(), 20, "tenant {tenant} lost writes");
        assert!(results.hits.iter().all(|hit| hit.tenant.as_str() == tenant));
    }
}

#[test]
fn test_same_tenant_writers_serialize_without_losing_updates() {
    let root = tempdir().expect("tempdir");
    let service = Arc::new(service_at(root.path()));
    let start = Arc::new(Barrier::new(4));
    let mut handles = vec![];

    for worker in 0..4 {
        let service = Arc::clone(&service);
        let start = Arc::clone(&start);
        let handle = thread::spawn(move || {
            start.wait();
            for n in 0..10 {
                let item = Content::Entry(entry(
                    &format!("w{worker}-{n}"),
                    "contended writes about moraine",
                ));
                service.upsert("alice", &item).expect("upsert");
            }
        });
        handles.push(handle);
    }
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let results = service.search("alice", "moraine").expect("search");
    assert_eq!(results.hits.len(), 40, "every serialized write must survive");
}

#[test]
fn test_readers_observe_committed_states_monotonically() {
    let root = tempdir().expect("tempdir");
    let service = Arc::new(service_at(root.path()));
    let start = Arc::new(Barrier::new(2));

    let writer = {
        let service = Arc::clone(&service);
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            for n in 0..30 {
                let item = Content::Entry(entry(
                    &format!("e{n}"),
                    &format!("pulse number {n}"),
                ));
                service.upsert("alice", &item).expect("upsert");
            }
        })
    };

    let reader = {
        let service = Arc::clone(&service);
        let start = Arc::clone(&start);
        thread::spawn(move || {
            start.wait();
            let mut observed = vec![];
            for _ in 0..60 {
                let results = service.search("alice", "pulse").expect("search");
                observed.push(results.hits.len());
            }
            observed
        })
    };

    writer.join().expect("writer thread");
    let observed = reader.join().expect("reader thread");

    // Commits only add documents here, so snapshots taken later can never
    // show fewer hits than snapshots taken earlier.
    for pair in observed.windows(2) {
        assert!(pair[0] <= pair[1], "visible state went backwards: {observed:?}");
    }
    assert!(observed.iter().all(|&count| count <= 30));

    let final_results = service.search("alice", "pulse").expect("final search");
    assert_eq!(final_results.hits.len(), 30);
}
