//! Partial failure: one bad shard never sinks the search.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tessera_core::Error;
use tessera_search::{FailureKind, SearchCoordinator, WorkerPool};

use crate::common::{hit, ids, marker_root, CannedBackend, Reply};

fn coordinator(backend: CannedBackend) -> SearchCoordinator {
    SearchCoordinator::new(WorkerPool::new(5)).with_backend(Arc::new(backend))
}

#[tokio::test]
async fn test_corrupt_shard_excluded_with_one_failure() {
    let root = marker_root(&["alpha", "beta", "gamma"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("n1", 0.5)]))
        .reply("beta", Reply::OpenError)
        .reply("gamma", Reply::Records(vec![hit("n3", 1.5)]));

    let outcome = coordinator(backend)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n3", "n1"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].shard, "beta");
    assert_eq!(outcome.failures[0].kind, FailureKind::Open);
    assert!(outcome.failures[0].message.contains("corrupt segment"));
    assert!(!outcome.all_failed());
}

#[tokio::test]
async fn test_every_shard_failing_yields_empty_results() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::OpenError)
        .reply("beta", Reply::OpenError);

    let outcome = coordinator(backend)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[0].shard, "alpha");
    assert_eq!(outcome.failures[1].shard, "beta");
    assert!(outcome.all_failed());
}

#[tokio::test]
async fn test_panicking_worker_becomes_failure() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Panic)
        .reply("beta", Reply::Records(vec![hit("n2", 1.0)]));

    let outcome = coordinator(backend)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n2"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].shard, "alpha");
    assert_eq!(outcome.failures[0].kind, FailureKind::Worker);
}

#[tokio::test]
async fn test_panic_does_not_leak_worker() {
    let root = marker_root(&["alpha", "beta", "gamma"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Panic)
        .reply("beta", Reply::Panic)
        .reply("gamma", Reply::Records(vec![hit("n3", 1.0)]));
    let coordinator =
        SearchCoordinator::new(WorkerPool::new(1)).with_backend(Arc::new(backend));

    let outcome = coordinator
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n3"]);
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(coordinator.pool().idle(), 1);
}

#[tokio::test]
async fn test_slow_shard_times_out() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("n1", 1.0)]))
        .reply(
            "beta",
            Reply::Slow(Duration::from_millis(400), vec![hit("n2", 9.0)]),
        );
    let coordinator = coordinator(backend).with_timeout(Some(Duration::from_millis(50)));

    let outcome = coordinator
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n1"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].shard, "beta");
    assert_eq!(outcome.failures[0].kind, FailureKind::Timeout);
}

#[tokio::test]
async fn test_empty_root_returns_nothing() {
    let root = tempfile::tempdir().unwrap();
    let backend = CannedBackend::new();

    let outcome = coordinator(backend)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.shards_searched, 0);
}

#[tokio::test]
async fn test_empty_query_never_reaches_backend() {
    let backend = Arc::new(CannedBackend::new());
    let shared: Arc<dyn tessera_search::ShardBackend> = backend.clone();
    let coordinator = SearchCoordinator::new(WorkerPool::new(1)).with_backend(shared);

    for query in ["", "  ", "\n\t "] {
        let err = coordinator
            .search_query(Path::new("/no/such/root"), query)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery { .. }));
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_unreadable_root_is_search_error() {
    let temp = tempfile::tempdir().unwrap();
    let not_a_dir = temp.path().join("file.txt");
    std::fs::write(&not_a_dir, b"x").unwrap();

    let err = coordinator(CannedBackend::new())
        .search_query(&not_a_dir, "fractions")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
