//! Merging across shards: ranking, deduplication and integrity signals.

use std::sync::Arc;

use tessera_fts::ResultRecord;
use tessera_search::{SearchCoordinator, ShardBackend, WorkerPool};

use crate::common::{hit, ids, marker_root, CannedBackend, Reply};

fn coordinator(backend: CannedBackend, workers: usize) -> SearchCoordinator {
    SearchCoordinator::new(WorkerPool::new(workers)).with_backend(Arc::new(backend))
}

#[tokio::test]
async fn test_two_shards_merge_by_score() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("n1", 2.0), hit("n2", 0.5)]))
        .reply("beta", Reply::Records(vec![hit("n3", 1.0)]));

    let outcome = coordinator(backend, 5)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n1", "n3", "n2"]);
    let scores: Vec<f64> = outcome.results.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![2.0, 1.0, 0.5]);
    assert_eq!(outcome.results[1].shard, "beta");
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.shards_searched, 2);
}

#[tokio::test]
async fn test_duplicate_id_from_later_shard_dropped() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("n1", 2.0), hit("n2", 0.5)]))
        .reply("beta", Reply::Records(vec![hit("n3", 1.0), hit("n1", 3.0)]));

    let outcome = coordinator(backend, 5)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["n1", "n3", "n2"]);
    let n1: Vec<&ResultRecord> = outcome
        .results
        .iter()
        .filter(|r| r.node_id.as_deref() == Some("n1"))
        .collect();
    assert_eq!(n1.len(), 1);
    assert_eq!(n1[0].shard, "alpha");
    assert_eq!(n1[0].score, 2.0);
}

#[tokio::test]
async fn test_duplicate_only_shard_leaves_first_copy() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("n1", 2.0), hit("n2", 0.5)]))
        .reply("beta", Reply::Records(vec![hit("n1", 3.0)]));

    let outcome = coordinator(backend, 5)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(ids(&outcome.results), vec!["n1", "n2"]);
    assert_eq!(outcome.results[0].shard, "alpha");
}

#[tokio::test]
async fn test_duplicate_resolution_follows_discovery_order_not_completion() {
    let root = marker_root(&["alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply(
            "alpha",
            Reply::Slow(
                std::time::Duration::from_millis(100),
                vec![hit("n1", 1.0)],
            ),
        )
        .reply("beta", Reply::Records(vec![hit("n1", 5.0)]));

    let outcome = coordinator(backend, 2)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].shard, "alpha");
}

#[tokio::test]
async fn test_equal_scores_keep_discovery_order() {
    let root = marker_root(&["gamma", "alpha", "beta"]);
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![hit("a", 1.0)]))
        .reply("beta", Reply::Records(vec![hit("b", 1.0)]))
        .reply("gamma", Reply::Records(vec![hit("c", 1.0)]));

    let outcome = coordinator(backend, 3)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(ids(&outcome.results), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_anonymous_title_collision_reported() {
    let root = marker_root(&["alpha", "beta"]);
    let identified = ResultRecord {
        title: Some("Adding Fractions".to_string()),
        ..hit("n1", 2.0)
    };
    let anonymous = ResultRecord {
        title: Some("Adding Fractions".to_string()),
        score: 1.0,
        ..Default::default()
    };
    let backend = CannedBackend::new()
        .reply("alpha", Reply::Records(vec![identified]))
        .reply("beta", Reply::Records(vec![anonymous]));

    let outcome = coordinator(backend, 5)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].shard, "beta");
    assert_eq!(outcome.violations[0].conflicting_node_id, "n1");
    assert_eq!(outcome.violations[0].title, "Adding Fractions");
}

#[tokio::test]
async fn test_single_worker_searches_in_discovery_order() {
    let root = marker_root(&["alpha", "beta", "gamma"]);
    let backend = Arc::new(
        CannedBackend::new()
            .reply("alpha", Reply::Records(vec![hit("n1", 0.1)]))
            .reply("beta", Reply::Records(vec![hit("n2", 0.2)]))
            .reply("gamma", Reply::Records(vec![hit("n3", 0.3)])),
    );
    let shared: Arc<dyn ShardBackend> = backend.clone();
    let coordinator = SearchCoordinator::new(WorkerPool::new(1)).with_backend(shared);

    let outcome = coordinator
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(backend.calls(), vec!["alpha", "beta", "gamma"]);
    assert_eq!(ids(&outcome.results), vec!["n3", "n2", "n1"]);
}

#[tokio::test]
async fn test_outcome_independent_of_pool_size() {
    let root = marker_root(&["alpha", "beta", "gamma"]);
    let make = || {
        CannedBackend::new()
            .reply("alpha", Reply::Records(vec![hit("n1", 1.0), hit("n2", 1.0)]))
            .reply("beta", Reply::Records(vec![hit("n2", 4.0), hit("n3", 1.0)]))
            .reply("gamma", Reply::Records(vec![hit("n4", 2.0)]))
    };

    let serial = coordinator(make(), 1)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();
    let parallel = coordinator(make(), 5)
        .search_query(root.path(), "fractions")
        .await
        .unwrap();

    assert_eq!(serial, parallel);
    assert_eq!(ids(&serial.results), vec!["n4", "n1", "n2", "n3"]);
}
