use checkpoint::position::{Position, Stage};
use checkpoint::store::base::{PositionStore, PositionStoreError};
use checkpoint::store::memory::MemoryPositionStore;
use checkpoint_telemetry::tracing::init_test_tracing;
use chrono::Utc;

#[tokio::test(flavor = "multi_thread")]
async fn test_position_lifecycle() {
    init_test_tracing();

    let store = MemoryPositionStore::new();

    let before_put = Utc::now();

    store
        .put_position("p1", Position::new("p1", Stage::Stream, "test"))
        .await
        .unwrap();

    let position = store.get_position("p1").await.unwrap().unwrap();
    assert_eq!(position.name, "p1");
    assert_eq!(position.stage, Stage::Stream);
    assert_eq!(position.value, "test");
    assert!(position.update_time.unwrap() >= before_put);

    store
        .put_position("p1", Position::new("p1", Stage::Stream, "test2"))
        .await
        .unwrap();

    let position = store.get_position("p1").await.unwrap().unwrap();
    assert_eq!(position.value, "test2");

    let err = store
        .put_position("p1", Position::new("p1", Stage::Stream, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, PositionStoreError::InvalidPosition(_)));

    let position = store.get_position("p1").await.unwrap().unwrap();
    assert_eq!(position.value, "test2");

    store.delete_position("p1").await.unwrap();
    assert!(store.get_position("p1").await.unwrap().is_none());
    store.delete_position("p1").await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_returns_none_for_unknown_pipeline() {
    init_test_tracing();

    let store = MemoryPositionStore::new();

    assert!(store.get_position("never_written").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_overrides_the_position_name() {
    init_test_tracing();

    let store = MemoryPositionStore::new();

    store
        .put_position("p1", Position::new("someone_else", Stage::Batch, "cursor"))
        .await
        .unwrap();

    let position = store.get_position("p1").await.unwrap().unwrap();
    assert_eq!(position.name, "p1");
    assert!(store.get_position("someone_else").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clones_share_state() {
    init_test_tracing();

    let store = MemoryPositionStore::new();
    let clone = store.clone();

    store
        .put_position("p1", Position::new("p1", Stage::Batch, "shared"))
        .await
        .unwrap();

    let position = clone.get_position("p1").await.unwrap().unwrap();
    assert_eq!(position.value, "shared");

    clone.delete_position("p1").await.unwrap();
    assert!(store.get_position("p1").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_close_is_a_no_op() {
    init_test_tracing();

    let store = MemoryPositionStore::new();

    store
        .put_position("p1", Position::new("p1", Stage::Stream, "kept"))
        .await
        .unwrap();
    store.close().await.unwrap();

    // Closing an in-memory store keeps the contents reachable.
    assert!(store.get_position("p1").await.unwrap().is_some());
}
