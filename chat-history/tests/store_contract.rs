// 存储客户端行为测试（内存实现）

use std::sync::Arc;

use chat_history_lib::modules::config::{StaticConfigSource, StoreSettings};
use chat_history_lib::modules::store::{
    ConnectionManager, FieldMap, HashLookup, InMemoryConnector, InMemoryKeyValueStore,
    PipelineReply, ScoreUpdate, StoreError, StoreHandle,
};

fn handle() -> (StoreHandle, Arc<InMemoryKeyValueStore>) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    (StoreHandle::new(store.clone()), store)
}

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn score_update_moves_member_without_duplicating() {
    let (handle, _) = handle();

    let first = handle.insert_or_update("user:chat:u", 1.0, "chat:a").await.unwrap();
    let second = handle.insert_or_update("user:chat:u", 5.0, "chat:a").await.unwrap();
    let same = handle.insert_or_update("user:chat:u", 5.0, "chat:a").await.unwrap();

    assert_eq!(first, ScoreUpdate::Changed);
    assert_eq!(second, ScoreUpdate::Changed);
    assert_eq!(same, ScoreUpdate::Unchanged);

    let members = handle.range_by_rank("user:chat:u", 0, -1, false).await.unwrap();
    assert_eq!(members, vec!["chat:a".to_string()]);
}

#[tokio::test]
async fn reverse_range_orders_by_descending_score() {
    let (handle, _) = handle();
    handle.insert_or_update("z", 1.0, "old").await.unwrap();
    handle.insert_or_update("z", 3.0, "new").await.unwrap();
    handle.insert_or_update("z", 2.0, "mid").await.unwrap();

    let members = handle.range_by_rank("z", 0, 1, true).await.unwrap();
    assert_eq!(members, vec!["new".to_string(), "mid".to_string()]);

    let missing = handle.range_by_rank("absent", 0, -1, true).await.unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn deleted_hash_reads_as_not_found() {
    let (handle, _) = handle();
    handle
        .set_fields("chat:1", &fields(&[("id", "1"), ("title", "hi")]))
        .await
        .unwrap();

    match handle.get_all_fields("chat:1").await.unwrap() {
        HashLookup::Found(map) => assert_eq!(map.get("title").map(String::as_str), Some("hi")),
        HashLookup::NotFound => panic!("expected hash"),
    }

    assert_eq!(handle.delete_key("chat:1").await.unwrap(), 1);
    assert_eq!(handle.delete_key("chat:1").await.unwrap(), 0);
    assert_eq!(
        handle.get_all_fields("chat:1").await.unwrap(),
        HashLookup::NotFound
    );
}

#[tokio::test]
async fn pipeline_replies_follow_enqueue_order_in_one_round_trip() {
    let (handle, store) = handle();
    let before = store.round_trips();

    let replies = handle
        .pipeline()
        .set_fields("chat:1", fields(&[("id", "1")]))
        .insert_or_update("user:chat:u", 10.0, "chat:1")
        .remove_member("user:chat:u", "chat:missing")
        .get_all_fields("chat:1")
        .delete_key("chat:1")
        .submit()
        .await
        .unwrap();

    assert_eq!(store.round_trips(), before + 1);
    assert_eq!(replies.len(), 5);
    assert_eq!(replies[0], PipelineReply::Ack);
    assert_eq!(replies[1], PipelineReply::Score(ScoreUpdate::Changed));
    assert_eq!(replies[2], PipelineReply::Removed(0));
    assert!(matches!(&replies[3], PipelineReply::Hash(HashLookup::Found(_))));
    assert_eq!(replies[4], PipelineReply::Deleted(1));
}

#[tokio::test]
async fn empty_pipeline_does_not_touch_the_store() {
    let (handle, store) = handle();

    let replies = handle.pipeline().submit().await.unwrap();

    assert!(replies.is_empty());
    assert_eq!(store.round_trips(), 0);
}

#[tokio::test]
async fn failed_round_trip_fails_the_whole_batch() {
    let (handle, store) = handle();
    store.fail_next_round_trip();

    let result = handle
        .pipeline()
        .insert_or_update("z", 1.0, "a")
        .delete_key("other")
        .submit()
        .await;

    match result {
        Err(err) => assert!(err.is_round_trip_failure()),
        Ok(replies) => panic!("expected failure, got {:?}", replies),
    }
}

#[tokio::test]
async fn manager_shares_one_client_between_callers() {
    let connector = InMemoryConnector::new();
    let manager = Arc::new(ConnectionManager::new(
        Arc::new(StaticConfigSource::new(StoreSettings::new(
            "https://example.upstash.io",
            "token",
        ))),
        Arc::new(connector.clone()),
    ));

    let handles = futures::future::join_all((0..8).map(|_| manager.acquire())).await;
    let handles: Vec<StoreHandle> = handles.into_iter().collect::<Result<_, _>>().unwrap();

    assert_eq!(connector.connections(), 1);
    assert!(handles.iter().all(|h| h.same_instance(&handles[0])));

    // 释放后仍持有的句柄照常可用
    assert!(manager.release().await.unwrap());
    handles[0].insert_or_update("z", 1.0, "a").await.unwrap();

    let rebuilt = manager.acquire().await.unwrap();
    assert!(!rebuilt.same_instance(&handles[0]));
    assert_eq!(connector.connections(), 2);
}

#[tokio::test]
async fn missing_token_surfaces_as_configuration_error() {
    let manager = ConnectionManager::new(
        Arc::new(StaticConfigSource::new(StoreSettings {
            url: Some("https://example.upstash.io".to_string()),
            token: Some("   ".to_string()),
            timeout_secs: None,
        })),
        Arc::new(InMemoryConnector::new()),
    );

    let err = manager.acquire().await.unwrap_err();
    assert!(matches!(err, StoreError::Configuration(_)));
    assert!(err.to_string().contains("UPSTASH_REDIS_REST_TOKEN"));
}
