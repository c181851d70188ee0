// 对话历史端到端测试（内存存储）

use std::sync::Arc;
use std::time::Duration;

use chat_history_lib::modules::chat::{
    ApplicationError, ChatMessage, ChatModule, ClearChatsCommand, DeleteChatCommand,
    GetChatQuery, GetSharedChatQuery, ListChatsQuery, SaveChatCommand, ShareChatCommand,
    StoreChatRepository, ToolCallAnnotation, UserId,
};
use chat_history_lib::modules::store::{HashLookup, InMemoryKeyValueStore, StoreHandle};

fn module_over(store: Arc<InMemoryKeyValueStore>) -> ChatModule {
    let repository = StoreChatRepository::new(StoreHandle::new(store));
    ChatModule::with_repository(Arc::new(repository))
}

#[tokio::test]
async fn saved_chats_use_the_documented_layout() {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let module = module_over(store.clone());
    let user = UserId::parse("alice").unwrap();

    let saved = module
        .save_chat(SaveChatCommand::new(
            None,
            user.clone(),
            vec![ChatMessage::new_user("What is Rust?")],
        ))
        .await
        .unwrap();
    let id = saved.chat.id().clone();

    let handle = StoreHandle::new(store);
    let members = handle
        .range_by_rank("user:chat:alice", 0, -1, true)
        .await
        .unwrap();
    assert_eq!(members, vec![format!("chat:{}", id)]);

    let HashLookup::Found(fields) = handle.get_all_fields(&format!("chat:{}", id)).await.unwrap()
    else {
        panic!("chat hash missing");
    };
    assert_eq!(fields.get("userId").map(String::as_str), Some("alice"));
    assert_eq!(fields.get("title").map(String::as_str), Some("What is Rust?"));
    assert_eq!(fields.get("path"), Some(&format!("/search/{}", id)));
    assert!(fields.contains_key("createdAt"));
    assert!(!fields.contains_key("sharePath"));
}

#[tokio::test]
async fn recently_updated_chat_lists_first() {
    let module = module_over(Arc::new(InMemoryKeyValueStore::new()));
    let user = UserId::default();

    let first = module
        .save_chat(SaveChatCommand::new(
            None,
            user.clone(),
            vec![ChatMessage::new_user("first")],
        ))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    module
        .save_chat(SaveChatCommand::new(
            None,
            user.clone(),
            vec![ChatMessage::new_user("second")],
        ))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;

    // 追加消息后重新保存，刷新最近活动时间
    module
        .save_chat(SaveChatCommand::new(
            Some(first.chat.id().clone()),
            user.clone(),
            vec![
                ChatMessage::new_user("first"),
                ChatMessage::new_assistant("reply"),
            ],
        ))
        .await
        .unwrap();

    let page = module
        .list_chats(ListChatsQuery::first_page(user))
        .await
        .unwrap();
    let titles: Vec<_> = page.chats.iter().map(|c| c.title().to_string()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(page.chats[0].messages().len(), 2);
}

#[tokio::test]
async fn sharing_delete_and_clear() {
    let module = module_over(Arc::new(InMemoryKeyValueStore::new()));
    let owner = UserId::parse("owner").unwrap();
    let stranger = UserId::parse("stranger").unwrap();

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let saved = module
            .save_chat(SaveChatCommand::new(
                None,
                owner.clone(),
                vec![ChatMessage::new_user(title)],
            ))
            .await
            .unwrap();
        ids.push(saved.chat.id().clone());
    }

    // 非所有者既不能分享也看不到
    let denied = module
        .share_chat(ShareChatCommand::new(ids[0].clone(), stranger.clone()))
        .await;
    assert!(matches!(denied, Err(ApplicationError::ChatNotFound(_))));
    assert!(module
        .get_chat(GetChatQuery::new(ids[0].clone(), stranger.clone()))
        .await
        .unwrap()
        .is_none());

    module
        .share_chat(ShareChatCommand::new(ids[0].clone(), owner.clone()))
        .await
        .unwrap();
    let shared = module
        .get_shared_chat(GetSharedChatQuery::new(ids[0].clone()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shared.title(), "a");

    module
        .delete_chat(DeleteChatCommand::new(ids[1].clone(), owner.clone()))
        .await
        .unwrap();

    let cleared = module
        .clear_chats(ClearChatsCommand::new(owner.clone()))
        .await
        .unwrap();
    assert_eq!(cleared.deleted_chats, 2);

    let again = module.clear_chats(ClearChatsCommand::new(owner)).await;
    assert!(matches!(again, Err(ApplicationError::ValidationError(_))));
}

#[tokio::test]
async fn tool_call_annotations_survive_persistence() {
    let module = module_over(Arc::new(InMemoryKeyValueStore::new()));
    let user = UserId::default();

    let assistant = ChatMessage::new_assistant("").with_annotation(serde_json::json!({
        "type": "tool_call",
        "data": {
            "state": "call",
            "toolCallId": "call-1",
            "toolName": "search",
            "args": "{\"query\":\"rust\"}"
        }
    }));
    let saved = module
        .save_chat(SaveChatCommand::new(
            None,
            user.clone(),
            vec![ChatMessage::new_user("look it up"), assistant],
        ))
        .await
        .unwrap();

    let chat = module
        .get_chat(GetChatQuery::new(saved.chat.id().clone(), user))
        .await
        .unwrap()
        .unwrap();
    let annotation = ToolCallAnnotation::last_from(chat.messages()[1].annotations()).unwrap();
    assert_eq!(annotation.tool_name, "search");
    assert_eq!(
        annotation.args,
        Some(serde_json::json!({ "query": "rust" }))
    );
}
