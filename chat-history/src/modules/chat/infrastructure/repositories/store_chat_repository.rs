use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::modules::chat::domain::{Chat, ChatId, UserId};
use crate::modules::chat::ports::{ChatPage, ChatRepository, Pagination, RepositoryError};
use crate::modules::store::{HashLookup, InMemoryKeyValueStore, PipelineReply, StoreHandle};

/// 键值存储对话仓储
pub struct StoreChatRepository {
    store: StoreHandle,
}

impl StoreChatRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// 基于内存存储创建（用于开发和测试）
    pub fn in_memory() -> Self {
        Self::new(StoreHandle::new(Arc::new(InMemoryKeyValueStore::new())))
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// 解码一条记录，格式错误的记录记录日志后跳过
    fn decode(key: &str, lookup: HashLookup) -> Option<Chat> {
        let fields = lookup.into_option()?;
        match Chat::from_fields(&fields) {
            Ok(chat) => Some(chat),
            Err(e) => {
                warn!("Skipping malformed chat record {}: {}", key, e);
                None
            }
        }
    }
}

#[async_trait]
impl ChatRepository for StoreChatRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<ChatPage, RepositoryError> {
        if pagination.limit == 0 {
            return Ok(ChatPage::default());
        }

        let limit = pagination.limit as usize;
        let start = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
        // 多取一条用于判断是否还有下一页
        let stop = if pagination.limit == u32::MAX {
            -1
        } else {
            start.saturating_add(i64::from(pagination.limit))
        };

        let mut keys = self
            .store
            .range_by_rank(&user_id.chats_key(), start, stop, true)
            .await?;
        let has_more = keys.len() > limit;
        keys.truncate(limit);

        if keys.is_empty() {
            return Ok(ChatPage {
                chats: Vec::new(),
                has_more,
            });
        }

        let replies = keys
            .iter()
            .fold(self.store.pipeline(), |pipeline, key| {
                pipeline.get_all_fields(key.as_str())
            })
            .submit()
            .await?;

        let chats: Vec<Chat> = keys
            .iter()
            .zip(replies)
            .filter_map(|(key, reply)| Self::decode(key, reply.into_hash()?))
            .collect();

        debug!(
            "Loaded {} of {} chats for user {}",
            chats.len(),
            keys.len(),
            user_id
        );

        Ok(ChatPage { chats, has_more })
    }

    async fn get(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        match self.store.get_all_fields(&id.storage_key()).await? {
            HashLookup::Found(fields) => Ok(Some(Chat::from_fields(&fields)?)),
            HashLookup::NotFound => Ok(None),
        }
    }

    async fn save(&self, chat: &Chat) -> Result<(), RepositoryError> {
        let key = chat.id().storage_key();
        let fields = chat.to_fields()?;
        let score = Utc::now().timestamp_millis() as f64;

        self.store
            .pipeline()
            .set_fields(key.clone(), fields)
            .insert_or_update(chat.user_id().chats_key(), score, key)
            .submit()
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &ChatId, user_id: &UserId) -> Result<bool, RepositoryError> {
        let key = id.storage_key();
        let replies = self
            .store
            .pipeline()
            .delete_key(key.clone())
            .remove_member(user_id.chats_key(), key)
            .submit()
            .await?;

        Ok(matches!(replies.first(), Some(PipelineReply::Deleted(n)) if *n > 0))
    }

    async fn clear(&self, user_id: &UserId) -> Result<usize, RepositoryError> {
        let user_key = user_id.chats_key();
        let keys = self.store.range_by_rank(&user_key, 0, -1, false).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        keys.iter()
            .fold(self.store.pipeline(), |pipeline, key| {
                pipeline
                    .delete_key(key.as_str())
                    .remove_member(user_key.as_str(), key.as_str())
            })
            .submit()
            .await?;

        debug!("Cleared {} chats for user {}", keys.len(), user_id);
        Ok(keys.len())
    }

    async fn share(
        &self,
        id: &ChatId,
        user_id: &UserId,
    ) -> Result<Option<Chat>, RepositoryError> {
        let mut chat = match self.get(id).await? {
            Some(chat) if chat.is_owned_by(user_id) => chat,
            _ => return Ok(None),
        };

        chat.share();
        self.store
            .set_fields(&id.storage_key(), &chat.share_fields())
            .await?;

        Ok(Some(chat))
    }

    async fn get_shared(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        Ok(self.get(id).await?.filter(Chat::is_shared))
    }
}
