use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{Chat, ChatId};
use crate::modules::chat::ports::ChatRepository;

/// 获取已分享对话查询
#[derive(Debug, Clone)]
pub struct GetSharedChatQuery {
    pub chat_id: ChatId,
}

impl GetSharedChatQuery {
    pub fn new(chat_id: ChatId) -> Self {
        Self { chat_id }
    }
}

/// 获取已分享对话查询处理器
pub struct GetSharedChatHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl GetSharedChatHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl QueryHandler<GetSharedChatQuery, Option<Chat>> for GetSharedChatHandler {
    async fn handle(&self, query: GetSharedChatQuery) -> Result<Option<Chat>, ApplicationError> {
        Ok(self.chat_repository.get_shared(&query.chat_id).await?)
    }
}
