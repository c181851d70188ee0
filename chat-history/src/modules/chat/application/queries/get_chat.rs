use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{Chat, ChatId, UserId};
use crate::modules::chat::ports::ChatRepository;

/// 获取对话查询
#[derive(Debug, Clone)]
pub struct GetChatQuery {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl GetChatQuery {
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self { chat_id, user_id }
    }
}

/// 获取对话查询处理器
pub struct GetChatHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl GetChatHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl QueryHandler<GetChatQuery, Option<Chat>> for GetChatHandler {
    async fn handle(&self, query: GetChatQuery) -> Result<Option<Chat>, ApplicationError> {
        let chat = self
            .chat_repository
            .get(&query.chat_id)
            .await?
            .filter(|chat| chat.is_owned_by(&query.user_id));

        Ok(chat)
    }
}
