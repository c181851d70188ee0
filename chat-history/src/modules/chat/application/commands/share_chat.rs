use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Chat, ChatId, UserId};
use crate::modules::chat::ports::ChatRepository;

/// 分享对话命令
#[derive(Debug, Clone)]
pub struct ShareChatCommand {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl ShareChatCommand {
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self { chat_id, user_id }
    }
}

/// 分享对话响应
#[derive(Debug, Clone)]
pub struct ShareChatResponse {
    pub chat: Chat,
}

/// 分享对话处理器
pub struct ShareChatHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl ShareChatHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl CommandHandler<ShareChatCommand, ShareChatResponse> for ShareChatHandler {
    async fn handle(&self, command: ShareChatCommand) -> Result<ShareChatResponse, ApplicationError> {
        let chat = self
            .chat_repository
            .share(&command.chat_id, &command.user_id)
            .await?
            .ok_or_else(|| ApplicationError::ChatNotFound(command.chat_id.to_string()))?;

        Ok(ShareChatResponse { chat })
    }
}
