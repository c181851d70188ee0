use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Chat, ChatId, ChatMessage, UserId};
use crate::modules::chat::ports::ChatRepository;

/// 保存对话命令
#[derive(Debug, Clone)]
pub struct SaveChatCommand {
    /// 对话 ID（为空时创建新对话）
    pub chat_id: Option<ChatId>,
    pub user_id: UserId,
    /// 对话的完整消息列表
    pub messages: Vec<ChatMessage>,
}

impl SaveChatCommand {
    pub fn new(chat_id: Option<ChatId>, user_id: UserId, messages: Vec<ChatMessage>) -> Self {
        Self {
            chat_id,
            user_id,
            messages,
        }
    }
}

/// 保存对话命令响应
#[derive(Debug, Clone)]
pub struct SaveChatResponse {
    pub chat: Chat,
    /// 是否为新建
    pub created: bool,
}

/// 保存对话命令处理器
pub struct SaveChatHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl SaveChatHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl CommandHandler<SaveChatCommand, SaveChatResponse> for SaveChatHandler {
    async fn handle(&self, command: SaveChatCommand) -> Result<SaveChatResponse, ApplicationError> {
        if command.messages.is_empty() {
            return Err(ApplicationError::ValidationError(
                "Chat has no messages".to_string(),
            ));
        }

        let existing = match &command.chat_id {
            Some(id) => self.chat_repository.get(id).await?,
            None => None,
        };

        let (chat, created) = match existing {
            Some(mut chat) => {
                // 他人的对话按不存在处理
                if !chat.is_owned_by(&command.user_id) {
                    return Err(ApplicationError::ChatNotFound(chat.id().to_string()));
                }
                chat.replace_messages(command.messages);
                (chat, false)
            }
            None => {
                let id = command.chat_id.unwrap_or_default();
                (Chat::new(id, command.user_id, command.messages), true)
            }
        };

        self.chat_repository.save(&chat).await?;

        Ok(SaveChatResponse { chat, created })
    }
}
