use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::UserId;
use crate::modules::chat::ports::ChatRepository;

/// 清空对话命令
#[derive(Debug, Clone)]
pub struct ClearChatsCommand {
    pub user_id: UserId,
}

impl ClearChatsCommand {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// 清空对话命令响应
#[derive(Debug, Clone)]
pub struct ClearChatsResponse {
    /// 删除的对话数量
    pub deleted_chats: usize,
}

/// 清空对话命令处理器
pub struct ClearChatsHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl ClearChatsHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl CommandHandler<ClearChatsCommand, ClearChatsResponse> for ClearChatsHandler {
    async fn handle(
        &self,
        command: ClearChatsCommand,
    ) -> Result<ClearChatsResponse, ApplicationError> {
        let deleted_chats = self.chat_repository.clear(&command.user_id).await?;
        if deleted_chats == 0 {
            return Err(ApplicationError::ValidationError(
                "No chats to clear".to_string(),
            ));
        }

        Ok(ClearChatsResponse { deleted_chats })
    }
}
