use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{ChatId, UserId};
use crate::modules::chat::ports::ChatRepository;

/// 删除对话命令
#[derive(Debug, Clone)]
pub struct DeleteChatCommand {
    pub chat_id: ChatId,
    pub user_id: UserId,
}

impl DeleteChatCommand {
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self { chat_id, user_id }
    }
}

/// 删除对话命令响应
#[derive(Debug, Clone)]
pub struct DeleteChatResponse {
    pub chat_id: ChatId,
}

/// 删除对话命令处理器
pub struct DeleteChatHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl DeleteChatHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl CommandHandler<DeleteChatCommand, DeleteChatResponse> for DeleteChatHandler {
    async fn handle(
        &self,
        command: DeleteChatCommand,
    ) -> Result<DeleteChatResponse, ApplicationError> {
        // 验证对话存在且属于该用户
        let owned = self
            .chat_repository
            .get(&command.chat_id)
            .await?
            .is_some_and(|chat| chat.is_owned_by(&command.user_id));
        if !owned {
            return Err(ApplicationError::ChatNotFound(command.chat_id.to_string()));
        }

        self.chat_repository
            .delete(&command.chat_id, &command.user_id)
            .await?;

        Ok(DeleteChatResponse {
            chat_id: command.chat_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Chat, ChatMessage};
    use crate::modules::chat::infrastructure::StoreChatRepository;

    #[tokio::test]
    async fn test_delete_chat() {
        let repo = Arc::new(StoreChatRepository::in_memory());
        let handler = DeleteChatHandler::new(repo.clone());

        let user = UserId::default();
        let chat = Chat::new(ChatId::new(), user.clone(), vec![ChatMessage::new_user("x")]);
        repo.save(&chat).await.unwrap();

        let command = DeleteChatCommand::new(chat.id().clone(), user);
        handler.handle(command).await.unwrap();

        assert!(repo.get(chat.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_chat() {
        let repo = Arc::new(StoreChatRepository::in_memory());
        let handler = DeleteChatHandler::new(repo);

        let command = DeleteChatCommand::new(ChatId::new(), UserId::default());
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::ChatNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_foreign_chat_rejected() {
        let repo = Arc::new(StoreChatRepository::in_memory());
        let handler = DeleteChatHandler::new(repo.clone());

        let chat = Chat::new(
            ChatId::new(),
            UserId::parse("owner").unwrap(),
            vec![ChatMessage::new_user("x")],
        );
        repo.save(&chat).await.unwrap();

        let command = DeleteChatCommand::new(chat.id().clone(), UserId::parse("other").unwrap());
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::ChatNotFound(_))));
        assert!(repo.get(chat.id()).await.unwrap().is_some());
    }
}
