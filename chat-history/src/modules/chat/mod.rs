// Chat Module - 对话历史模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含对话实体、值对象和工具调用解析
// - ports: 端口层，定义对话仓储接口
// - infrastructure: 基础设施层，基于键值存储的仓储实现
// - application: 应用层，实现 CQRS 命令和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    // Traits
    ApplicationError,
    // Commands
    ClearChatsCommand,
    ClearChatsHandler,
    ClearChatsResponse,
    CommandHandler,
    DeleteChatCommand,
    DeleteChatHandler,
    DeleteChatResponse,
    // Queries
    GetChatHandler,
    GetChatQuery,
    GetSharedChatHandler,
    GetSharedChatQuery,
    ListChatsHandler,
    ListChatsQuery,
    ListChatsResponse,
    QueryHandler,
    SaveChatCommand,
    SaveChatHandler,
    SaveChatResponse,
    ShareChatCommand,
    ShareChatHandler,
    ShareChatResponse,
};

pub use domain::{
    Chat, ChatId, ChatMessage, ChatRecordError, InvalidIdentifier, MessageRole,
    ToolCallAnnotation, ToolCallState, UserId,
};

pub use infrastructure::StoreChatRepository;

pub use ports::{ChatPage, ChatRepository, Pagination, RepositoryError};

use std::sync::Arc;

use crate::modules::store::{self, StoreError};

/// Chat 模块容器
///
/// 管理模块内的依赖注入
pub struct ChatModule {
    chat_repository: Arc<dyn ChatRepository>,
    // Handlers
    save_chat_handler: SaveChatHandler,
    delete_chat_handler: DeleteChatHandler,
    clear_chats_handler: ClearChatsHandler,
    share_chat_handler: ShareChatHandler,
    get_chat_handler: GetChatHandler,
    list_chats_handler: ListChatsHandler,
    get_shared_chat_handler: GetSharedChatHandler,
}

impl ChatModule {
    /// 使用进程级共享连接创建 ChatModule（生产环境）
    ///
    /// # Errors
    /// 配置缺失或客户端无法构建时返回错误
    pub async fn connect() -> Result<Self, StoreError> {
        let handle = store::acquire().await?;
        Ok(Self::with_repository(Arc::new(StoreChatRepository::new(
            handle,
        ))))
    }

    /// 创建使用内存存储的 ChatModule（用于开发测试）
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(StoreChatRepository::in_memory()))
    }

    /// 使用自定义仓储创建 ChatModule
    pub fn with_repository(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self {
            save_chat_handler: SaveChatHandler::new(chat_repository.clone()),
            delete_chat_handler: DeleteChatHandler::new(chat_repository.clone()),
            clear_chats_handler: ClearChatsHandler::new(chat_repository.clone()),
            share_chat_handler: ShareChatHandler::new(chat_repository.clone()),
            get_chat_handler: GetChatHandler::new(chat_repository.clone()),
            list_chats_handler: ListChatsHandler::new(chat_repository.clone()),
            get_shared_chat_handler: GetSharedChatHandler::new(chat_repository.clone()),
            chat_repository,
        }
    }

    // Command handlers

    /// 保存对话
    pub async fn save_chat(
        &self,
        command: SaveChatCommand,
    ) -> Result<SaveChatResponse, ApplicationError> {
        self.save_chat_handler.handle(command).await
    }

    /// 删除对话
    pub async fn delete_chat(
        &self,
        command: DeleteChatCommand,
    ) -> Result<DeleteChatResponse, ApplicationError> {
        self.delete_chat_handler.handle(command).await
    }

    /// 清空用户的全部对话
    pub async fn clear_chats(
        &self,
        command: ClearChatsCommand,
    ) -> Result<ClearChatsResponse, ApplicationError> {
        self.clear_chats_handler.handle(command).await
    }

    /// 分享对话
    pub async fn share_chat(
        &self,
        command: ShareChatCommand,
    ) -> Result<ShareChatResponse, ApplicationError> {
        self.share_chat_handler.handle(command).await
    }

    // Query handlers

    /// 获取对话
    pub async fn get_chat(&self, query: GetChatQuery) -> Result<Option<Chat>, ApplicationError> {
        self.get_chat_handler.handle(query).await
    }

    /// 列出对话
    pub async fn list_chats(
        &self,
        query: ListChatsQuery,
    ) -> Result<ListChatsResponse, ApplicationError> {
        self.list_chats_handler.handle(query).await
    }

    /// 获取已分享的对话
    pub async fn get_shared_chat(
        &self,
        query: GetSharedChatQuery,
    ) -> Result<Option<Chat>, ApplicationError> {
        self.get_shared_chat_handler.handle(query).await
    }

    // Accessors

    /// 获取对话仓储
    pub fn chat_repository(&self) -> &Arc<dyn ChatRepository> {
        &self.chat_repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_module_integration() {
        let module = ChatModule::in_memory();
        let user = UserId::parse("alice").unwrap();

        // 保存对话
        let save_cmd = SaveChatCommand::new(
            None,
            user.clone(),
            vec![ChatMessage::new_user("Integration Test")],
        );
        let saved = module.save_chat(save_cmd).await.unwrap();
        assert!(saved.created);
        let chat_id = saved.chat.id().clone();

        // 获取对话
        let chat = module
            .get_chat(GetChatQuery::new(chat_id.clone(), user.clone()))
            .await
            .unwrap();
        assert_eq!(chat.unwrap().title(), "Integration Test");

        // 列出对话
        let list_resp = module
            .list_chats(ListChatsQuery::first_page(user.clone()))
            .await
            .unwrap();
        assert_eq!(list_resp.chats.len(), 1);

        // 分享
        module
            .share_chat(ShareChatCommand::new(chat_id.clone(), user.clone()))
            .await
            .unwrap();
        let shared = module
            .get_shared_chat(GetSharedChatQuery::new(chat_id.clone()))
            .await
            .unwrap();
        assert!(shared.is_some());

        // 删除对话
        module
            .delete_chat(DeleteChatCommand::new(chat_id, user.clone()))
            .await
            .unwrap();

        // 确认已删除
        let list_resp = module
            .list_chats(ListChatsQuery::first_page(user))
            .await
            .unwrap();
        assert!(list_resp.chats.is_empty());
    }
}
