use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{Chat, UserId};
use crate::modules::chat::ports::{ChatPage, ChatRepository, Pagination};

/// 列出对话查询
#[derive(Debug, Clone)]
pub struct ListChatsQuery {
    pub user_id: UserId,
    pub page: u32,
    pub limit: u32,
}

impl ListChatsQuery {
    pub fn new(user_id: UserId, page: u32, limit: u32) -> Self {
        Self {
            user_id,
            page,
            limit,
        }
    }

    /// 默认分页（第 1 页，每页 20 条）
    pub fn first_page(user_id: UserId) -> Self {
        let Pagination { page, limit } = Pagination::default();
        Self::new(user_id, page, limit)
    }
}

/// 列出对话响应
#[derive(Debug, Clone)]
pub struct ListChatsResponse {
    pub chats: Vec<Chat>,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

/// 列出对话查询处理器
pub struct ListChatsHandler {
    chat_repository: Arc<dyn ChatRepository>,
}

impl ListChatsHandler {
    pub fn new(chat_repository: Arc<dyn ChatRepository>) -> Self {
        Self { chat_repository }
    }
}

#[async_trait]
impl QueryHandler<ListChatsQuery, ListChatsResponse> for ListChatsHandler {
    async fn handle(&self, query: ListChatsQuery) -> Result<ListChatsResponse, ApplicationError> {
        if query.page == 0 || query.limit == 0 {
            return Err(ApplicationError::ValidationError(
                "Page and limit must be positive".to_string(),
            ));
        }

        let pagination = Pagination::new(query.page, query.limit);
        let ChatPage { chats, has_more } = self
            .chat_repository
            .find_by_user(&query.user_id, pagination)
            .await?;

        Ok(ListChatsResponse {
            chats,
            page: query.page,
            limit: query.limit,
            has_more,
        })
    }
}
