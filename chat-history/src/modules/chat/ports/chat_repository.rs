use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{Chat, ChatId, ChatRecordError, UserId};
use crate::modules::store::StoreError;

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ChatRecordError> for RepositoryError {
    fn from(err: ChatRecordError) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// 分页参数
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// 不分页，取全部
    pub fn unbounded() -> Self {
        Self {
            page: 1,
            limit: u32::MAX,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// 一页对话（按最近活动倒序）
#[derive(Debug, Clone, Default)]
pub struct ChatPage {
    pub chats: Vec<Chat>,
    pub has_more: bool,
}

/// 对话仓储端口
///
/// 定义对话历史持久化的抽象接口
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 按最近活动倒序列出用户的对话
    async fn find_by_user(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<ChatPage, RepositoryError>;

    /// 根据 ID 获取对话
    async fn get(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError>;

    /// 保存对话（创建或更新），并刷新最近活动时间
    async fn save(&self, chat: &Chat) -> Result<(), RepositoryError>;

    /// 删除对话，返回是否确实删除了记录
    async fn delete(&self, id: &ChatId, user_id: &UserId) -> Result<bool, RepositoryError>;

    /// 删除用户的全部对话，返回删除数量
    async fn clear(&self, user_id: &UserId) -> Result<usize, RepositoryError>;

    /// 分享对话（仅限所有者），返回更新后的对话
    async fn share(&self, id: &ChatId, user_id: &UserId)
        -> Result<Option<Chat>, RepositoryError>;

    /// 获取已分享的对话
    async fn get_shared(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError>;
}
