use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::modules::config::{ConfigError, StoreConfig};
use crate::modules::store::domain::{
    FieldMap, HashLookup, PipelineCommand, PipelineReply, RankRange, ScoreUpdate,
};

/// 存储错误类型
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Command {command} failed: {message}")]
    Command { command: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// 是否为句柄建立之后的往返失败
    pub fn is_round_trip_failure(&self) -> bool {
        !matches!(self, StoreError::Configuration(_) | StoreError::Connection(_))
    }
}

/// 键值存储端口
///
/// 每个方法对应一次网络往返，失败时不做重试
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 按排名读取有序集合成员
    async fn range_by_rank(&self, key: &str, range: RankRange) -> Result<Vec<String>, StoreError>;

    /// 读取整张哈希
    async fn get_all_fields(&self, key: &str) -> Result<HashLookup, StoreError>;

    /// 写入哈希字段（只覆盖给定字段）
    async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError>;

    /// 插入或更新有序集合成员的分数
    async fn insert_or_update(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<ScoreUpdate, StoreError>;

    /// 删除键，返回实际删除数
    async fn delete_key(&self, key: &str) -> Result<u64, StoreError>;

    /// 移除有序集合成员，返回实际移除数
    async fn remove_member(&self, key: &str, member: &str) -> Result<u64, StoreError>;

    /// 在一次往返中按顺序执行一批命令
    async fn execute(&self, commands: Vec<PipelineCommand>)
        -> Result<Vec<PipelineReply>, StoreError>;

    /// 释放底层资源
    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// 存储连接器端口 - 根据配置构造客户端
pub trait StoreConnector: Send + Sync {
    fn connect(&self, config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError>;
}
