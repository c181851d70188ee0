//! Chat history persistence over a hosted REST key-value store.
//!
//! - `modules::store`: 共享存储客户端（原语操作、批量管道、连接生命周期）
//! - `modules::chat`: 对话历史仓储与 CQRS 处理器
//! - `modules::config`: 存储连接配置

pub mod modules;
pub mod shared;

pub use modules::chat::{
    Chat, ChatId, ChatMessage, ChatModule, ChatRepository, MessageRole, StoreChatRepository,
    UserId,
};
pub use modules::config::{ConfigError, ConfigSource, EnvConfigSource, StoreConfig, StoreSettings};
pub use modules::store::{
    acquire, release, ConnectionManager, FieldMap, HashLookup, Pipeline, PipelineReply,
    ScoreUpdate, StoreError, StoreHandle,
};
pub use shared::{init_tracing, AppError, AppResult};
