// Chat Domain Layer
// 领域层包含对话实体、值对象和领域服务

pub mod entities;
pub mod services;
pub mod value_objects;

// 重导出常用类型
pub use entities::{Chat, ChatMessage, ChatRecordError, MessageRole};
pub use services::{ToolCallAnnotation, ToolCallState};
pub use value_objects::{ChatId, InvalidIdentifier, UserId};
