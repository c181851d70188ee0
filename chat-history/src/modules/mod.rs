// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - chat: 对话历史模块，处理对话的保存、列出、分享与删除
// - config: 配置模块，处理存储连接设置
// - store: 存储客户端模块，封装托管键值服务

pub mod chat;
pub mod config;
pub mod store;

pub use chat::ChatModule;
pub use config::{ConfigError, StoreConfig};
pub use store::{ConnectionManager, StoreHandle};
