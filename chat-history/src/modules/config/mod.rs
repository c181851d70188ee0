// Config Module
//
// 存储连接配置模块
//
// 层次结构:
// - domain: 配置实体与校验
// - ports: 配置来源端口与错误类型
// - infrastructure: 环境变量与固定配置来源

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{StoreConfig, StoreSettings, TIMEOUT_VAR, TOKEN_VAR, URL_VAR};
pub use infrastructure::{EnvConfigSource, StaticConfigSource};
pub use ports::{ConfigError, ConfigSource};
