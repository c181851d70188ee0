// Config Source Port
//
// 配置来源端口定义

use thiserror::Error;

use crate::modules::config::domain::StoreSettings;

/// 配置错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// 配置来源端口 - 每次构建连接时读取一次
pub trait ConfigSource: Send + Sync {
    /// 读取未校验的配置
    fn load(&self) -> StoreSettings;
}
