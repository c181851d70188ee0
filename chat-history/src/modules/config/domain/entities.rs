// Config Domain Entities
//
// 存储连接配置实体定义

use serde::{Deserialize, Serialize};

use crate::modules::config::ports::ConfigError;

/// 服务端点环境变量名
pub const URL_VAR: &str = "UPSTASH_REDIS_REST_URL";
/// 访问令牌环境变量名
pub const TOKEN_VAR: &str = "UPSTASH_REDIS_REST_TOKEN";
/// 请求超时环境变量名（可选）
pub const TIMEOUT_VAR: &str = "UPSTASH_REDIS_REST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 未校验的配置值
///
/// 直接来自配置源，字段可能缺失或为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl StoreSettings {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            token: Some(token.into()),
            timeout_secs: None,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// 校验并生成 StoreConfig
    ///
    /// 空白字符串视为缺失
    pub fn validate(self) -> Result<StoreConfig, ConfigError> {
        let url = non_blank(self.url).ok_or(ConfigError::Missing(URL_VAR))?;
        let token = non_blank(self.token).ok_or(ConfigError::Missing(TOKEN_VAR))?;

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "{} must be an http(s) URL, got {:?}",
                URL_VAR, url
            )));
        }

        let timeout_secs = match self.timeout_secs {
            Some(0) => {
                return Err(ConfigError::Invalid(format!(
                    "{} must be greater than zero",
                    TIMEOUT_VAR
                )))
            }
            Some(secs) => secs,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(StoreConfig {
            url: url.trim_end_matches('/').to_string(),
            token,
            timeout_secs,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 已校验的存储连接配置
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    url: String,
    token: String,
    timeout_secs: u64,
}

impl StoreConfig {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

// 令牌不进入日志
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("token", &"***")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
