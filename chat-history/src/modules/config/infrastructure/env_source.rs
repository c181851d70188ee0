// Environment Config Source
//
// 从进程环境变量读取存储配置

use tracing::warn;

use crate::modules::config::domain::{StoreSettings, TIMEOUT_VAR, TOKEN_VAR, URL_VAR};
use crate::modules::config::ports::ConfigSource;

/// 环境变量配置来源
#[derive(Debug, Clone, Default)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for EnvConfigSource {
    fn load(&self) -> StoreSettings {
        let timeout_secs = std::env::var(TIMEOUT_VAR).ok().and_then(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| warn!("Ignoring {}={:?}: {}", TIMEOUT_VAR, raw, e))
                .ok()
        });

        StoreSettings {
            url: std::env::var(URL_VAR).ok(),
            token: std::env::var(TOKEN_VAR).ok(),
            timeout_secs,
        }
    }
}
