// Static Config Source
//
// 固定配置来源（用于测试和嵌入式使用）

use crate::modules::config::domain::StoreSettings;
use crate::modules::config::ports::ConfigSource;

/// 固定配置来源
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    settings: StoreSettings,
}

impl StaticConfigSource {
    pub fn new(settings: StoreSettings) -> Self {
        Self { settings }
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self) -> StoreSettings {
        self.settings.clone()
    }
}
