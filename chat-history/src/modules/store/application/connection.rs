// 连接生命周期
//
// 进程级单例句柄：首次 acquire 时构造，release 后下一次 acquire 重新构造。
// 状态由异步互斥锁保护，并发 acquire 最多构造一次客户端

use std::sync::{Arc, OnceLock};
use tokio::sync::Mutex;
use tracing::{error, info};

use super::StoreHandle;
use crate::modules::config::{ConfigSource, EnvConfigSource};
use crate::modules::store::infrastructure::UpstashConnector;
use crate::modules::store::ports::{StoreConnector, StoreError};

/// 句柄状态
enum HandleState {
    Uninitialized,
    Ready(StoreHandle),
}

/// 连接管理器
pub struct ConnectionManager {
    source: Arc<dyn ConfigSource>,
    connector: Arc<dyn StoreConnector>,
    state: Mutex<HandleState>,
}

impl ConnectionManager {
    pub fn new(source: Arc<dyn ConfigSource>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            source,
            connector,
            state: Mutex::new(HandleState::Uninitialized),
        }
    }

    /// 使用环境变量配置与 Upstash 连接器
    pub fn from_env() -> Self {
        Self::new(Arc::new(EnvConfigSource::new()), Arc::new(UpstashConnector))
    }

    /// 获取共享句柄，必要时构造
    ///
    /// # Errors
    /// 配置缺失返回 `StoreError::Configuration`，客户端构造失败返回 `StoreError::Connection`
    pub async fn acquire(&self) -> Result<StoreHandle, StoreError> {
        let mut state = self.state.lock().await;
        if let HandleState::Ready(handle) = &*state {
            return Ok(handle.clone());
        }

        let config = self.source.load().validate().map_err(|e| {
            error!("Store configuration is missing or invalid: {}", e);
            StoreError::Configuration(e)
        })?;

        let store = self.connector.connect(&config).map_err(|e| {
            error!("Failed to connect to store at {}: {}", config.url(), e);
            let cause = match e {
                StoreError::Connection(message) => message,
                other => other.to_string(),
            };
            StoreError::Connection(format!("Could not initialize store client: {}", cause))
        })?;

        info!("Store client initialized for {}", config.url());
        let handle = StoreHandle::new(store);
        *state = HandleState::Ready(handle.clone());
        Ok(handle)
    }

    /// 释放共享句柄
    ///
    /// 幂等；已持有句柄克隆的调用方不受影响。返回是否实际释放了句柄
    pub async fn release(&self) -> Result<bool, StoreError> {
        let previous = {
            let mut state = self.state.lock().await;
            std::mem::replace(&mut *state, HandleState::Uninitialized)
        };

        match previous {
            HandleState::Ready(handle) => {
                handle.close().await?;
                info!("Store client released");
                Ok(true)
            }
            HandleState::Uninitialized => Ok(false),
        }
    }

    /// 当前是否持有句柄
    pub async fn is_ready(&self) -> bool {
        matches!(*self.state.lock().await, HandleState::Ready(_))
    }
}

static DEFAULT_MANAGER: OnceLock<ConnectionManager> = OnceLock::new();

/// 进程级默认连接管理器（环境变量配置）
pub fn default_manager() -> &'static ConnectionManager {
    DEFAULT_MANAGER.get_or_init(ConnectionManager::from_env)
}

/// 获取进程级共享句柄
pub async fn acquire() -> Result<StoreHandle, StoreError> {
    default_manager().acquire().await
}

/// 释放进程级共享句柄
pub async fn release() -> Result<bool, StoreError> {
    default_manager().release().await
}
