use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::modules::store::ports::StoreError;

/// 为存储调用加上调用方超时
///
/// 超时后底层请求不会被撤回，结果视为未知
pub async fn with_timeout<T, F>(duration: Duration, future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Store call exceeded {:?}", duration);
            Err(StoreError::Timeout(duration))
        }
    }
}
