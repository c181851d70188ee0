use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::Pipeline;
use crate::modules::store::domain::{FieldMap, HashLookup, RankRange, ScoreUpdate};
use crate::modules::store::ports::{KeyValueStore, StoreError};

/// 共享的存储句柄
///
/// 克隆开销很小，所有克隆指向同一个底层客户端
#[derive(Clone)]
pub struct StoreHandle {
    store: Arc<dyn KeyValueStore>,
}

impl StoreHandle {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// 两个句柄是否指向同一个客户端实例
    pub fn same_instance(&self, other: &StoreHandle) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    /// 按排名读取有序集合成员（0 起始，两端包含，负数从末尾计）
    pub async fn range_by_rank(
        &self,
        key: &str,
        start: i64,
        stop: i64,
        reverse: bool,
    ) -> Result<Vec<String>, StoreError> {
        let mut range = RankRange::new(start, stop);
        if reverse {
            range = range.reversed();
        }
        debug!(key, start, stop, reverse, "range_by_rank");
        self.store.range_by_rank(key, range).await
    }

    /// 读取整张哈希，不存在时返回 NotFound
    pub async fn get_all_fields(&self, key: &str) -> Result<HashLookup, StoreError> {
        debug!(key, "get_all_fields");
        self.store.get_all_fields(key).await
    }

    /// 写入哈希字段
    pub async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::Command {
                command: "HSET".to_string(),
                message: format!("no fields given for {}", key),
            });
        }
        debug!(key, fields = fields.len(), "set_fields");
        self.store.set_fields(key, fields).await
    }

    /// 插入成员或更新其分数
    pub async fn insert_or_update(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<ScoreUpdate, StoreError> {
        debug!(key, score, member, "insert_or_update");
        self.store.insert_or_update(key, score, member).await
    }

    pub async fn delete_key(&self, key: &str) -> Result<u64, StoreError> {
        debug!(key, "delete_key");
        self.store.delete_key(key).await
    }

    pub async fn remove_member(&self, key: &str, member: &str) -> Result<u64, StoreError> {
        debug!(key, member, "remove_member");
        self.store.remove_member(key, member).await
    }

    /// 创建新的批量管道
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.store.clone())
    }

    pub(crate) async fn close(&self) -> Result<(), StoreError> {
        self.store.close().await
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreHandle")
            .field("store", &Arc::as_ptr(&self.store))
            .finish()
    }
}
