use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::modules::config::StoreConfig;
use crate::modules::store::domain::{
    FieldMap, HashLookup, PipelineCommand, PipelineReply, RankRange, ScoreUpdate,
};
use crate::modules::store::ports::{KeyValueStore, StoreConnector, StoreError};

/// 键对应的值
#[derive(Debug, Clone)]
enum Entry {
    Hash(FieldMap),
    SortedSet(HashMap<String, f64>),
}

/// 内存键值存储
///
/// 与远端服务语义一致：成员唯一、哈希删除后整体消失。用于开发和测试
pub struct InMemoryKeyValueStore {
    data: RwLock<HashMap<String, Entry>>,
    round_trips: AtomicUsize,
    fail_next: AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            round_trips: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    /// 已执行的往返次数
    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    /// 让下一次往返失败
    pub fn fail_next_round_trip(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// 当前键数量
    pub async fn key_count(&self) -> usize {
        self.data.read().await.len()
    }

    fn begin_round_trip(&self) -> Result<(), StoreError> {
        self.round_trips.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Network("injected failure".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

fn wrong_type(command: &str) -> StoreError {
    StoreError::Command {
        command: command.to_string(),
        message: "WRONGTYPE Operation against a key holding the wrong kind of value".to_string(),
    }
}

/// 按 (分数, 成员) 升序排列
fn ranked(members: &HashMap<String, f64>) -> Vec<(&String, f64)> {
    let mut ranked: Vec<(&String, f64)> = members.iter().map(|(m, s)| (m, *s)).collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

fn range(data: &HashMap<String, Entry>, key: &str, range: RankRange) -> Result<Vec<String>, StoreError> {
    let members = match data.get(key) {
        None => return Ok(Vec::new()),
        Some(Entry::SortedSet(members)) => members,
        Some(Entry::Hash(_)) => return Err(wrong_type("ZRANGE")),
    };

    let mut ordered: Vec<String> = ranked(members).into_iter().map(|(m, _)| m.clone()).collect();
    if range.reverse {
        ordered.reverse();
    }

    Ok(match range.resolve(ordered.len()) {
        Some((start, stop)) => ordered[start..=stop].to_vec(),
        None => Vec::new(),
    })
}

fn apply(data: &mut HashMap<String, Entry>, command: PipelineCommand) -> Result<PipelineReply, StoreError> {
    match command {
        PipelineCommand::SetFields { key, fields } => {
            if fields.is_empty() {
                return Err(StoreError::Command {
                    command: "HSET".to_string(),
                    message: "wrong number of arguments".to_string(),
                });
            }
            match data
                .entry(key)
                .or_insert_with(|| Entry::Hash(FieldMap::new()))
            {
                Entry::Hash(existing) => existing.extend(fields),
                Entry::SortedSet(_) => return Err(wrong_type("HSET")),
            }
            Ok(PipelineReply::Ack)
        }
        PipelineCommand::InsertOrUpdate { key, score, member } => {
            if score.is_nan() {
                return Err(StoreError::Command {
                    command: "ZADD".to_string(),
                    message: "value is not a valid float".to_string(),
                });
            }
            match data
                .entry(key)
                .or_insert_with(|| Entry::SortedSet(HashMap::new()))
            {
                Entry::SortedSet(members) => {
                    let previous = members.insert(member, score);
                    let update = match previous {
                        Some(old) if old == score => ScoreUpdate::Unchanged,
                        _ => ScoreUpdate::Changed,
                    };
                    Ok(PipelineReply::Score(update))
                }
                Entry::Hash(_) => Err(wrong_type("ZADD")),
            }
        }
        PipelineCommand::RemoveMember { key, member } => {
            let (removed, now_empty) = match data.get_mut(&key) {
                None => return Ok(PipelineReply::Removed(0)),
                Some(Entry::SortedSet(members)) => {
                    (members.remove(&member).is_some(), members.is_empty())
                }
                Some(Entry::Hash(_)) => return Err(wrong_type("ZREM")),
            };
            if now_empty {
                data.remove(&key);
            }
            Ok(PipelineReply::Removed(u64::from(removed)))
        }
        PipelineCommand::DeleteKey { key } => {
            Ok(PipelineReply::Deleted(u64::from(data.remove(&key).is_some())))
        }
        PipelineCommand::GetAllFields { key } => match data.get(&key) {
            None => Ok(PipelineReply::Hash(HashLookup::NotFound)),
            Some(Entry::Hash(fields)) => Ok(PipelineReply::Hash(HashLookup::from_fields(
                fields.clone(),
            ))),
            Some(Entry::SortedSet(_)) => Err(wrong_type("HGETALL")),
        },
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn range_by_rank(&self, key: &str, rank_range: RankRange) -> Result<Vec<String>, StoreError> {
        self.begin_round_trip()?;
        let data = self.data.read().await;
        range(&data, key, rank_range)
    }

    async fn get_all_fields(&self, key: &str) -> Result<HashLookup, StoreError> {
        let replies = self
            .execute(vec![PipelineCommand::GetAllFields {
                key: key.to_string(),
            }])
            .await?;
        match replies.into_iter().next() {
            Some(PipelineReply::Hash(lookup)) => Ok(lookup),
            _ => Err(StoreError::InvalidResponse("missing HGETALL reply".to_string())),
        }
    }

    async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
        self.execute(vec![PipelineCommand::SetFields {
            key: key.to_string(),
            fields: fields.clone(),
        }])
        .await
        .map(|_| ())
    }

    async fn insert_or_update(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<ScoreUpdate, StoreError> {
        let replies = self
            .execute(vec![PipelineCommand::InsertOrUpdate {
                key: key.to_string(),
                score,
                member: member.to_string(),
            }])
            .await?;
        match replies.into_iter().next() {
            Some(PipelineReply::Score(update)) => Ok(update),
            _ => Err(StoreError::InvalidResponse("missing ZADD reply".to_string())),
        }
    }

    async fn delete_key(&self, key: &str) -> Result<u64, StoreError> {
        let replies = self
            .execute(vec![PipelineCommand::DeleteKey {
                key: key.to_string(),
            }])
            .await?;
        match replies.into_iter().next() {
            Some(PipelineReply::Deleted(count)) => Ok(count),
            _ => Err(StoreError::InvalidResponse("missing DEL reply".to_string())),
        }
    }

    async fn remove_member(&self, key: &str, member: &str) -> Result<u64, StoreError> {
        let replies = self
            .execute(vec![PipelineCommand::RemoveMember {
                key: key.to_string(),
                member: member.to_string(),
            }])
            .await?;
        match replies.into_iter().next() {
            Some(PipelineReply::Removed(count)) => Ok(count),
            _ => Err(StoreError::InvalidResponse("missing ZREM reply".to_string())),
        }
    }

    async fn execute(
        &self,
        commands: Vec<PipelineCommand>,
    ) -> Result<Vec<PipelineReply>, StoreError> {
        self.begin_round_trip()?;
        let mut data = self.data.write().await;
        commands
            .into_iter()
            .map(|command| apply(&mut data, command))
            .collect()
    }
}

/// 内存存储连接器
///
/// 每次 connect 构造一个新的存储实例，并记录构造次数
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    connections: Arc<AtomicUsize>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已构造的实例数量
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl StoreConnector for InMemoryConnector {
    fn connect(&self, _config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(InMemoryKeyValueStore::new()))
    }
}
