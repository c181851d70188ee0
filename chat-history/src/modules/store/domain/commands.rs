use super::values::{FieldMap, HashLookup, ScoreUpdate};

/// 批量管道中排队的单个命令
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineCommand {
    SetFields { key: String, fields: FieldMap },
    InsertOrUpdate { key: String, score: f64, member: String },
    RemoveMember { key: String, member: String },
    DeleteKey { key: String },
    GetAllFields { key: String },
}

impl PipelineCommand {
    /// 命令名（用于日志与错误信息）
    pub fn name(&self) -> &'static str {
        match self {
            PipelineCommand::SetFields { .. } => "HSET",
            PipelineCommand::InsertOrUpdate { .. } => "ZADD",
            PipelineCommand::RemoveMember { .. } => "ZREM",
            PipelineCommand::DeleteKey { .. } => "DEL",
            PipelineCommand::GetAllFields { .. } => "HGETALL",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            PipelineCommand::SetFields { key, .. }
            | PipelineCommand::InsertOrUpdate { key, .. }
            | PipelineCommand::RemoveMember { key, .. }
            | PipelineCommand::DeleteKey { key }
            | PipelineCommand::GetAllFields { key } => key,
        }
    }
}

/// 管道中单个命令的应答，与命令一一对应
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineReply {
    /// 字段写入确认
    Ack,
    Score(ScoreUpdate),
    /// 移除的成员数
    Removed(u64),
    /// 删除的键数
    Deleted(u64),
    Hash(HashLookup),
}

impl PipelineReply {
    pub fn into_hash(self) -> Option<HashLookup> {
        match self {
            PipelineReply::Hash(lookup) => Some(lookup),
            _ => None,
        }
    }
}
