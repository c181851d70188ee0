use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::super::value_objects::{ChatId, UserId};
use super::{ChatMessage, MessageRole};
use crate::modules::store::FieldMap;

const TITLE_MAX_CHARS: usize = 100;
const DEFAULT_TITLE: &str = "新对话";

/// 对话哈希字段名
mod field {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const USER_ID: &str = "userId";
    pub const CREATED_AT: &str = "createdAt";
    pub const PATH: &str = "path";
    pub const MESSAGES: &str = "messages";
    pub const SHARE_PATH: &str = "sharePath";
}

/// 对话记录编解码错误
#[derive(Debug, Error)]
pub enum ChatRecordError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// 对话实体 - 聚合根
///
/// 一次对话的元数据与全部消息，持久化为一张哈希
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    id: ChatId,
    user_id: UserId,
    title: String,
    created_at: DateTime<Utc>,
    /// 前端访问路径
    path: String,
    messages: Vec<ChatMessage>,
    /// 分享路径（仅已分享的对话）
    share_path: Option<String>,
}

impl Chat {
    /// 创建新对话，标题取自第一条用户消息
    pub fn new(id: ChatId, user_id: UserId, messages: Vec<ChatMessage>) -> Self {
        let title = Self::generate_title(&messages);
        let path = format!("/search/{}", id);
        Self {
            id,
            user_id,
            title,
            created_at: Utc::now(),
            path,
            messages,
            share_path: None,
        }
    }

    // Getters
    pub fn id(&self) -> &ChatId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn share_path(&self) -> Option<&str> {
        self.share_path.as_deref()
    }

    pub fn is_shared(&self) -> bool {
        self.share_path.is_some()
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    // 业务方法

    /// 替换消息列表（保存新一轮对话时）
    pub fn replace_messages(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn rename(&mut self, new_title: impl Into<String>) {
        self.title = new_title.into();
    }

    /// 标记为已分享，返回分享路径
    pub fn share(&mut self) -> &str {
        let share_path = format!("/share/{}", self.id);
        self.share_path.insert(share_path)
    }

    /// 根据第一条用户消息生成标题（前 100 个字符）
    pub fn generate_title(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .find(|m| m.role() == MessageRole::User)
            .map(|m| m.content().trim())
            .filter(|content| !content.is_empty())
            .map(|content| content.chars().take(TITLE_MAX_CHARS).collect())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// 编码为哈希字段
    pub fn to_fields(&self) -> Result<FieldMap, ChatRecordError> {
        let messages =
            serde_json::to_string(&self.messages).map_err(|e| ChatRecordError::InvalidField {
                field: field::MESSAGES,
                reason: e.to_string(),
            })?;

        let mut fields = FieldMap::new();
        fields.insert(field::ID.to_string(), self.id.to_string());
        fields.insert(field::TITLE.to_string(), self.title.clone());
        fields.insert(field::USER_ID.to_string(), self.user_id.to_string());
        fields.insert(field::CREATED_AT.to_string(), self.created_at.to_rfc3339());
        fields.insert(field::PATH.to_string(), self.path.clone());
        fields.insert(field::MESSAGES.to_string(), messages);
        if let Some(share_path) = &self.share_path {
            fields.insert(field::SHARE_PATH.to_string(), share_path.clone());
        }
        Ok(fields)
    }

    /// 只包含分享路径的字段（分享时局部更新）
    pub fn share_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(share_path) = &self.share_path {
            fields.insert(field::SHARE_PATH.to_string(), share_path.clone());
        }
        fields
    }

    /// 从哈希字段解码
    pub fn from_fields(fields: &FieldMap) -> Result<Self, ChatRecordError> {
        let get = |name: &'static str| {
            fields
                .get(name)
                .map(String::as_str)
                .ok_or(ChatRecordError::MissingField(name))
        };
        let invalid = |name: &'static str, reason: String| ChatRecordError::InvalidField {
            field: name,
            reason,
        };

        let id = ChatId::parse(get(field::ID)?).map_err(|e| invalid(field::ID, e.to_string()))?;
        let user_id = fields
            .get(field::USER_ID)
            .map(|raw| UserId::parse(raw).map_err(|e| invalid(field::USER_ID, e.to_string())))
            .transpose()?
            .unwrap_or_default();
        let messages: Vec<ChatMessage> = serde_json::from_str(get(field::MESSAGES)?)
            .map_err(|e| invalid(field::MESSAGES, e.to_string()))?;
        let created_at = parse_timestamp(get(field::CREATED_AT)?)
            .ok_or_else(|| invalid(field::CREATED_AT, "unrecognized timestamp".to_string()))?;

        let title = fields
            .get(field::TITLE)
            .cloned()
            .unwrap_or_else(|| Self::generate_title(&messages));
        let path = fields
            .get(field::PATH)
            .cloned()
            .unwrap_or_else(|| format!("/search/{}", id));

        Ok(Self {
            id,
            user_id,
            title,
            created_at,
            path,
            messages,
            share_path: fields.get(field::SHARE_PATH).cloned(),
        })
    }
}

/// 接受 RFC 3339 字符串或毫秒时间戳
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
}
