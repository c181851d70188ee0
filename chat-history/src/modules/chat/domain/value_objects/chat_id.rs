use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::InvalidIdentifier;

const KEY_PREFIX: &str = "chat:";

/// 对话唯一标识符
///
/// 值对象：由前端或服务端生成的不透明字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// 生成新的对话 ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// 从字符串解析，拒绝空白
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidIdentifier(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 对话哈希的存储键
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.0)
    }

    /// 从存储键还原
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(KEY_PREFIX)
            .and_then(|id| Self::parse(id).ok())
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_id_equality() {
        let id1 = ChatId::new();
        let id2 = id1.clone();
        assert_eq!(id1, id2);
        assert_ne!(id1, ChatId::new());
    }

    #[test]
    fn test_chat_id_parse() {
        let id = ChatId::parse(" abc123 ").unwrap();
        assert_eq!(id.to_string(), "abc123");

        assert!(ChatId::parse("").is_err());
        assert!(ChatId::parse("a b").is_err());
    }

    #[test]
    fn test_storage_key_round_trip() {
        let id = ChatId::parse("abc123").unwrap();
        assert_eq!(id.storage_key(), "chat:abc123");
        assert_eq!(ChatId::from_storage_key("chat:abc123"), Some(id));
        assert_eq!(ChatId::from_storage_key("other:abc123"), None);
    }
}
