use serde::{Deserialize, Serialize};
use std::fmt;

use super::InvalidIdentifier;

const ANONYMOUS: &str = "anonymous";

/// 用户标识符
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidIdentifier(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 未登录用户
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 用户对话有序集合的存储键
    pub fn chats_key(&self) -> String {
        format!("user:chat:{}", self.0)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
