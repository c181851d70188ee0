use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// 用户消息
    User,
    /// AI 助手消息
    Assistant,
    /// 系统消息
    System,
    /// 工具调用结果
    Tool,
    /// 流式附加数据
    Data,
}

/// 对话消息
///
/// 属于 Chat 聚合，以 JSON 数组整体存入对话哈希
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// 消息唯一标识
    id: String,
    /// 消息角色
    role: MessageRole,
    /// 消息内容
    content: String,
    /// 创建时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    /// 附加注解（工具调用、相关问题等），原样保存
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<serde_json::Value>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            role,
            content: content.into(),
            created_at: Some(Utc::now()),
            annotations: Vec::new(),
        }
    }

    /// 创建用户消息
    pub fn new_user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// 创建助手消息
    pub fn new_assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// 创建系统消息
    pub fn new_system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn with_annotation(mut self, annotation: serde_json::Value) -> Self {
        self.annotations.push(annotation);
        self
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn annotations(&self) -> &[serde_json::Value] {
        &self.annotations
    }

    /// 追加内容（用于流式响应）
    pub fn append_content(&mut self, chunk: &str) {
        self.content.push_str(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_message() {
        let msg = ChatMessage::new_user("Hello, AI!");

        assert_eq!(msg.role(), MessageRole::User);
        assert_eq!(msg.content(), "Hello, AI!");
        assert!(msg.annotations().is_empty());
    }

    #[test]
    fn test_append_content() {
        let mut msg = ChatMessage::new_assistant("Hello");
        msg.append_content(" World!");

        assert_eq!(msg.content(), "Hello World!");
    }

    #[test]
    fn test_deserialize_minimal_message() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"id":"m1","role":"tool","content":"{}"}"#).unwrap();

        assert_eq!(msg.role(), MessageRole::Tool);
        assert!(msg.created_at().is_none());
    }
}
