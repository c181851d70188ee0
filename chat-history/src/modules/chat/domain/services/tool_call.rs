// 工具调用注解解析
//
// 流式响应会在旁路数据数组中附带工具调用进度，这里取出最后一条

use serde::{Deserialize, Serialize};
use serde_json::Value;

const TOOL_CALL_TYPE: &str = "tool_call";

/// 工具调用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallState {
    #[default]
    Call,
    Result,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(rename = "type")]
    kind: String,
    data: RawToolCall,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToolCall {
    tool_call_id: String,
    tool_name: String,
    #[serde(default)]
    args: Option<String>,
}

/// 解析后的工具调用
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallAnnotation {
    pub tool_call_id: String,
    pub tool_name: String,
    pub state: ToolCallState,
    /// 参数（JSON 解析失败时为 None）
    pub args: Option<Value>,
}

impl ToolCallAnnotation {
    /// 取旁路数据中的最后一条工具调用
    ///
    /// 最后一项不是工具调用或格式不符时返回 None。
    /// 解析结果总是 `Call` 状态，载荷中的 state 不参与
    pub fn last_from(data: &[Value]) -> Option<Self> {
        let last = data.last()?;
        let raw: RawAnnotation = serde_json::from_value(last.clone()).ok()?;
        if raw.kind != TOOL_CALL_TYPE {
            return None;
        }

        let args = raw
            .data
            .args
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| serde_json::from_str(s).ok());

        Some(Self {
            tool_call_id: raw.data.tool_call_id,
            tool_name: raw.data.tool_name,
            state: ToolCallState::Call,
            args,
        })
    }
}
