// Upstash REST 适配器
//
// 命令以 JSON 数组发送，单条命令 POST 到根路径，批量命令 POST 到 /pipeline

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::config::StoreConfig;
use crate::modules::store::domain::{
    FieldMap, HashLookup, PipelineCommand, PipelineReply, RankRange, ScoreUpdate,
};
use crate::modules::store::ports::{KeyValueStore, StoreConnector, StoreError};

/// REST 响应格式
#[derive(Debug, Deserialize)]
struct UpstashResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Upstash REST 键值存储
pub struct UpstashRestStore {
    config: StoreConfig,
    client: Client,
}

impl UpstashRestStore {
    /// 创建新的客户端实例
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// 获取配置的只读引用
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            self.config.url().to_string()
        } else {
            format!("{}/{}", self.config.url(), endpoint)
        }
    }

    /// 发送请求并返回解析后的响应体
    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        command: &str,
        body: &Value,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.api_url(endpoint))
            .bearer_auth(self.config.token())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StoreError::Timeout(Duration::from_secs(self.config.timeout_secs()))
                } else {
                    StoreError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let err = classify_failure(command, status.as_u16(), error_text);
            error!("Store request failed: {} - {}", status, err);
            return Err(err);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    /// 执行单条命令
    async fn run(&self, name: &str, args: Vec<String>) -> Result<Value, StoreError> {
        debug!("Store command {} {}", name, args.get(1).map(String::as_str).unwrap_or(""));

        let body = Value::from(args);
        let response: UpstashResponse = self.post("", name, &body).await?;
        unwrap_result(name, response)
    }

    async fn run_command(&self, command: PipelineCommand) -> Result<PipelineReply, StoreError> {
        let value = self.run(command.name(), encode_command(&command)).await?;
        decode_reply(&command, value)
    }
}

/// 非 2xx 响应分类
///
/// 400 且响应体带 `error` 时为命令本身出错，其余按 API 错误处理
fn classify_failure(command: &str, status: u16, body: String) -> StoreError {
    let message = serde_json::from_str::<UpstashResponse>(&body)
        .ok()
        .and_then(|r| r.error);

    match message {
        Some(message) if status == 400 => StoreError::Command {
            command: command.to_string(),
            message,
        },
        Some(message) => StoreError::Api { status, message },
        None => StoreError::Api {
            status,
            message: body,
        },
    }
}

fn unwrap_result(name: &str, response: UpstashResponse) -> Result<Value, StoreError> {
    match response.error {
        Some(message) => Err(StoreError::Command {
            command: name.to_string(),
            message,
        }),
        None => Ok(response.result.unwrap_or(Value::Null)),
    }
}

/// 将命令编码为 REST 参数数组
pub fn encode_command(command: &PipelineCommand) -> Vec<String> {
    let mut args = vec![command.name().to_string(), command.key().to_string()];
    match command {
        PipelineCommand::SetFields { fields, .. } => {
            for (field, value) in fields {
                args.push(field.clone());
                args.push(value.clone());
            }
        }
        PipelineCommand::InsertOrUpdate { score, member, .. } => {
            // CH: 分数变化也计入返回值
            args.push("CH".to_string());
            args.push(score.to_string());
            args.push(member.clone());
        }
        PipelineCommand::RemoveMember { member, .. } => args.push(member.clone()),
        PipelineCommand::DeleteKey { .. } | PipelineCommand::GetAllFields { .. } => {}
    }
    args
}

/// 编码排名区间读取
pub fn encode_range(key: &str, range: RankRange) -> Vec<String> {
    let mut args = vec![
        "ZRANGE".to_string(),
        key.to_string(),
        range.start.to_string(),
        range.stop.to_string(),
    ];
    if range.reverse {
        args.push("REV".to_string());
    }
    args
}

/// 按命令类型解析返回值
pub fn decode_reply(command: &PipelineCommand, value: Value) -> Result<PipelineReply, StoreError> {
    match command {
        PipelineCommand::SetFields { .. } => {
            decode_count(command.name(), &value)?;
            Ok(PipelineReply::Ack)
        }
        PipelineCommand::InsertOrUpdate { .. } => Ok(PipelineReply::Score(
            ScoreUpdate::from_changed_count(decode_count(command.name(), &value)?),
        )),
        PipelineCommand::RemoveMember { .. } => {
            Ok(PipelineReply::Removed(decode_count(command.name(), &value)?))
        }
        PipelineCommand::DeleteKey { .. } => {
            Ok(PipelineReply::Deleted(decode_count(command.name(), &value)?))
        }
        PipelineCommand::GetAllFields { .. } => Ok(PipelineReply::Hash(decode_hash(value)?)),
    }
}

fn decode_count(name: &str, value: &Value) -> Result<u64, StoreError> {
    value.as_u64().ok_or_else(|| {
        StoreError::InvalidResponse(format!("{} expected an integer, got {}", name, value))
    })
}

fn decode_strings(value: Value) -> Result<Vec<String>, StoreError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(StoreError::InvalidResponse(format!(
                    "expected a string element, got {}",
                    other
                ))),
            })
            .collect(),
        other => Err(StoreError::InvalidResponse(format!(
            "expected an array, got {}",
            other
        ))),
    }
}

/// 解析 HGETALL 的扁平数组 [field, value, ...]
pub fn decode_hash(value: Value) -> Result<HashLookup, StoreError> {
    let flat = decode_strings(value)?;
    if flat.len() % 2 != 0 {
        return Err(StoreError::InvalidResponse(format!(
            "HGETALL returned an odd number of elements ({})",
            flat.len()
        )));
    }

    let mut fields = FieldMap::new();
    let mut iter = flat.into_iter();
    while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
        fields.insert(field, value);
    }
    Ok(HashLookup::from_fields(fields))
}

#[async_trait]
impl KeyValueStore for UpstashRestStore {
    async fn range_by_rank(&self, key: &str, range: RankRange) -> Result<Vec<String>, StoreError> {
        let value = self.run("ZRANGE", encode_range(key, range)).await?;
        decode_strings(value)
    }

    async fn get_all_fields(&self, key: &str) -> Result<HashLookup, StoreError> {
        let command = PipelineCommand::GetAllFields {
            key: key.to_string(),
        };
        match self.run_command(command).await? {
            PipelineReply::Hash(lookup) => Ok(lookup),
            other => Err(unexpected_reply("HGETALL", &other)),
        }
    }

    async fn set_fields(&self, key: &str, fields: &FieldMap) -> Result<(), StoreError> {
        let command = PipelineCommand::SetFields {
            key: key.to_string(),
            fields: fields.clone(),
        };
        self.run_command(command).await.map(|_| ())
    }

    async fn insert_or_update(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<ScoreUpdate, StoreError> {
        let command = PipelineCommand::InsertOrUpdate {
            key: key.to_string(),
            score,
            member: member.to_string(),
        };
        match self.run_command(command).await? {
            PipelineReply::Score(update) => Ok(update),
            other => Err(unexpected_reply("ZADD", &other)),
        }
    }

    async fn delete_key(&self, key: &str) -> Result<u64, StoreError> {
        let command = PipelineCommand::DeleteKey {
            key: key.to_string(),
        };
        match self.run_command(command).await? {
            PipelineReply::Deleted(count) => Ok(count),
            other => Err(unexpected_reply("DEL", &other)),
        }
    }

    async fn remove_member(&self, key: &str, member: &str) -> Result<u64, StoreError> {
        let command = PipelineCommand::RemoveMember {
            key: key.to_string(),
            member: member.to_string(),
        };
        match self.run_command(command).await? {
            PipelineReply::Removed(count) => Ok(count),
            other => Err(unexpected_reply("ZREM", &other)),
        }
    }

    async fn execute(
        &self,
        commands: Vec<PipelineCommand>,
    ) -> Result<Vec<PipelineReply>, StoreError> {
        debug!("Store pipeline with {} commands", commands.len());

        let body = Value::from(
            commands
                .iter()
                .map(|c| Value::from(encode_command(c)))
                .collect::<Vec<_>>(),
        );
        let responses: Vec<UpstashResponse> = self.post("pipeline", "PIPELINE", &body).await?;
        decode_pipeline(&commands, responses)
    }
}

/// 按入队顺序解析批量响应
///
/// 数量不符或任一命令出错都使整批失败，错误信息带出错命令的序号
fn decode_pipeline(
    commands: &[PipelineCommand],
    responses: Vec<UpstashResponse>,
) -> Result<Vec<PipelineReply>, StoreError> {
    if responses.len() != commands.len() {
        return Err(StoreError::InvalidResponse(format!(
            "pipeline returned {} results for {} commands",
            responses.len(),
            commands.len()
        )));
    }

    commands
        .iter()
        .zip(responses)
        .enumerate()
        .map(|(index, (command, response))| {
            let value = unwrap_result(command.name(), response).map_err(|e| match e {
                StoreError::Command { command, message } => StoreError::Command {
                    command,
                    message: format!("pipeline index {}: {}", index, message),
                },
                other => other,
            })?;
            decode_reply(command, value)
        })
        .collect()
}

fn unexpected_reply(command: &str, reply: &PipelineReply) -> StoreError {
    StoreError::InvalidResponse(format!("{} produced unexpected reply {:?}", command, reply))
}

/// Upstash 连接器
#[derive(Debug, Clone, Default)]
pub struct UpstashConnector;

impl StoreConnector for UpstashConnector {
    fn connect(&self, config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        Ok(Arc::new(UpstashRestStore::new(config.clone())?))
    }
}
