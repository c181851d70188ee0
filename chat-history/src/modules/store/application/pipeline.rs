use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::modules::store::domain::{FieldMap, PipelineCommand, PipelineReply};
use crate::modules::store::ports::{KeyValueStore, StoreError};

/// 批量管道构建器
///
/// 排队不产生网络 I/O；submit 在一次往返中按入队顺序执行全部命令，
/// 应答与命令一一对应。跨键不保证原子性，失败时整批视为状态未知
#[must_use = "a pipeline does nothing until submitted"]
pub struct Pipeline {
    store: Arc<dyn KeyValueStore>,
    commands: Vec<PipelineCommand>,
}

impl Pipeline {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            commands: Vec::new(),
        }
    }

    pub fn set_fields(mut self, key: impl Into<String>, fields: FieldMap) -> Self {
        self.commands.push(PipelineCommand::SetFields {
            key: key.into(),
            fields,
        });
        self
    }

    pub fn insert_or_update(
        mut self,
        key: impl Into<String>,
        score: f64,
        member: impl Into<String>,
    ) -> Self {
        self.commands.push(PipelineCommand::InsertOrUpdate {
            key: key.into(),
            score,
            member: member.into(),
        });
        self
    }

    pub fn remove_member(mut self, key: impl Into<String>, member: impl Into<String>) -> Self {
        self.commands.push(PipelineCommand::RemoveMember {
            key: key.into(),
            member: member.into(),
        });
        self
    }

    pub fn delete_key(mut self, key: impl Into<String>) -> Self {
        self.commands.push(PipelineCommand::DeleteKey { key: key.into() });
        self
    }

    pub fn get_all_fields(mut self, key: impl Into<String>) -> Self {
        self.commands
            .push(PipelineCommand::GetAllFields { key: key.into() });
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 已排队的命令
    pub fn commands(&self) -> &[PipelineCommand] {
        &self.commands
    }

    /// 提交管道
    ///
    /// 空管道直接返回空结果，不发起往返
    pub async fn submit(self) -> Result<Vec<PipelineReply>, StoreError> {
        if self.commands.is_empty() {
            debug!("Skipping empty pipeline");
            return Ok(Vec::new());
        }

        if let Some(index) = self.commands.iter().position(
            |c| matches!(c, PipelineCommand::SetFields { fields, .. } if fields.is_empty()),
        ) {
            return Err(StoreError::Command {
                command: "HSET".to_string(),
                message: format!("pipeline index {}: no fields given", index),
            });
        }

        let expected = self.commands.len();
        debug!(commands = expected, "Submitting pipeline");

        let replies = self.store.execute(self.commands).await.map_err(|e| {
            error!("Pipeline of {} commands failed: {}", expected, e);
            e
        })?;

        if replies.len() != expected {
            return Err(StoreError::InvalidResponse(format!(
                "pipeline returned {} replies for {} commands",
                replies.len(),
                expected
            )));
        }

        Ok(replies)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("commands", &self.commands)
            .finish()
    }
}
