use thiserror::Error;

use crate::modules::chat::{ApplicationError, RepositoryError};
use crate::modules::config::ConfigError;
use crate::modules::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("{0}")]
    ApplicationError(#[from] ApplicationError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// 是否为"对话不存在"类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::ApplicationError(ApplicationError::ChatNotFound(_))
                | AppError::RepositoryError(RepositoryError::NotFound(_))
        )
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let err: AppError = ConfigError::Missing("UPSTASH_REDIS_REST_URL").into();
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("UPSTASH_REDIS_REST_URL"));
    }

    #[test]
    fn test_not_found_detection() {
        let err: AppError = ApplicationError::ChatNotFound("abc".to_string()).into();
        assert!(err.is_not_found());

        let err: AppError = StoreError::Connection("boom".to_string()).into();
        assert!(!err.is_not_found());
    }
}
