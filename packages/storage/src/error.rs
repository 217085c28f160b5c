use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage failures. None of these imply a partial write happened; callers
/// keep their in-memory state and may retry.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable during {operation}: {reason}")]
    Unavailable { operation: &'static str, reason: String },

    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    #[error("Invalid template id '{0}'")]
    InvalidTemplateId(String),

    /// A stored record exists but does not decode
    #[error("Corrupt record {path}: {reason}")]
    CorruptRecord { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn unavailable(operation: &'static str, reason: impl ToString) -> Self {
        StorageError::Unavailable {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Unavailable { .. })
    }
}
