//! Error types for the editor

use pagecraft_storage::StorageError;
use thiserror::Error;

use crate::mutations::MutationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No template is loaded")]
    NotReady,

    #[error("Template '{0}' has no published version")]
    NotPublished(String),
}

impl EditorError {
    /// Validation failures are rejected mutations; the document is unchanged
    pub fn is_validation(&self) -> bool {
        matches!(self, EditorError::Mutation(MutationError::Validation(_)))
    }
}
