//! Error types for the support chat engine.

use crate::collaborator::RemoteError;

/// Errors from the chat engine.
///
/// The remote variants record which pipeline stage failed, so callers can
/// report the stage without inspecting the wrapped error.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("query condensation failed: {0}")]
    Condense(RemoteError),
    #[error("retrieval failed: {0}")]
    Retrieval(RemoteError),
    #[error("completion failed: {0}")]
    Completion(RemoteError),
    #[error("session store error: {0}")]
    StoreError(String),
}

impl ChatError {
    /// Name of the failed pipeline stage, when the error wraps a remote one.
    pub fn remote_stage(&self) -> Option<&'static str> {
        match self {
            ChatError::Condense(_) => Some("condense"),
            ChatError::Retrieval(_) => Some("retrieval"),
            ChatError::Completion(_) => Some("completion"),
            _ => None,
        }
    }
}
