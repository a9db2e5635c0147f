//! Domain error types

use crate::session::id::SessionId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Turn order violated: {0}")]
    TurnOrder(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl DomainError {
    /// Check if this error is caused by a stale or unknown session id
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::SessionNotFound(_))
    }
}
