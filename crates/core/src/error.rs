//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a deterministic usage failure. Aggregates raise
/// them before touching their own state, so a caller that receives one can
/// rely on the aggregate being exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A state-machine guard rejected the requested transition.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A collaborator lookup did not recognise the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// The aggregate is in a state the requested read cannot interpret.
    #[error("unsupported state: {0}")]
    UnsupportedState(String),

    /// A shared resource, such as the id sequence, cannot satisfy the request.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unsupported_state(msg: impl Into<String>) -> Self {
        Self::UnsupportedState(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether this error came from a state-machine guard.
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
