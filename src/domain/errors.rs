//! Domain errors for the content pipeline.

use thiserror::Error;
use uuid::Uuid;

use super::models::Workstream;

/// Domain-level errors that can occur in the pipeline and settlement loop.
///
/// Gate evaluation never produces one of these: a gate that finds problems
/// reports `needs_fix` in its [`GateResult`](super::models::GateResult).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No active play for workstream: {0}")]
    NoActivePlay(Workstream),

    #[error("No arms available for selection")]
    NoArmsAvailable,

    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    #[error("Publish failed: {0}")]
    PublishFailure(String),

    #[error("Invalid workstream: {0}")]
    InvalidWorkstream(String),

    #[error("Attempt already settled: {0}")]
    AlreadySettled(Uuid),

    #[error("Play not found: {0}")]
    PlayNotFound(String),

    #[error("Attempt not found: {0}")]
    AttemptNotFound(Uuid),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Errors that a settlement batch swallows instead of counting as failures.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::AlreadySettled(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
