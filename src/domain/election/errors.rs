//! Election-specific error types.

use crate::domain::foundation::{CandidateId, DomainError, ElectionId, ErrorCode, ValidationError};

use super::LifecycleState;

/// Errors raised by election administration and the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectionError {
    #[error("Election not found: {0}")]
    NotFound(ElectionId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Election must have at least one candidate")]
    NoCandidates,

    #[error("Candidate listed twice: {0}")]
    DuplicateCandidate(CandidateId),

    #[error("Election cannot be published while {state}")]
    NotClosed { state: LifecycleState },

    #[error("Election results are already published")]
    AlreadyPublished,

    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Someone else wrote the election after it was loaded.
    #[error("Election {0} was changed concurrently; reload and retry")]
    Conflict(ElectionId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ElectionError {
    pub fn not_found(id: ElectionId) -> Self {
        ElectionError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ElectionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ElectionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ElectionError::NotFound(_) => ErrorCode::ElectionNotFound,
            ElectionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ElectionError::NoCandidates => ErrorCode::NoCandidates,
            ElectionError::DuplicateCandidate(_) => ErrorCode::ValidationFailed,
            ElectionError::NotClosed { .. } => ErrorCode::ElectionNotClosed,
            ElectionError::AlreadyPublished => ErrorCode::AlreadyPublished,
            ElectionError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            ElectionError::Conflict(_) => ErrorCode::ConcurrentModification,
            ElectionError::Infrastructure(_) => ErrorCode::StoreError,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ElectionError::Infrastructure(_) | ElectionError::Conflict(_)
        )
    }
}

impl From<ValidationError> for ElectionError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::InvalidFormat { field, .. } if field == "state_transition" => {
                ElectionError::InvalidTransition(err.to_string())
            }
            _ => ElectionError::ValidationFailed {
                field: err.field().to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for ElectionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ElectionNotFound => match err
                .detail("election_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => ElectionError::NotFound(id),
                None => ElectionError::Infrastructure(err.to_string()),
            },
            ErrorCode::ConcurrentModification => match err
                .detail("election_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => ElectionError::Conflict(id),
                None => ElectionError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ElectionError::ValidationFailed {
                field: err
                    .detail("field")
                    .map(str::to_owned)
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ElectionError::Infrastructure(err.to_string()),
        }
    }
}
