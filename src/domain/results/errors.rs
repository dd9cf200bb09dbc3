//! Results-specific error types.

use crate::domain::election::LifecycleState;
use crate::domain::foundation::{DomainError, ElectionId, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultsError {
    #[error("Election not found: {0}")]
    ElectionNotFound(ElectionId),

    #[error("Results are not available while the election is {state}")]
    NotAvailable { state: LifecycleState },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ResultsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ResultsError::ElectionNotFound(_) => ErrorCode::ElectionNotFound,
            ResultsError::NotAvailable { .. } => ErrorCode::ResultsNotAvailable,
            ResultsError::Infrastructure(_) => ErrorCode::StoreError,
        }
    }
}

impl From<DomainError> for ResultsError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ElectionNotFound => match err
                .detail("election_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => ResultsError::ElectionNotFound(id),
                None => ResultsError::Infrastructure(err.to_string()),
            },
            _ => ResultsError::Infrastructure(err.to_string()),
        }
    }
}
