//! Shared error vocabulary.
//!
//! Value objects fail with [`ValidationError`]. Ports fail with
//! [`DomainError`], which each module narrows into its own enum.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Raised while building an identifier, attribute or window from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyField { .. } => ErrorCode::EmptyField,
            Self::OutOfRange { .. } => ErrorCode::OutOfRange,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

/// Stable machine-readable codes, rendered in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    ElectionNotFound,
    VoterNotFound,

    InvalidStateTransition,
    ElectionNotOpen,
    ElectionNotClosed,
    AlreadyPublished,
    NoCandidates,
    ResultsNotAvailable,
    ConcurrentModification,

    NotEligible,
    InvalidSelection,
    DuplicateVote,
    BiometricFailed,
    CommitFailed,
    SessionBusy,
    SessionTerminal,

    StoreError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::EmptyField => "EMPTY_FIELD",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::ElectionNotFound => "ELECTION_NOT_FOUND",
            Self::VoterNotFound => "VOTER_NOT_FOUND",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::ElectionNotOpen => "ELECTION_NOT_OPEN",
            Self::ElectionNotClosed => "ELECTION_NOT_CLOSED",
            Self::AlreadyPublished => "ALREADY_PUBLISHED",
            Self::NoCandidates => "NO_CANDIDATES",
            Self::ResultsNotAvailable => "RESULTS_NOT_AVAILABLE",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::InvalidSelection => "INVALID_SELECTION",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::BiometricFailed => "BIOMETRIC_FAILED",
            Self::CommitFailed => "COMMIT_FAILED",
            Self::SessionBusy => "SESSION_BUSY",
            Self::SessionTerminal => "SESSION_TERMINAL",
            Self::StoreError => "STORE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every port.
///
/// `details` carries the ids a caller needs to rebuild a typed error,
/// e.g. `election_id` on `ELECTION_NOT_FOUND`.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Storage backend failure; callers treat it as retryable.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_owned();
        Self::new(err.code(), err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_bounds_and_value() {
        let err = ValidationError::out_of_range("class_level", 1, 5, 7);
        assert_eq!(
            err.to_string(),
            "Field 'class_level' must be between 1 and 5, got 7"
        );
        assert_eq!(err.field(), "class_level");
    }

    #[test]
    fn domain_error_renders_code_before_message() {
        let err = DomainError::new(ErrorCode::ElectionNotFound, "no such election");
        assert_eq!(err.to_string(), "[ELECTION_NOT_FOUND] no such election");
    }

    #[test]
    fn details_are_readable_by_key() {
        let err = DomainError::store("write conflict").with_detail("election_id", "abc");

        assert_eq!(err.code, ErrorCode::StoreError);
        assert_eq!(err.detail("election_id"), Some("abc"));
        assert_eq!(err.detail("voter_id"), None);
    }

    #[test]
    fn validation_errors_keep_their_kind_and_field() {
        let err: DomainError = ValidationError::invalid_format("window", "start after end").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.detail("field"), Some("window"));

        let err: DomainError = ValidationError::empty_field("name").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[test]
    fn codes_render_as_screaming_snake_case() {
        assert_eq!(ErrorCode::DuplicateVote.to_string(), "DUPLICATE_VOTE");
        assert_eq!(ErrorCode::ResultsNotAvailable.as_str(), "RESULTS_NOT_AVAILABLE");
    }
}
