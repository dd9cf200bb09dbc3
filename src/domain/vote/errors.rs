//! Vote casting error types.
//!
//! # Retry classes
//!
//! | Error | Class |
//! |-------|-------|
//! | InvalidSelection | rejected locally |
//! | InvalidState | rejected locally |
//! | ElectionNotOpen | terminal for the operation |
//! | NotEligible | terminal for the operation |
//! | BiometricFailed | retryable |
//! | DuplicateVote | success (reclassified by the session) |
//! | CommitFailed | retryable |
//! | StoreError | retryable |
//! | SessionBusy | retryable |
//! | SessionAlreadyTerminal | fatal |

use crate::domain::eligibility::EligibilityCheck;
use crate::domain::election::LifecycleState;
use crate::domain::foundation::{
    CandidateId, DomainError, ElectionId, ErrorCode, VoterId,
};

use super::VoteSessionState;

/// Why the biometric collaborator did not verify the voter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BiometricError {
    #[error("fingerprint did not match")]
    Rejected,

    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("no fingerprint read within {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// Why the vote-commit collaborator refused a vote.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("a vote is already recorded for this voter")]
    DuplicateVote,

    #[error("election is {state}")]
    ElectionNotOpen { state: LifecycleState },

    #[error("voter is not eligible")]
    NotEligible { failed: Vec<EligibilityCheck> },

    #[error("election not found: {0}")]
    ElectionNotFound(ElectionId),

    #[error("voter not found: {0}")]
    VoterNotFound(VoterId),

    #[error("candidate {0} is not on the ballot")]
    InvalidCandidate(CandidateId),

    #[error("store error: {0}")]
    Store(String),
}

impl From<DomainError> for CommitError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateVote => CommitError::DuplicateVote,
            _ => CommitError::Store(err.to_string()),
        }
    }
}

/// Failures surfaced by a vote session. Every variant is a distinct reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Cannot {operation} while {state}")]
    InvalidState {
        state: VoteSessionState,
        operation: &'static str,
    },

    #[error("Election is not open (currently {state})")]
    ElectionNotOpen { state: LifecycleState },

    #[error("Voter is not eligible (failed: {})", format_checks(.failed))]
    NotEligible { failed: Vec<EligibilityCheck> },

    #[error("Biometric verification failed: {0}")]
    BiometricFailed(BiometricError),

    #[error("A vote is already recorded for this voter")]
    DuplicateVote,

    #[error("Vote could not be recorded: {0}")]
    CommitFailed(String),

    #[error("Session already {0}")]
    SessionAlreadyTerminal(VoteSessionState),

    #[error("Another operation is already in progress")]
    SessionBusy,

    #[error("Election not found: {0}")]
    ElectionNotFound(ElectionId),

    #[error("Voter not found: {0}")]
    VoterNotFound(VoterId),

    #[error("Store error: {0}")]
    StoreError(String),
}

fn format_checks(checks: &[EligibilityCheck]) -> String {
    checks
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl VoteError {
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        VoteError::InvalidSelection(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VoteError::InvalidSelection(_) => ErrorCode::InvalidSelection,
            VoteError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            VoteError::ElectionNotOpen { .. } => ErrorCode::ElectionNotOpen,
            VoteError::NotEligible { .. } => ErrorCode::NotEligible,
            VoteError::BiometricFailed(_) => ErrorCode::BiometricFailed,
            VoteError::DuplicateVote => ErrorCode::DuplicateVote,
            VoteError::CommitFailed(_) => ErrorCode::CommitFailed,
            VoteError::SessionAlreadyTerminal(_) => ErrorCode::SessionTerminal,
            VoteError::SessionBusy => ErrorCode::SessionBusy,
            VoteError::ElectionNotFound(_) => ErrorCode::ElectionNotFound,
            VoteError::VoterNotFound(_) => ErrorCode::VoterNotFound,
            VoteError::StoreError(_) => ErrorCode::StoreError,
        }
    }

    /// True when the same session may succeed if the voter tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VoteError::BiometricFailed(_)
                | VoteError::CommitFailed(_)
                | VoteError::StoreError(_)
                | VoteError::SessionBusy
        )
    }

    /// True when no further action on this session can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VoteError::SessionAlreadyTerminal(_)
                | VoteError::ElectionNotFound(_)
                | VoteError::VoterNotFound(_)
        )
    }
}

impl From<DomainError> for VoteError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ElectionNotFound => match err
                .detail("election_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => VoteError::ElectionNotFound(id),
                None => VoteError::StoreError(err.to_string()),
            },
            ErrorCode::VoterNotFound => match err
                .detail("voter_id")
                .and_then(|id| VoterId::new(id).ok())
            {
                Some(id) => VoteError::VoterNotFound(id),
                None => VoteError::StoreError(err.to_string()),
            },
            ErrorCode::DuplicateVote => VoteError::DuplicateVote,
            _ => VoteError::StoreError(err.to_string()),
        }
    }
}

impl From<BiometricError> for VoteError {
    fn from(err: BiometricError) -> Self {
        VoteError::BiometricFailed(err)
    }
}

impl From<CommitError> for VoteError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::DuplicateVote => VoteError::DuplicateVote,
            CommitError::ElectionNotOpen { state } => VoteError::ElectionNotOpen { state },
            CommitError::NotEligible { failed } => VoteError::NotEligible { failed },
            CommitError::ElectionNotFound(id) => VoteError::ElectionNotFound(id),
            CommitError::VoterNotFound(id) => VoteError::VoterNotFound(id),
            CommitError::InvalidCandidate(id) => {
                VoteError::InvalidSelection(format!("candidate {} is not on the ballot", id))
            }
            CommitError::Store(msg) => VoteError::CommitFailed(msg),
        }
    }
}
