//! Vote session state machine.
//!
//! Pure transition table for one (voter, election) voting attempt. The async
//! orchestration around it lives in the application layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// States of a vote session.
///
/// ```text
/// SELECTING ──► VERIFYING ──► VERIFIED ──► SUBMITTING ──► COMMITTED
///                 ▲   │           ▲             │
///                 │   ▼           └─────────────┘ (retryable commit failure)
///          VERIFICATION_FAILED
///
/// any non-terminal state ──► ABORTED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteSessionState {
    /// Choosing a candidate. Selection may change freely.
    Selecting,

    /// Biometric check in flight.
    Verifying,

    /// Biometric check failed. Waits for an explicit retry or abort.
    VerificationFailed,

    /// Fingerprint accepted, awaiting confirmation.
    Verified,

    /// Commit call in flight.
    Submitting,

    /// Vote recorded. Terminal.
    Committed,

    /// Cancelled or fatally rejected. Terminal.
    Aborted,
}

impl VoteSessionState {
    pub fn accepts_selection(&self) -> bool {
        matches!(self, VoteSessionState::Selecting)
    }

    /// Initial verification from SELECTING, or a retry after failure.
    pub fn accepts_verification(&self) -> bool {
        matches!(
            self,
            VoteSessionState::Selecting | VoteSessionState::VerificationFailed
        )
    }

    pub fn accepts_confirmation(&self) -> bool {
        matches!(self, VoteSessionState::Verified)
    }

    /// True while an external call is awaited.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            VoteSessionState::Verifying | VoteSessionState::Submitting
        )
    }
}

impl StateMachine for VoteSessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use VoteSessionState::*;
        matches!(
            (self, target),
            (Selecting, Selecting)
                | (Selecting, Verifying)
                | (Verifying, Verified)
                | (Verifying, VerificationFailed)
                | (VerificationFailed, Verifying)
                | (Verified, Submitting)
                | (Submitting, Committed)
                | (Submitting, Verified)
                | (Selecting | Verifying | VerificationFailed | Verified | Submitting, Aborted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VoteSessionState::*;
        match self {
            Selecting => vec![Selecting, Verifying, Aborted],
            Verifying => vec![Verified, VerificationFailed, Aborted],
            VerificationFailed => vec![Verifying, Aborted],
            Verified => vec![Submitting, Aborted],
            Submitting => vec![Committed, Verified, Aborted],
            Committed | Aborted => vec![],
        }
    }
}

impl fmt::Display for VoteSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteSessionState::Selecting => "SELECTING",
            VoteSessionState::Verifying => "VERIFYING",
            VoteSessionState::VerificationFailed => "VERIFICATION_FAILED",
            VoteSessionState::Verified => "VERIFIED",
            VoteSessionState::Submitting => "SUBMITTING",
            VoteSessionState::Committed => "COMMITTED",
            VoteSessionState::Aborted => "ABORTED",
        };
        write!(f, "{}", s)
    }
}
