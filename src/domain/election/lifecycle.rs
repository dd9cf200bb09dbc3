//! Election lifecycle state machine.
//!
//! Layered on [`ElectionPhase`] plus the explicit published flag. Publishing
//! is the only transition driven by an action; the others follow the clock.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ElectionError, ElectionPhase};
use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Window not yet started.
    Pending,

    /// Accepting votes.
    Open,

    /// Window elapsed, results visible to administrators only.
    ClosedUnpublished,

    /// Results published. Terminal.
    ClosedPublished,
}

impl LifecycleState {
    /// Derives the state from the clock phase and the published flag.
    ///
    /// `published` implies the window has closed, so it wins over the phase.
    pub fn derive(phase: ElectionPhase, published: bool) -> Self {
        match (phase, published) {
            (_, true) => LifecycleState::ClosedPublished,
            (ElectionPhase::Pending, false) => LifecycleState::Pending,
            (ElectionPhase::Open, false) => LifecycleState::Open,
            (ElectionPhase::Closed, false) => LifecycleState::ClosedUnpublished,
        }
    }

    pub fn can_vote(&self) -> bool {
        matches!(self, LifecycleState::Open)
    }

    pub fn can_publish(&self) -> bool {
        matches!(self, LifecycleState::ClosedUnpublished)
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            LifecycleState::ClosedUnpublished | LifecycleState::ClosedPublished
        )
    }

    /// Performs the publish transition.
    ///
    /// Requires `ClosedUnpublished` and a non-empty candidate list. A second
    /// publish is an error, not a no-op.
    pub fn publish(&self, candidate_count: usize) -> Result<Self, ElectionError> {
        match self {
            LifecycleState::ClosedPublished => Err(ElectionError::AlreadyPublished),
            LifecycleState::Pending | LifecycleState::Open => {
                Err(ElectionError::NotClosed { state: *self })
            }
            LifecycleState::ClosedUnpublished if candidate_count == 0 => {
                Err(ElectionError::NoCandidates)
            }
            LifecycleState::ClosedUnpublished => self
                .transition_to(LifecycleState::ClosedPublished)
                .map_err(ElectionError::from),
        }
    }
}

impl StateMachine for LifecycleState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use LifecycleState::*;
        matches!(
            (self, target),
            (Pending, Open) | (Open, ClosedUnpublished) | (ClosedUnpublished, ClosedPublished)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use LifecycleState::*;
        match self {
            Pending => vec![Open],
            Open => vec![ClosedUnpublished],
            ClosedUnpublished => vec![ClosedPublished],
            ClosedPublished => vec![],
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Pending => "PENDING",
            LifecycleState::Open => "OPEN",
            LifecycleState::ClosedUnpublished => "CLOSED_UNPUBLISHED",
            LifecycleState::ClosedPublished => "CLOSED_PUBLISHED",
        };
        write!(f, "{}", s)
    }
}
