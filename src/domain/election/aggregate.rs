//! Election aggregate entity.
//!
//! An election owns its candidate list, its eligibility criteria and, through
//! the vote store, the votes cast in it. Deleting an election deletes those
//! votes; deleting a voter does not.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Candidate, ElectionError, ElectionPhase, ElectionWindow, LifecycleState};
use crate::domain::eligibility::{evaluate, CriteriaSet, EligibilityVerdict};
use crate::domain::foundation::{CandidateId, ElectionId, Timestamp};
use crate::domain::voter::VoterProfile;

/// Election aggregate.
///
/// # Invariants
///
/// - `name` is not blank
/// - `window.start < window.end`
/// - `candidates` is non-empty and has unique ids
/// - once `published` is true it never goes back, and no further edits are
///   accepted
///
/// `version` counts the writes the store has accepted. The store refuses a
/// write carrying a stale version, so two administrators working from the
/// same snapshot cannot overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    pub name: String,
    pub window: ElectionWindow,
    #[serde(default)]
    pub criteria: CriteriaSet,
    /// Ballot order.
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub version: u64,
}

impl Election {
    /// Creates an unpublished election.
    pub fn create(
        name: impl Into<String>,
        window: ElectionWindow,
        criteria: CriteriaSet,
        candidates: Vec<Candidate>,
        now: Timestamp,
    ) -> Result<Self, ElectionError> {
        let election = Self {
            id: ElectionId::new(),
            name: name.into(),
            window,
            criteria,
            candidates,
            published: false,
            created_at: now,
            updated_at: now,
            published_at: None,
            version: 0,
        };
        election.validate()?;
        Ok(election)
    }

    /// Checks every structural invariant. Used on creation and on records
    /// read from outside (files, stores).
    pub fn validate(&self) -> Result<(), ElectionError> {
        if self.name.trim().is_empty() {
            return Err(ElectionError::validation("name", "Election name cannot be empty"));
        }
        ElectionWindow::new(self.window.start(), self.window.end())?;
        Self::check_candidates(&self.candidates)
    }

    fn check_candidates(candidates: &[Candidate]) -> Result<(), ElectionError> {
        if candidates.is_empty() {
            return Err(ElectionError::NoCandidates);
        }
        let mut seen = HashSet::new();
        for candidate in candidates {
            if candidate.name.trim().is_empty() {
                return Err(ElectionError::validation(
                    "candidate_name",
                    format!("Candidate {} has no name", candidate.id),
                ));
            }
            if !seen.insert(&candidate.id) {
                return Err(ElectionError::DuplicateCandidate(candidate.id.clone()));
            }
        }
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Queries
    // ════════════════════════════════════════════════════════════════════════════

    pub fn phase(&self, now: Timestamp) -> ElectionPhase {
        self.window.phase_at(now)
    }

    pub fn lifecycle_state(&self, now: Timestamp) -> LifecycleState {
        LifecycleState::derive(self.phase(now), self.published)
    }

    pub fn can_vote(&self, now: Timestamp) -> bool {
        self.lifecycle_state(now).can_vote()
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    pub fn has_candidate(&self, id: &CandidateId) -> bool {
        self.candidate(id).is_some()
    }

    /// Per-check eligibility of a voter for this election.
    pub fn eligibility(&self, voter: &VoterProfile) -> EligibilityVerdict {
        evaluate(&self.criteria, voter)
    }

    pub fn admits(&self, voter: &VoterProfile) -> bool {
        self.eligibility(voter).is_eligible()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Commands
    // ════════════════════════════════════════════════════════════════════════════

    /// Publishes results. Only valid once the window has elapsed, and only once.
    pub fn publish(&mut self, now: Timestamp) -> Result<(), ElectionError> {
        self.lifecycle_state(now).publish(self.candidates.len())?;
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>, now: Timestamp) -> Result<(), ElectionError> {
        self.ensure_editable()?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ElectionError::validation("name", "Election name cannot be empty"));
        }
        self.name = name;
        self.updated_at = now;
        Ok(())
    }

    pub fn reschedule(&mut self, window: ElectionWindow, now: Timestamp) -> Result<(), ElectionError> {
        self.ensure_editable()?;
        self.window = window;
        self.updated_at = now;
        Ok(())
    }

    pub fn set_criteria(&mut self, criteria: CriteriaSet, now: Timestamp) -> Result<(), ElectionError> {
        self.ensure_editable()?;
        self.criteria = criteria.normalized();
        self.updated_at = now;
        Ok(())
    }

    pub fn replace_candidates(
        &mut self,
        candidates: Vec<Candidate>,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        self.ensure_editable()?;
        Self::check_candidates(&candidates)?;
        self.candidates = candidates;
        self.updated_at = now;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), ElectionError> {
        if self.published {
            return Err(ElectionError::AlreadyPublished);
        }
        Ok(())
    }
}
