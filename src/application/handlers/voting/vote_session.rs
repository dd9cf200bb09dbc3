//! VoteSession - async orchestration of one (voter, election) voting attempt.
//!
//! The pure transition table lives in [`VoteSessionState`]; this module adds
//! the collaborator calls around it.
//!
//! # Concurrency
//!
//! Operations on one session never overlap. A call made while another is in
//! flight fails with [`VoteError::SessionBusy`]. `abort()` is the exception:
//! it is synchronous, may be called at any time, and cancels the in-flight
//! biometric or commit call.
//!
//! The biometric and commit calls run as spawned tasks so they can be
//! cancelled through their [`AbortHandle`]. The state lock is never held
//! across an `.await`.
//!
//! If the caller drops an operation's future mid-call, the in-flight task is
//! cancelled and the session falls back to the state it would reach on a
//! retryable failure.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::domain::foundation::{
    CandidateId, ElectionId, StateMachine, VoteSessionId, VoterId,
};
use crate::domain::vote::{BiometricError, CommitError, Vote, VoteError, VoteSessionState};
use crate::ports::{BiometricVerifier, Clock, ElectionRepository, VoteCommitter, VoterDirectory};

/// Collaborators shared by every vote session.
#[derive(Clone)]
pub struct VotingPorts {
    pub elections: Arc<dyn ElectionRepository>,
    pub voters: Arc<dyn VoterDirectory>,
    pub biometric: Arc<dyn BiometricVerifier>,
    pub committer: Arc<dyn VoteCommitter>,
    pub clock: Arc<dyn Clock>,
}

/// What a successful confirmation observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// This submission recorded the vote.
    Recorded(Vote),
    /// An earlier submission for the same voter had already landed.
    AlreadyRecorded,
}

#[derive(Debug, Clone)]
pub struct StartVoteSessionCommand {
    pub election_id: ElectionId,
    pub voter_id: VoterId,
}

/// Opens vote sessions.
///
/// Opening only loads the ballot; whether the voter may vote is decided when
/// verification begins.
pub struct StartVoteSessionHandler {
    ports: VotingPorts,
    biometric_timeout: Duration,
}

impl StartVoteSessionHandler {
    pub fn new(ports: VotingPorts, biometric_timeout: Duration) -> Self {
        Self {
            ports,
            biometric_timeout,
        }
    }

    pub async fn handle(&self, cmd: StartVoteSessionCommand) -> Result<VoteSession, VoteError> {
        let election = self.ports.elections.get(&cmd.election_id).await?;
        self.ports.voters.get_profile(&cmd.voter_id).await?;

        let session = VoteSession {
            id: VoteSessionId::new(),
            election_id: election.id,
            voter_id: cmd.voter_id,
            ballot: election.candidates.iter().map(|c| c.id.clone()).collect(),
            ports: self.ports.clone(),
            biometric_timeout: self.biometric_timeout,
            inner: Mutex::new(Inner::default()),
        };

        tracing::debug!(
            session_id = %session.id,
            election_id = %session.election_id,
            voter_id = %session.voter_id,
            "vote session opened"
        );
        Ok(session)
    }
}

struct Inner {
    state: VoteSessionState,
    selection: Option<CandidateId>,
    busy: bool,
    in_flight: Option<AbortHandle>,
    last_failure: Option<VoteError>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            state: VoteSessionState::Selecting,
            selection: None,
            busy: false,
            in_flight: None,
            last_failure: None,
        }
    }
}

impl Inner {
    fn ensure_ready(
        &self,
        operation: &'static str,
        accepts: fn(&VoteSessionState) -> bool,
    ) -> Result<(), VoteError> {
        if self.state.is_terminal() {
            return Err(VoteError::SessionAlreadyTerminal(self.state));
        }
        if self.busy {
            return Err(VoteError::SessionBusy);
        }
        if !accepts(&self.state) {
            return Err(VoteError::InvalidState {
                state: self.state,
                operation,
            });
        }
        Ok(())
    }
}

/// One voter's attempt to vote in one election.
pub struct VoteSession {
    id: VoteSessionId,
    election_id: ElectionId,
    voter_id: VoterId,
    /// Candidate ids as of opening; re-checked before verification.
    ballot: Vec<CandidateId>,
    ports: VotingPorts,
    biometric_timeout: Duration,
    inner: Mutex<Inner>,
}

/// Marks a session busy for the lifetime of one async operation.
struct Operation<'a> {
    session: &'a VoteSession,
}

impl Drop for Operation<'_> {
    fn drop(&mut self) {
        let session = self.session;
        let mut inner = session.lock();
        inner.busy = false;
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
        match inner.state {
            VoteSessionState::Verifying => {
                session.transition(&mut inner, VoteSessionState::VerificationFailed);
                inner.last_failure = Some(VoteError::BiometricFailed(
                    BiometricError::SensorUnavailable("verification interrupted".to_string()),
                ));
            }
            VoteSessionState::Submitting => {
                session.transition(&mut inner, VoteSessionState::Verified);
                inner.last_failure =
                    Some(VoteError::CommitFailed("submission interrupted".to_string()));
            }
            _ => {}
        }
    }
}

impl VoteSession {
    pub fn id(&self) -> VoteSessionId {
        self.id
    }

    pub fn election_id(&self) -> ElectionId {
        self.election_id
    }

    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    pub fn state(&self) -> VoteSessionState {
        self.lock().state
    }

    pub fn selection(&self) -> Option<CandidateId> {
        self.lock().selection.clone()
    }

    /// The most recent failure, cleared by the next successful step.
    pub fn last_failure(&self) -> Option<VoteError> {
        self.lock().last_failure.clone()
    }

    /// Chooses a candidate. May be called repeatedly while selecting.
    pub fn select_candidate(&self, candidate_id: CandidateId) -> Result<(), VoteError> {
        let mut inner = self.lock();
        inner.ensure_ready("select a candidate", VoteSessionState::accepts_selection)?;

        if !self.ballot.contains(&candidate_id) {
            let err = VoteError::invalid_selection(format!(
                "candidate {} is not on the ballot",
                candidate_id
            ));
            inner.last_failure = Some(err.clone());
            return Err(err);
        }

        inner.selection = Some(candidate_id);
        inner.last_failure = None;
        self.transition(&mut inner, VoteSessionState::Selecting);
        Ok(())
    }

    /// Re-checks that the election is open and the voter eligible, then
    /// triggers the fingerprint sensor once.
    ///
    /// Also the explicit retry after a failed verification. A rejected
    /// precondition leaves the session where it was.
    pub async fn begin_verification(&self) -> Result<(), VoteError> {
        let _op = self.begin("begin verification", VoteSessionState::accepts_verification)?;

        let selection = self.lock().selection.clone();
        let candidate = match selection {
            Some(candidate) => candidate,
            None => return Err(self.reject(VoteError::invalid_selection("no candidate selected"))),
        };

        // 1. Re-check preconditions against current data
        let now = self.ports.clock.now();
        let election = self
            .ports
            .elections
            .get(&self.election_id)
            .await
            .map_err(|e| self.reject(e.into()))?;
        let profile = self
            .ports
            .voters
            .get_profile(&self.voter_id)
            .await
            .map_err(|e| self.reject(e.into()))?;

        let state = election.lifecycle_state(now);
        if !state.can_vote() {
            return Err(self.reject(VoteError::ElectionNotOpen { state }));
        }
        let verdict = election.eligibility(&profile);
        if !verdict.is_eligible() {
            return Err(self.reject(VoteError::NotEligible {
                failed: verdict.failed_checks(),
            }));
        }
        if !election.has_candidate(&candidate) {
            return Err(self.reject(VoteError::invalid_selection(format!(
                "candidate {} is no longer on the ballot",
                candidate
            ))));
        }

        // 2. Trigger the sensor
        {
            let mut inner = self.lock();
            if inner.state.is_terminal() {
                return Err(VoteError::SessionAlreadyTerminal(inner.state));
            }
            self.transition(&mut inner, VoteSessionState::Verifying);
        }

        let verifier = Arc::clone(&self.ports.biometric);
        let voter_id = self.voter_id.clone();
        let limit = self.biometric_timeout;
        let task = tokio::spawn(async move {
            match tokio::time::timeout(limit, verifier.verify(&voter_id, limit)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(BiometricError::Timeout {
                    after_ms: limit.as_millis() as u64,
                }),
            }
        });
        {
            let mut inner = self.lock();
            if inner.state != VoteSessionState::Verifying {
                task.abort();
                return Err(VoteError::SessionAlreadyTerminal(inner.state));
            }
            inner.in_flight = Some(task.abort_handle());
        }

        // 3. Apply the outcome
        let outcome = task.await;

        let mut inner = self.lock();
        inner.in_flight = None;
        if inner.state != VoteSessionState::Verifying {
            return Err(VoteError::SessionAlreadyTerminal(inner.state));
        }

        let failure = match outcome {
            Ok(Ok(())) => {
                self.transition(&mut inner, VoteSessionState::Verified);
                inner.last_failure = None;
                tracing::info!(session_id = %self.id, voter_id = %self.voter_id, "fingerprint verified");
                return Ok(());
            }
            Ok(Err(e)) => e,
            Err(join) => BiometricError::SensorUnavailable(join.to_string()),
        };

        self.transition(&mut inner, VoteSessionState::VerificationFailed);
        let err = VoteError::BiometricFailed(failure);
        tracing::warn!(session_id = %self.id, voter_id = %self.voter_id, error = %err, "verification failed");
        inner.last_failure = Some(err.clone());
        Err(err)
    }

    /// Submits the selected candidate.
    ///
    /// A `DuplicateVote` answer means an earlier submission already landed
    /// and counts as success. Retryable failures return to `VERIFIED` so the
    /// voter can resubmit without another scan.
    pub async fn confirm_vote(&self) -> Result<CommitOutcome, VoteError> {
        let _op = self.begin("confirm the vote", VoteSessionState::accepts_confirmation)?;

        let candidate = {
            let mut inner = self.lock();
            let candidate = match inner.selection.clone() {
                Some(candidate) => candidate,
                None => return Err(VoteError::invalid_selection("no candidate selected")),
            };
            self.transition(&mut inner, VoteSessionState::Submitting);
            candidate
        };

        let committer = Arc::clone(&self.ports.committer);
        let election_id = self.election_id;
        let voter_id = self.voter_id.clone();
        let task = tokio::spawn(async move {
            committer
                .commit(&election_id, &voter_id, &candidate)
                .await
        });
        {
            let mut inner = self.lock();
            if inner.state != VoteSessionState::Submitting {
                task.abort();
                return Err(VoteError::SessionAlreadyTerminal(inner.state));
            }
            inner.in_flight = Some(task.abort_handle());
        }

        let outcome = task.await;

        let mut inner = self.lock();
        inner.in_flight = None;
        if inner.state != VoteSessionState::Submitting {
            return Err(VoteError::SessionAlreadyTerminal(inner.state));
        }

        let err = match outcome {
            Ok(Ok(vote)) => {
                self.transition(&mut inner, VoteSessionState::Committed);
                inner.last_failure = None;
                tracing::info!(session_id = %self.id, election_id = %self.election_id, vote_id = %vote.id, "vote committed");
                return Ok(CommitOutcome::Recorded(vote));
            }
            Ok(Err(CommitError::DuplicateVote)) => {
                self.transition(&mut inner, VoteSessionState::Committed);
                inner.last_failure = None;
                tracing::info!(session_id = %self.id, election_id = %self.election_id, "vote already recorded");
                return Ok(CommitOutcome::AlreadyRecorded);
            }
            Ok(Err(e)) => VoteError::from(e),
            Err(join) => VoteError::CommitFailed(join.to_string()),
        };

        let next = if rejects_ballot(&err) {
            VoteSessionState::Aborted
        } else {
            VoteSessionState::Verified
        };
        self.transition(&mut inner, next);
        tracing::warn!(session_id = %self.id, election_id = %self.election_id, error = %err, "commit rejected");
        inner.last_failure = Some(err.clone());
        Err(err)
    }

    /// Cancels the session from any non-terminal state.
    ///
    /// An in-flight call is cancelled best-effort. Nothing is recorded after
    /// an abort that happens before the commit reaches the store.
    pub fn abort(&self) -> Result<(), VoteError> {
        let mut inner = self.lock();
        if inner.state.is_terminal() {
            return Err(VoteError::SessionAlreadyTerminal(inner.state));
        }
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
        let from = inner.state;
        self.transition(&mut inner, VoteSessionState::Aborted);
        tracing::info!(session_id = %self.id, from = %from, "vote session aborted");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn begin(
        &self,
        operation: &'static str,
        accepts: fn(&VoteSessionState) -> bool,
    ) -> Result<Operation<'_>, VoteError> {
        let mut inner = self.lock();
        inner.ensure_ready(operation, accepts)?;
        inner.busy = true;
        Ok(Operation { session: self })
    }

    /// Records a failed precondition. Fatal errors end the session.
    fn reject(&self, err: VoteError) -> VoteError {
        let mut inner = self.lock();
        if err.is_fatal() && !inner.state.is_terminal() {
            self.transition(&mut inner, VoteSessionState::Aborted);
        }
        tracing::warn!(session_id = %self.id, state = %inner.state, error = %err, "operation rejected");
        inner.last_failure = Some(err.clone());
        err
    }

    fn transition(&self, inner: &mut Inner, to: VoteSessionState) {
        debug_assert!(
            inner.state.can_transition_to(&to),
            "{} -> {}",
            inner.state,
            to
        );
        tracing::debug!(session_id = %self.id, from = %inner.state, to = %to, "vote session transition");
        inner.state = to;
    }
}

/// Commit refusals that end the session. Before verification a closed
/// election or lost eligibility only fail the attempt.
fn rejects_ballot(err: &VoteError) -> bool {
    err.is_fatal()
        || matches!(
            err,
            VoteError::ElectionNotOpen { .. } | VoteError::NotEligible { .. }
        )
}
