//! CommitVoteHandler - Server-side vote commit.
//!
//! Implements the [`VoteCommitter`] port. Every precondition is checked again
//! here against the injected clock, whatever the client already checked; the
//! at-most-once guarantee comes from the vote store's atomic insert.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{CandidateId, ElectionId, EventEnvelope, EventId, VoterId};
use crate::domain::vote::{CommitError, Vote, VoteCast};
use crate::ports::{
    Clock, ElectionRepository, EventPublisher, VoteCommitter, VoteRepository, VoterDirectory,
};

pub struct CommitVoteHandler {
    elections: Arc<dyn ElectionRepository>,
    voters: Arc<dyn VoterDirectory>,
    votes: Arc<dyn VoteRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CommitVoteHandler {
    pub fn new(
        elections: Arc<dyn ElectionRepository>,
        voters: Arc<dyn VoterDirectory>,
        votes: Arc<dyn VoteRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            elections,
            voters,
            votes,
            event_publisher,
            clock,
        }
    }
}

#[async_trait]
impl VoteCommitter for CommitVoteHandler {
    async fn commit(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> Result<Vote, CommitError> {
        let now = self.clock.now();

        // 1. Load election
        let election = self
            .elections
            .find_by_id(election_id)
            .await?
            .ok_or(CommitError::ElectionNotFound(*election_id))?;

        // 2. A retried submission whose first reply was lost is a duplicate,
        //    even if the window closed or the criteria changed since
        if self.votes.find(election_id, voter_id).await?.is_some() {
            tracing::debug!(election_id = %election_id, "ballot already recorded");
            return Err(CommitError::DuplicateVote);
        }

        // 3. Re-check preconditions
        let profile = self
            .voters
            .find_profile(voter_id)
            .await?
            .ok_or_else(|| CommitError::VoterNotFound(voter_id.clone()))?;
        let state = election.lifecycle_state(now);
        if !state.can_vote() {
            return Err(CommitError::ElectionNotOpen { state });
        }
        if !election.has_candidate(candidate_id) {
            return Err(CommitError::InvalidCandidate(candidate_id.clone()));
        }
        let verdict = election.eligibility(&profile);
        if !verdict.is_eligible() {
            return Err(CommitError::NotEligible {
                failed: verdict.failed_checks(),
            });
        }

        // 4. Atomic insert
        let vote = Vote::cast(*election_id, voter_id.clone(), candidate_id.clone(), now);
        self.votes.insert_unique(&vote).await?;

        // 5. The election may have been deleted, and its votes cascaded,
        //    between the load and the insert
        if self.elections.find_by_id(election_id).await?.is_none() {
            self.votes.remove(election_id, voter_id).await?;
            tracing::warn!(election_id = %election_id, "election deleted during commit, vote withdrawn");
            return Err(CommitError::ElectionNotFound(*election_id));
        }

        // 6. Announce; the vote is already durable
        let event = VoteCast {
            event_id: EventId::new(),
            vote_id: vote.id,
            election_id: vote.election_id,
            voter_id: vote.voter_id.clone(),
            cast_at: vote.cast_at,
        };
        if let Err(e) = self
            .event_publisher
            .publish(EventEnvelope::from_event(&event).with_actor(voter_id.as_str()))
            .await
        {
            tracing::warn!(election_id = %election_id, error = %e, "vote.cast not published");
        }

        tracing::info!(election_id = %election_id, vote_id = %vote.id, "vote recorded");
        Ok(vote)
    }
}
