//! GetResultsHandler - Query handler for election results.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::election::LifecycleState;
use crate::domain::foundation::{ElectionId, VoterId};
use crate::domain::results::{ResultsError, ResultsReport};
use crate::ports::{Clock, ElectionRepository, VoteRepository, VoterDirectory};

/// Who is asking for the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// May preview results as soon as voting closes.
    Administrator,
    /// Sees results only once published.
    Voter,
}

impl Audience {
    pub fn may_read(&self, state: LifecycleState) -> bool {
        match self {
            Audience::Administrator => state.is_closed(),
            Audience::Voter => state == LifecycleState::ClosedPublished,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetResultsQuery {
    pub election_id: ElectionId,
    pub audience: Audience,
}

pub struct GetResultsHandler {
    elections: Arc<dyn ElectionRepository>,
    votes: Arc<dyn VoteRepository>,
    voters: Arc<dyn VoterDirectory>,
    clock: Arc<dyn Clock>,
}

impl GetResultsHandler {
    pub fn new(
        elections: Arc<dyn ElectionRepository>,
        votes: Arc<dyn VoteRepository>,
        voters: Arc<dyn VoterDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            elections,
            votes,
            voters,
            clock,
        }
    }

    pub async fn handle(&self, query: GetResultsQuery) -> Result<ResultsReport, ResultsError> {
        let election = self.elections.get(&query.election_id).await?;

        let state = election.lifecycle_state(self.clock.now());
        if !query.audience.may_read(state) {
            tracing::debug!(
                election_id = %election.id,
                state = %state,
                audience = ?query.audience,
                "results not available"
            );
            return Err(ResultsError::NotAvailable { state });
        }

        let votes = self.votes.list_by_election(&election.id).await?;
        let eligible: HashSet<VoterId> = self
            .voters
            .list_profiles()
            .await?
            .iter()
            .filter(|p| election.admits(p))
            .map(|p| p.voter_id().clone())
            .collect();

        Ok(ResultsReport::compile(&election, &votes, &eligible, state))
    }
}
