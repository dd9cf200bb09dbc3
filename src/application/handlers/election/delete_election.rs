//! DeleteElectionHandler - Command handler for removing an election.

use std::sync::Arc;

use crate::domain::election::{ElectionDeleted, ElectionError};
use crate::domain::foundation::{ElectionId, EventEnvelope, EventId};
use crate::ports::{Clock, ElectionRepository, EventPublisher, VoteRepository};

#[derive(Debug, Clone)]
pub struct DeleteElectionCommand {
    pub election_id: ElectionId,
    pub actor: String,
}

#[derive(Debug, Clone)]
pub struct DeleteElectionResult {
    pub votes_removed: u64,
    pub event: ElectionDeleted,
}

/// Handler for deleting elections.
///
/// Allowed in any lifecycle state. The election's votes go with it; this is
/// not a lifecycle transition.
pub struct DeleteElectionHandler {
    repository: Arc<dyn ElectionRepository>,
    votes: Arc<dyn VoteRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeleteElectionHandler {
    pub fn new(
        repository: Arc<dyn ElectionRepository>,
        votes: Arc<dyn VoteRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            votes,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteElectionCommand,
    ) -> Result<DeleteElectionResult, ElectionError> {
        // Remove the election first so no new vote can be committed against it
        if !self.repository.delete(&cmd.election_id).await? {
            return Err(ElectionError::NotFound(cmd.election_id));
        }

        let votes_removed = self.votes.delete_by_election(&cmd.election_id).await?;

        let event = ElectionDeleted {
            event_id: EventId::new(),
            election_id: cmd.election_id,
            votes_removed,
            deleted_at: self.clock.now(),
        };
        self.event_publisher
            .publish(EventEnvelope::from_event(&event).with_actor(cmd.actor))
            .await?;

        tracing::info!(election_id = %cmd.election_id, votes_removed, "election deleted");

        Ok(DeleteElectionResult {
            votes_removed,
            event,
        })
    }
}
