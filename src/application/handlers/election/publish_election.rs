//! PublishElectionHandler - Command handler for publishing results.

use std::sync::Arc;

use crate::domain::election::{Election, ElectionError, ElectionPublished};
use crate::domain::foundation::{ElectionId, EventEnvelope, EventId};
use crate::ports::{Clock, ElectionRepository, EventPublisher, VoteRepository};

#[derive(Debug, Clone)]
pub struct PublishElectionCommand {
    pub election_id: ElectionId,
    pub actor: String,
}

#[derive(Debug, Clone)]
pub struct PublishElectionResult {
    pub election: Election,
    pub event: ElectionPublished,
}

/// Handler for publishing election results.
///
/// Only a closed, unpublished election with candidates can be published,
/// and only once.
pub struct PublishElectionHandler {
    repository: Arc<dyn ElectionRepository>,
    votes: Arc<dyn VoteRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl PublishElectionHandler {
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
        cmd: PublishElectionCommand,
    ) -> Result<PublishElectionResult, ElectionError> {
        let now = self.clock.now();

        let mut election = self.repository.get(&cmd.election_id).await?;

        election.publish(now).map_err(|e| {
            tracing::warn!(election_id = %cmd.election_id, error = %e, "publish rejected");
            e
        })?;

        // Fails with Conflict if an edit or another publish got there first
        election.version = self.repository.update(&election).await?;

        let total_votes = self.votes.list_by_election(&election.id).await?.len() as u64;
        let event = ElectionPublished {
            event_id: EventId::new(),
            election_id: election.id,
            total_votes,
            published_at: now,
        };
        self.event_publisher
            .publish(EventEnvelope::from_event(&event).with_actor(cmd.actor))
            .await?;

        tracing::info!(election_id = %election.id, total_votes, "election published");

        Ok(PublishElectionResult { election, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        FixedClock, InMemoryElectionRepository, InMemoryEventBus, InMemoryVoteRepository,
    };
    use crate::domain::election::{Candidate, ElectionWindow, LifecycleState};
    use crate::domain::eligibility::CriteriaSet;
    use crate::domain::foundation::{CandidateId, Timestamp, VoterId};
    use crate::domain::vote::Vote;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    struct Fixture {
        handler: PublishElectionHandler,
        repo: Arc<InMemoryElectionRepository>,
        bus: Arc<InMemoryEventBus>,
        clock: Arc<FixedClock>,
        election: Election,
    }

    fn setup() -> Fixture {
        let election = Election::create(
            "BDE",
            ElectionWindow::new(ts("2025-01-10T08:00:00Z"), ts("2025-01-10T18:00:00Z")).unwrap(),
            CriteriaSet::open(),
            vec![Candidate::new(CandidateId::new("c1").unwrap(), "Rakoto").unwrap()],
            ts("2025-01-01T00:00:00Z"),
        )
        .unwrap();
        let votes = Arc::new(InMemoryVoteRepository::with_votes([Vote::cast(
            election.id,
            VoterId::new("etu-1").unwrap(),
            CandidateId::new("c1").unwrap(),
            ts("2025-01-10T09:00:00Z"),
        )]));
        let repo = Arc::new(InMemoryElectionRepository::with_elections([election.clone()]));
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::at(ts("2025-01-10T18:00:00Z")));
        let handler = PublishElectionHandler::new(repo.clone(), votes, bus.clone(), clock.clone());
        Fixture {
            handler,
            repo,
            bus,
            clock,
            election,
        }
    }

    fn cmd(id: ElectionId) -> PublishElectionCommand {
        PublishElectionCommand {
            election_id: id,
            actor: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn publishes_at_end_instant() {
        let f = setup();

        let result = f.handler.handle(cmd(f.election.id)).await.unwrap();

        assert_eq!(result.event.total_votes, 1);
        let stored = f.repo.get(&f.election.id).await.unwrap();
        assert_eq!(
            stored.lifecycle_state(f.clock.now()),
            LifecycleState::ClosedPublished
        );
        assert!(f.bus.has_event("election.published"));
    }

    #[tokio::test]
    async fn publish_while_open_is_rejected() {
        let f = setup();
        f.clock.set(ts("2025-01-10T17:59:59Z"));

        let err = f.handler.handle(cmd(f.election.id)).await.unwrap_err();

        assert_eq!(
            err,
            ElectionError::NotClosed {
                state: LifecycleState::Open
            }
        );
        assert!(!f.repo.get(&f.election.id).await.unwrap().published);
        assert_eq!(f.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn second_publish_is_an_error() {
        let f = setup();
        f.handler.handle(cmd(f.election.id)).await.unwrap();

        let err = f.handler.handle(cmd(f.election.id)).await.unwrap_err();

        assert_eq!(err, ElectionError::AlreadyPublished);
        assert_eq!(f.bus.events_of_type("election.published").len(), 1);
    }

    #[tokio::test]
    async fn unknown_election_is_not_found() {
        let f = setup();
        let id = ElectionId::new();
        assert_eq!(
            f.handler.handle(cmd(id)).await.unwrap_err(),
            ElectionError::NotFound(id)
        );
    }
}
