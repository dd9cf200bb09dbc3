//! CreateElectionHandler - Command handler for defining a new election.

use std::sync::Arc;

use crate::domain::election::{Candidate, Election, ElectionCreated, ElectionError, ElectionWindow};
use crate::domain::eligibility::CriteriaSet;
use crate::domain::foundation::{EventEnvelope, EventId, Timestamp};
use crate::ports::{Clock, ElectionRepository, EventPublisher};

/// Command to create an election.
#[derive(Debug, Clone)]
pub struct CreateElectionCommand {
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub criteria: CriteriaSet,
    pub candidates: Vec<Candidate>,
    /// Administrator issuing the command, recorded in event metadata.
    pub actor: String,
}

#[derive(Debug, Clone)]
pub struct CreateElectionResult {
    pub election: Election,
    pub event: ElectionCreated,
}

/// Handler for creating elections.
///
/// New elections start unpublished. Criteria are stored normalized.
pub struct CreateElectionHandler {
    repository: Arc<dyn ElectionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CreateElectionHandler {
    pub fn new(
        repository: Arc<dyn ElectionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateElectionCommand,
    ) -> Result<CreateElectionResult, ElectionError> {
        let now = self.clock.now();

        // 1. Validate and build the aggregate
        let window = ElectionWindow::new(cmd.start, cmd.end)?;
        let election = Election::create(
            cmd.name,
            window,
            cmd.criteria.normalized(),
            cmd.candidates,
            now,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "election rejected");
            e
        })?;

        // 2. Persist
        self.repository.save(&election).await?;

        // 3. Publish event
        let event = ElectionCreated {
            event_id: EventId::new(),
            election_id: election.id,
            name: election.name.clone(),
            start: election.window.start(),
            end: election.window.end(),
            candidate_count: election.candidates.len(),
            created_at: now,
        };
        self.event_publisher
            .publish(EventEnvelope::from_event(&event).with_actor(cmd.actor))
            .await?;

        tracing::info!(election_id = %election.id, name = %election.name, "election created");

        Ok(CreateElectionResult { election, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryElectionRepository, InMemoryEventBus};
    use crate::domain::foundation::CandidateId;
    use crate::domain::voter::{Activity, SportType};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn candidate(id: &str) -> Candidate {
        Candidate::new(CandidateId::new(id).unwrap(), format!("Candidate {}", id)).unwrap()
    }

    fn command() -> CreateElectionCommand {
        CreateElectionCommand {
            name: "Bureau des étudiants".to_string(),
            start: ts("2025-01-10T08:00:00Z"),
            end: ts("2025-01-10T18:00:00Z"),
            criteria: CriteriaSet::open(),
            candidates: vec![candidate("c1"), candidate("c2")],
            actor: "admin".to_string(),
        }
    }

    fn setup() -> (
        CreateElectionHandler,
        Arc<InMemoryElectionRepository>,
        Arc<InMemoryEventBus>,
    ) {
        let repo = Arc::new(InMemoryElectionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::at(ts("2025-01-01T00:00:00Z")));
        let handler = CreateElectionHandler::new(repo.clone(), bus.clone(), clock);
        (handler, repo, bus)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Cases
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_unpublished_election() {
        let (handler, repo, _) = setup();

        let result = handler.handle(command()).await.unwrap();

        let stored = repo.get(&result.election.id).await.unwrap();
        assert!(!stored.published);
        assert_eq!(stored.candidates.len(), 2);
        assert_eq!(stored.created_at, ts("2025-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn publishes_created_event_with_actor() {
        let (handler, _, bus) = setup();

        let result = handler.handle(command()).await.unwrap();

        let events = bus.events_of_type("election.created");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, result.election.id.to_string());
        assert_eq!(events[0].actor.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn stores_normalized_criteria() {
        let (handler, _, _) = setup();
        let mut cmd = command();
        cmd.criteria = CriteriaSet::open()
            .with_activities([Activity::Chant])
            .with_sport_types([SportType::Foot]);

        let result = handler.handle(cmd).await.unwrap();

        assert!(result.election.criteria.allowed_sport_types.is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validation Failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn rejects_inverted_window_without_saving() {
        let (handler, repo, bus) = setup();
        let mut cmd = command();
        std::mem::swap(&mut cmd.start, &mut cmd.end);

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, ElectionError::ValidationFailed { field, .. } if field == "window"));
        assert_eq!(repo.count().await, 0);
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn rejects_empty_candidate_list() {
        let (handler, _, _) = setup();
        let mut cmd = command();
        cmd.candidates.clear();

        assert_eq!(handler.handle(cmd).await.unwrap_err(), ElectionError::NoCandidates);
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let (handler, _, _) = setup();
        let mut cmd = command();
        cmd.name = "   ".to_string();

        assert!(matches!(
            handler.handle(cmd).await,
            Err(ElectionError::ValidationFailed { .. })
        ));
    }
}
