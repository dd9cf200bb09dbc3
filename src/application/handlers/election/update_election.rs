//! UpdateElectionHandler - Command handler for administrator edits.

use std::sync::Arc;

use crate::domain::election::{
    Candidate, Election, ElectionChange, ElectionError, ElectionUpdated, ElectionWindow,
};
use crate::domain::eligibility::CriteriaSet;
use crate::domain::foundation::{ElectionId, EventEnvelope, EventId, Timestamp};
use crate::ports::{Clock, ElectionRepository, EventPublisher};

/// Command to edit an election. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateElectionCommand {
    pub election_id: ElectionId,
    pub name: Option<String>,
    pub window: Option<(Timestamp, Timestamp)>,
    pub criteria: Option<CriteriaSet>,
    pub candidates: Option<Vec<Candidate>>,
    pub actor: String,
}

#[derive(Debug, Clone)]
pub struct UpdateElectionResult {
    pub election: Election,
    /// `None` when the command changed nothing.
    pub event: Option<ElectionUpdated>,
}

/// Handler for editing elections.
///
/// Edits are accepted while unpublished, including after the window closed.
/// All requested edits are validated before any is applied.
pub struct UpdateElectionHandler {
    repository: Arc<dyn ElectionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl UpdateElectionHandler {
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
        cmd: UpdateElectionCommand,
    ) -> Result<UpdateElectionResult, ElectionError> {
        let now = self.clock.now();

        // 1. Load
        let original = self.repository.get(&cmd.election_id).await?;

        // 2. Apply edits to a copy so a failing edit leaves nothing behind
        let mut election = original.clone();
        let mut changes = Vec::new();

        if let Some(name) = cmd.name {
            election.rename(name, now)?;
            changes.push(ElectionChange::Name);
        }
        if let Some((start, end)) = cmd.window {
            election.reschedule(ElectionWindow::new(start, end)?, now)?;
            changes.push(ElectionChange::Window);
        }
        if let Some(criteria) = cmd.criteria {
            election.set_criteria(criteria, now)?;
            changes.push(ElectionChange::Criteria);
        }
        if let Some(candidates) = cmd.candidates {
            election.replace_candidates(candidates, now)?;
            changes.push(ElectionChange::Candidates);
        }

        if changes.is_empty() {
            return Ok(UpdateElectionResult {
                election: original,
                event: None,
            });
        }

        // 3. Persist against the loaded version
        election.version = self.repository.update(&election).await.map_err(|e| {
            tracing::warn!(election_id = %cmd.election_id, error = %e, "edit not stored");
            e
        })?;

        // 4. Publish event
        let event = ElectionUpdated {
            event_id: EventId::new(),
            election_id: election.id,
            changes,
            updated_at: now,
        };
        self.event_publisher
            .publish(EventEnvelope::from_event(&event).with_actor(cmd.actor))
            .await?;

        tracing::info!(
            election_id = %election.id,
            changes = ?event.changes,
            "election updated"
        );

        Ok(UpdateElectionResult {
            election,
            event: Some(event),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryElectionRepository, InMemoryEventBus};
    use crate::domain::foundation::CandidateId;
    use crate::domain::voter::ClassLevel;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn candidate(id: &str) -> Candidate {
        Candidate::new(CandidateId::new(id).unwrap(), format!("Candidate {}", id)).unwrap()
    }

    fn election() -> Election {
        Election::create(
            "BDE",
            ElectionWindow::new(ts("2025-01-10T08:00:00Z"), ts("2025-01-10T18:00:00Z")).unwrap(),
            CriteriaSet::open(),
            vec![candidate("c1")],
            ts("2025-01-01T00:00:00Z"),
        )
        .unwrap()
    }

    struct Fixture {
        handler: UpdateElectionHandler,
        repo: Arc<InMemoryElectionRepository>,
        bus: Arc<InMemoryEventBus>,
        clock: Arc<FixedClock>,
        election: Election,
    }

    fn setup() -> Fixture {
        let election = election();
        let repo = Arc::new(InMemoryElectionRepository::with_elections([election.clone()]));
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::at(ts("2025-01-05T00:00:00Z")));
        let handler = UpdateElectionHandler::new(repo.clone(), bus.clone(), clock.clone());
        Fixture {
            handler,
            repo,
            bus,
            clock,
            election,
        }
    }

    fn cmd(id: ElectionId) -> UpdateElectionCommand {
        UpdateElectionCommand {
            election_id: id,
            actor: "admin".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn applies_every_requested_edit() {
        let f = setup();
        let mut c = cmd(f.election.id);
        c.name = Some("BDE 2025".to_string());
        c.criteria = Some(CriteriaSet::open().with_classes([ClassLevel::M1]));
        c.candidates = Some(vec![candidate("c1"), candidate("c2")]);

        let result = f.handler.handle(c).await.unwrap();

        let stored = f.repo.get(&f.election.id).await.unwrap();
        assert_eq!(stored.name, "BDE 2025");
        assert_eq!(stored.candidates.len(), 2);
        assert_eq!(
            result.event.unwrap().changes,
            vec![
                ElectionChange::Name,
                ElectionChange::Criteria,
                ElectionChange::Candidates
            ]
        );
        assert!(f.bus.has_event("election.updated"));
    }

    #[tokio::test]
    async fn reschedule_after_close_is_allowed_while_unpublished() {
        let f = setup();
        f.clock.set(ts("2025-01-11T00:00:00Z"));
        let mut c = cmd(f.election.id);
        c.window = Some((ts("2025-01-12T08:00:00Z"), ts("2025-01-12T18:00:00Z")));

        let result = f.handler.handle(c).await.unwrap();

        assert_eq!(result.election.window.start(), ts("2025-01-12T08:00:00Z"));
    }

    #[tokio::test]
    async fn failing_edit_leaves_election_untouched() {
        let f = setup();
        let mut c = cmd(f.election.id);
        c.name = Some("Renamed".to_string());
        c.candidates = Some(vec![]);

        let err = f.handler.handle(c).await.unwrap_err();

        assert_eq!(err, ElectionError::NoCandidates);
        assert_eq!(f.repo.get(&f.election.id).await.unwrap().name, "BDE");
        assert_eq!(f.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn edits_after_publication_are_rejected() {
        let f = setup();
        let mut published = f.election.clone();
        published.publish(ts("2025-01-11T00:00:00Z")).unwrap();
        f.repo.update(&published).await.unwrap();

        let mut c = cmd(f.election.id);
        c.name = Some("Too late".to_string());

        assert_eq!(
            f.handler.handle(c).await.unwrap_err(),
            ElectionError::AlreadyPublished
        );
    }

    #[tokio::test]
    async fn each_edit_is_stored_against_the_version_it_read() {
        let f = setup();
        let mut first = cmd(f.election.id);
        first.name = Some("BDE 2025".to_string());
        let mut second = cmd(f.election.id);
        second.criteria = Some(CriteriaSet::open().with_classes([ClassLevel::L3]));

        assert_eq!(f.handler.handle(first).await.unwrap().election.version, 1);
        assert_eq!(f.handler.handle(second).await.unwrap().election.version, 2);

        let stale = f.election.clone();
        assert_eq!(
            ElectionError::from(f.repo.update(&stale).await.unwrap_err()),
            ElectionError::Conflict(f.election.id)
        );
        assert_eq!(f.repo.get(&f.election.id).await.unwrap().name, "BDE 2025");
    }

    #[tokio::test]
    async fn empty_command_changes_nothing() {
        let f = setup();
        let result = f.handler.handle(cmd(f.election.id)).await.unwrap();
        assert!(result.event.is_none());
        assert_eq!(f.bus.event_count(), 0);
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
