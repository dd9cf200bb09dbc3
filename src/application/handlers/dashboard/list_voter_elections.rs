//! ListVoterElectionsHandler - Query handler for a voter's election list.
//!
//! Only elections the voter is eligible for are listed. Eligibility is
//! decided by the same evaluator the vote session uses.

use std::sync::Arc;

use chrono::Duration;
use futures::future::try_join_all;

use crate::domain::election::{Election, ElectionPhase, LifecycleState};
use crate::domain::foundation::{DomainError, ErrorCode, VoterId};
use crate::ports::{Clock, ElectionRepository, VoteRepository, VoterDirectory};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("Voter not found: {0}")]
    VoterNotFound(VoterId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl DashboardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DashboardError::VoterNotFound(_) => ErrorCode::VoterNotFound,
            DashboardError::Infrastructure(_) => ErrorCode::StoreError,
        }
    }
}

impl From<DomainError> for DashboardError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::VoterNotFound => match err
                .detail("voter_id")
                .and_then(|id| VoterId::new(id).ok())
            {
                Some(id) => DashboardError::VoterNotFound(id),
                None => DashboardError::Infrastructure(err.to_string()),
            },
            _ => DashboardError::Infrastructure(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListVoterElectionsQuery {
    pub voter_id: VoterId,
}

/// One row of the voter's election list.
#[derive(Debug, Clone)]
pub struct VoterElectionItem {
    pub election: Election,
    pub phase: ElectionPhase,
    pub state: LifecycleState,
    pub has_voted: bool,
    /// Open and not yet voted.
    pub can_vote: bool,
    /// Set while the election is pending.
    pub time_until_start: Option<Duration>,
}

pub struct ListVoterElectionsHandler {
    elections: Arc<dyn ElectionRepository>,
    voters: Arc<dyn VoterDirectory>,
    votes: Arc<dyn VoteRepository>,
    clock: Arc<dyn Clock>,
}

impl ListVoterElectionsHandler {
    pub fn new(
        elections: Arc<dyn ElectionRepository>,
        voters: Arc<dyn VoterDirectory>,
        votes: Arc<dyn VoteRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            elections,
            voters,
            votes,
            clock,
        }
    }

    /// Lists eligible elections, open and pending ones first, most recent
    /// start first within each group.
    pub async fn handle(
        &self,
        query: ListVoterElectionsQuery,
    ) -> Result<Vec<VoterElectionItem>, DashboardError> {
        let now = self.clock.now();
        let profile = self.voters.get_profile(&query.voter_id).await?;

        let eligible: Vec<Election> = self
            .elections
            .list_all()
            .await?
            .into_iter()
            .filter(|e| e.admits(&profile))
            .collect();
        let voted = try_join_all(
            eligible
                .iter()
                .map(|e| self.votes.has_voted(&e.id, &query.voter_id)),
        )
        .await?;

        let mut items: Vec<VoterElectionItem> = eligible
            .into_iter()
            .zip(voted)
            .map(|(election, has_voted)| {
                let state = election.lifecycle_state(now);
                VoterElectionItem {
                    phase: election.phase(now),
                    state,
                    has_voted,
                    can_vote: state.can_vote() && !has_voted,
                    time_until_start: election.window.time_until_start(now),
                    election,
                }
            })
            .collect();

        items.sort_by(|a, b| {
            a.state
                .is_closed()
                .cmp(&b.state.is_closed())
                .then_with(|| b.election.window.start().cmp(&a.election.window.start()))
        });

        tracing::debug!(voter_id = %query.voter_id, count = items.len(), "listed voter elections");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        FixedClock, InMemoryElectionRepository, InMemoryVoteRepository, InMemoryVoterDirectory,
    };
    use crate::domain::election::{Candidate, ElectionWindow};
    use crate::domain::eligibility::CriteriaSet;
    use crate::domain::foundation::{CandidateId, Timestamp};
    use crate::domain::vote::Vote;
    use crate::domain::voter::{ClassLevel, Mention, VoterProfile};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    fn election(name: &str, start: &str, end: &str, criteria: CriteriaSet) -> Election {
        Election::create(
            name,
            ElectionWindow::new(ts(start), ts(end)).unwrap(),
            criteria,
            vec![Candidate::new(CandidateId::new("c1").unwrap(), "Rakoto").unwrap()],
            ts("2025-01-01T00:00:00Z"),
        )
        .unwrap()
    }

    fn voter() -> VoterProfile {
        VoterProfile::new(
            VoterId::new("etu-1").unwrap(),
            ClassLevel::L2,
            Mention::Droit,
            [],
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_eligible_elections_in_dashboard_order() {
        let closed = election(
            "Closed",
            "2025-01-01T08:00:00Z",
            "2025-01-01T18:00:00Z",
            CriteriaSet::open(),
        );
        let open = election(
            "Open",
            "2025-01-10T08:00:00Z",
            "2025-01-10T18:00:00Z",
            CriteriaSet::open(),
        );
        let pending = election(
            "Pending",
            "2025-01-20T08:00:00Z",
            "2025-01-20T18:00:00Z",
            CriteriaSet::open().with_mentions([Mention::Droit]),
        );
        let ineligible = election(
            "Masters only",
            "2025-01-10T08:00:00Z",
            "2025-01-10T18:00:00Z",
            CriteriaSet::open().with_classes([ClassLevel::M1, ClassLevel::M2]),
        );
        let votes = InMemoryVoteRepository::with_votes([Vote::cast(
            closed.id,
            VoterId::new("etu-1").unwrap(),
            CandidateId::new("c1").unwrap(),
            ts("2025-01-01T09:00:00Z"),
        )]);
        let handler = ListVoterElectionsHandler::new(
            Arc::new(InMemoryElectionRepository::with_elections([
                closed.clone(),
                open.clone(),
                pending.clone(),
                ineligible,
            ])),
            Arc::new(InMemoryVoterDirectory::with_profiles([voter()])),
            Arc::new(votes),
            Arc::new(FixedClock::at(ts("2025-01-10T12:00:00Z"))),
        );

        let items = handler
            .handle(ListVoterElectionsQuery {
                voter_id: VoterId::new("etu-1").unwrap(),
            })
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.election.name.as_str()).collect();
        assert_eq!(names, vec!["Pending", "Open", "Closed"]);

        assert_eq!(items[0].phase, ElectionPhase::Pending);
        assert_eq!(items[0].time_until_start, Some(Duration::days(10) - Duration::hours(4)));
        assert!(!items[0].can_vote);

        assert_eq!(items[1].state, LifecycleState::Open);
        assert!(items[1].can_vote);
        assert!(items[1].time_until_start.is_none());

        assert!(items[2].has_voted);
        assert!(!items[2].can_vote);
    }

    #[tokio::test]
    async fn already_voted_blocks_open_election() {
        let open = election(
            "Open",
            "2025-01-10T08:00:00Z",
            "2025-01-10T18:00:00Z",
            CriteriaSet::open(),
        );
        let votes = InMemoryVoteRepository::with_votes([Vote::cast(
            open.id,
            VoterId::new("etu-1").unwrap(),
            CandidateId::new("c1").unwrap(),
            ts("2025-01-10T09:00:00Z"),
        )]);
        let handler = ListVoterElectionsHandler::new(
            Arc::new(InMemoryElectionRepository::with_elections([open])),
            Arc::new(InMemoryVoterDirectory::with_profiles([voter()])),
            Arc::new(votes),
            Arc::new(FixedClock::at(ts("2025-01-10T12:00:00Z"))),
        );

        let items = handler
            .handle(ListVoterElectionsQuery {
                voter_id: VoterId::new("etu-1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].has_voted);
        assert!(!items[0].can_vote);
    }

    #[tokio::test]
    async fn unknown_voter_is_not_found() {
        let handler = ListVoterElectionsHandler::new(
            Arc::new(InMemoryElectionRepository::new()),
            Arc::new(InMemoryVoterDirectory::new()),
            Arc::new(InMemoryVoteRepository::new()),
            Arc::new(FixedClock::at(Timestamp::now())),
        );
        let id = VoterId::new("ghost").unwrap();

        let err = handler
            .handle(ListVoterElectionsQuery {
                voter_id: id.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::VoterNotFound(id));
    }
}
