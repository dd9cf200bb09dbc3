//! Election domain events.
//!
//! Events published when an administrator changes an election:
//! - `ElectionCreated` - New election defined
//! - `ElectionUpdated` - Name, window, criteria or candidates edited
//! - `ElectionPublished` - Results made public
//! - `ElectionDeleted` - Election and its votes removed

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ElectionId, EventId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// ElectionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new election is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionCreated {
    pub event_id: EventId,
    pub election_id: ElectionId,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub candidate_count: usize,
    pub created_at: Timestamp,
}

domain_event!(
    ElectionCreated,
    event_type = "election.created",
    aggregate_id = election_id,
    aggregate_type = "Election",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ElectionUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Which part of an election an edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectionChange {
    Name,
    Window,
    Criteria,
    Candidates,
}

/// Published after an administrator edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionUpdated {
    pub event_id: EventId,
    pub election_id: ElectionId,
    pub changes: Vec<ElectionChange>,
    pub updated_at: Timestamp,
}

domain_event!(
    ElectionUpdated,
    event_type = "election.updated",
    aggregate_id = election_id,
    aggregate_type = "Election",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ElectionPublished
// ════════════════════════════════════════════════════════════════════════════

/// Published when results become public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionPublished {
    pub event_id: EventId,
    pub election_id: ElectionId,
    pub total_votes: u64,
    pub published_at: Timestamp,
}

domain_event!(
    ElectionPublished,
    event_type = "election.published",
    aggregate_id = election_id,
    aggregate_type = "Election",
    occurred_at = published_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ElectionDeleted
// ════════════════════════════════════════════════════════════════════════════

/// Published after an election and its votes are removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionDeleted {
    pub event_id: EventId,
    pub election_id: ElectionId,
    pub votes_removed: u64,
    pub deleted_at: Timestamp,
}

domain_event!(
    ElectionDeleted,
    event_type = "election.deleted",
    aggregate_id = election_id,
    aggregate_type = "Election",
    occurred_at = deleted_at,
    event_id = event_id
);
