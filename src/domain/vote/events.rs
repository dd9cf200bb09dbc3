//! Vote domain events.
//!
//! `VoteCast` carries no candidate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ElectionId, EventId, Timestamp, VoteId, VoterId};

/// Published when a vote is durably recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteCast {
    pub event_id: EventId,
    pub vote_id: VoteId,
    pub election_id: ElectionId,
    pub voter_id: VoterId,
    pub cast_at: Timestamp,
}

domain_event!(
    VoteCast,
    event_type = "vote.cast",
    aggregate_id = election_id,
    aggregate_type = "Election",
    occurred_at = cast_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EventEnvelope;

    #[test]
    fn payload_has_no_candidate() {
        let event = VoteCast {
            event_id: EventId::new(),
            vote_id: VoteId::new(),
            election_id: ElectionId::new(),
            voter_id: VoterId::new("etu-1").unwrap(),
            cast_at: Timestamp::now(),
        };
        let envelope = EventEnvelope::from_event(&event);

        assert_eq!(envelope.event_type, "vote.cast");
        assert!(envelope.payload.get("candidate_id").is_none());
    }
}
