//! Recorded vote.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CandidateId, ElectionId, Timestamp, VoteId, VoterId};

/// One voter's choice in one election.
///
/// At most one exists per `(election_id, voter_id)`. Never mutated. The
/// voter reference is a back-reference only: removing the voter leaves the
/// vote in place for tally integrity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub election_id: ElectionId,
    pub voter_id: VoterId,
    pub candidate_id: CandidateId,
    pub cast_at: Timestamp,
}

impl Vote {
    pub fn cast(
        election_id: ElectionId,
        voter_id: VoterId,
        candidate_id: CandidateId,
        cast_at: Timestamp,
    ) -> Self {
        Self {
            id: VoteId::new(),
            election_id,
            voter_id,
            candidate_id,
            cast_at,
        }
    }

    /// The uniqueness key enforced by the vote store.
    pub fn ballot_key(&self) -> (ElectionId, VoterId) {
        (self.election_id, self.voter_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_assigns_fresh_id() {
        let election = ElectionId::new();
        let a = Vote::cast(
            election,
            VoterId::new("etu-1").unwrap(),
            CandidateId::new("c1").unwrap(),
            Timestamp::now(),
        );
        let b = Vote::cast(
            election,
            VoterId::new("etu-1").unwrap(),
            CandidateId::new("c1").unwrap(),
            Timestamp::now(),
        );
        assert_ne!(a.id, b.id);
        assert_eq!(a.ballot_key(), b.ballot_key());
    }
}
