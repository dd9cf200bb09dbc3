//! Vote repository port - authoritative vote store and tally reader.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ElectionId, ErrorCode, VoterId};
use crate::domain::vote::Vote;

/// Storage for recorded votes.
///
/// # Uniqueness
///
/// `insert_unique` must be atomic per `(election_id, voter_id)`: of any
/// number of concurrent inserts for the same pair exactly one succeeds and
/// the rest fail with `DuplicateVote`.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert a vote unless one exists for the same ballot key.
    ///
    /// # Errors
    ///
    /// - `DuplicateVote` if the voter already voted in this election
    /// - `StoreError` on persistence failure
    async fn insert_unique(&self, vote: &Vote) -> Result<(), DomainError>;

    async fn find(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
    ) -> Result<Option<Vote>, DomainError>;

    async fn list_by_election(&self, election_id: &ElectionId) -> Result<Vec<Vote>, DomainError>;

    /// Withdraw one ballot. Returns false if there was none.
    ///
    /// Only for undoing an insert that raced an election deletion; votes are
    /// otherwise never removed one by one.
    async fn remove(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
    ) -> Result<bool, DomainError>;

    /// Remove every vote of an election. Returns how many were removed.
    async fn delete_by_election(&self, election_id: &ElectionId) -> Result<u64, DomainError>;

    async fn has_voted(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
    ) -> Result<bool, DomainError> {
        Ok(self.find(election_id, voter_id).await?.is_some())
    }
}

pub fn duplicate_vote(election_id: &ElectionId, voter_id: &VoterId) -> DomainError {
    DomainError::new(
        ErrorCode::DuplicateVote,
        format!("Voter {} already voted in election {}", voter_id, election_id),
    )
    .with_detail("election_id", election_id.to_string())
    .with_detail("voter_id", voter_id.to_string())
}
