//! In-memory vote store.
//!
//! The write lock is held across the existence check and the insert, which
//! makes `insert_unique` atomic per ballot key.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ElectionId, VoterId};
use crate::domain::vote::Vote;
use crate::ports::{duplicate_vote, VoteRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryVoteRepository {
    votes: Arc<RwLock<HashMap<(ElectionId, VoterId), Vote>>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_votes(votes: impl IntoIterator<Item = Vote>) -> Self {
        let map = votes.into_iter().map(|v| (v.ballot_key(), v)).collect();
        Self {
            votes: Arc::new(RwLock::new(map)),
        }
    }

    /// Total rows across all elections.
    pub async fn count(&self) -> usize {
        self.votes.read().await.len()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn insert_unique(&self, vote: &Vote) -> Result<(), DomainError> {
        let mut votes = self.votes.write().await;
        let key = vote.ballot_key();
        if votes.contains_key(&key) {
            return Err(duplicate_vote(&vote.election_id, &vote.voter_id));
        }
        votes.insert(key, vote.clone());
        Ok(())
    }

    async fn find(
        &self,
        election_id: &ElectionId,
        voter_id: &VoterId,
    ) -> Result<Option<Vote>, DomainError> {
        Ok(self
            .votes
            .read()
            .await
            .get(&(*election_id, voter_id.clone()))
            .cloned())
    }

    async fn list_by_election(&self, election_id: &ElectionId) -> Result<Vec<Vote>, DomainError> {
        let mut votes: Vec<Vote> = self
            .votes
            .read()
            .await
            .values()
            .filter(|v| &v.election_id == election_id)
            .cloned()
            .collect();
        votes.sort_by_key(|v| v.cast_at);
        Ok(votes)
    }

    async fn remove(&self, election_id: &ElectionId, voter_id: &VoterId) -> Result<bool, DomainError> {
        Ok(self
            .votes
            .write()
            .await
            .remove(&(*election_id, voter_id.clone()))
            .is_some())
    }

    async fn delete_by_election(&self, election_id: &ElectionId) -> Result<u64, DomainError> {
        let mut votes = self.votes.write().await;
        let before = votes.len();
        votes.retain(|(e, _), _| e != election_id);
        Ok((before - votes.len()) as u64)
    }
}
