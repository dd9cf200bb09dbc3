//! In-memory election repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::election::Election;
use crate::domain::foundation::{DomainError, ElectionId, ErrorCode};
use crate::ports::{election_conflict, election_not_found, ElectionRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryElectionRepository {
    elections: Arc<RwLock<HashMap<ElectionId, Election>>>,
}

impl InMemoryElectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository already holding `elections`.
    pub fn with_elections(elections: impl IntoIterator<Item = Election>) -> Self {
        let map = elections.into_iter().map(|e| (e.id, e)).collect();
        Self {
            elections: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn count(&self) -> usize {
        self.elections.read().await.len()
    }
}

#[async_trait]
impl ElectionRepository for InMemoryElectionRepository {
    async fn save(&self, election: &Election) -> Result<(), DomainError> {
        let mut elections = self.elections.write().await;
        if elections.contains_key(&election.id) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Election already exists: {}", election.id),
            )
            .with_detail("field", "id"));
        }
        elections.insert(election.id, election.clone());
        Ok(())
    }

    async fn update(&self, election: &Election) -> Result<u64, DomainError> {
        let mut elections = self.elections.write().await;
        let stored = elections
            .get_mut(&election.id)
            .ok_or_else(|| election_not_found(&election.id))?;
        if stored.version != election.version {
            return Err(election_conflict(&election.id, stored.version, election.version));
        }
        *stored = Election {
            version: election.version + 1,
            ..election.clone()
        };
        Ok(stored.version)
    }

    async fn find_by_id(&self, id: &ElectionId) -> Result<Option<Election>, DomainError> {
        Ok(self.elections.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Election>, DomainError> {
        Ok(self.elections.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: &ElectionId) -> Result<bool, DomainError> {
        Ok(self.elections.write().await.remove(id).is_some())
    }
}
