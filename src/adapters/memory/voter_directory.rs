//! In-memory voter directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, VoterId};
use crate::domain::voter::VoterProfile;
use crate::ports::VoterDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryVoterDirectory {
    profiles: Arc<RwLock<HashMap<VoterId, VoterProfile>>>,
}

impl InMemoryVoterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = VoterProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|p| (p.voter_id().clone(), p))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(map)),
        }
    }

    /// Inserts or replaces a profile, e.g. after an account edit.
    pub async fn upsert(&self, profile: VoterProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.voter_id().clone(), profile);
    }

    /// Removes a voter. Their recorded votes are untouched.
    pub async fn remove(&self, voter_id: &VoterId) -> bool {
        self.profiles.write().await.remove(voter_id).is_some()
    }
}

#[async_trait]
impl VoterDirectory for InMemoryVoterDirectory {
    async fn find_profile(&self, voter_id: &VoterId) -> Result<Option<VoterProfile>, DomainError> {
        Ok(self.profiles.read().await.get(voter_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<VoterProfile>, DomainError> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }
}
