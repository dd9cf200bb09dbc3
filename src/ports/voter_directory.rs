//! Voter directory port - profile source.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, VoterId};
use crate::domain::voter::VoterProfile;

/// Read access to registered voters.
///
/// Profiles come from the account system and may violate the sport
/// invariant; consumers evaluate them as-is.
#[async_trait]
pub trait VoterDirectory: Send + Sync {
    /// Find a profile. Returns `None` if the voter is unknown.
    async fn find_profile(&self, voter_id: &VoterId) -> Result<Option<VoterProfile>, DomainError>;

    /// Every registered profile. Used to count eligible voters.
    async fn list_profiles(&self) -> Result<Vec<VoterProfile>, DomainError>;

    /// Find a profile, failing with `VoterNotFound` if unknown.
    async fn get_profile(&self, voter_id: &VoterId) -> Result<VoterProfile, DomainError> {
        self.find_profile(voter_id)
            .await?
            .ok_or_else(|| voter_not_found(voter_id))
    }
}

pub fn voter_not_found(id: &VoterId) -> DomainError {
    DomainError::new(ErrorCode::VoterNotFound, format!("Voter not found: {}", id))
        .with_detail("voter_id", id.to_string())
}
