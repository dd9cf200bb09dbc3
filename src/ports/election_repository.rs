//! Election repository port.
//!
//! Election source for the voting core and write side for administrators.

use async_trait::async_trait;

use crate::domain::election::Election;
use crate::domain::foundation::{DomainError, ElectionId, ErrorCode};

/// Repository port for Election aggregate persistence.
#[async_trait]
pub trait ElectionRepository: Send + Sync {
    /// Save a new election.
    async fn save(&self, election: &Election) -> Result<(), DomainError>;

    /// Replace an existing election if nobody wrote it since it was loaded.
    ///
    /// The write is accepted only when the stored `version` equals
    /// `election.version`; the stored copy then carries the next version,
    /// which is returned.
    ///
    /// # Errors
    ///
    /// - `ElectionNotFound` if the election doesn't exist
    /// - `ConcurrentModification` if the stored version moved on
    async fn update(&self, election: &Election) -> Result<u64, DomainError>;

    /// Find an election by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ElectionId) -> Result<Option<Election>, DomainError>;

    /// All elections, in no particular order.
    async fn list_all(&self) -> Result<Vec<Election>, DomainError>;

    /// Delete an election. Returns false if it did not exist.
    async fn delete(&self, id: &ElectionId) -> Result<bool, DomainError>;

    /// Find an election, failing with `ElectionNotFound` if absent.
    async fn get(&self, id: &ElectionId) -> Result<Election, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| election_not_found(id))
    }
}

/// The `ConcurrentModification` error every adapter reports on a stale write.
pub fn election_conflict(id: &ElectionId, stored: u64, attempted: u64) -> DomainError {
    DomainError::new(
        ErrorCode::ConcurrentModification,
        format!(
            "Election {} is at version {}, write was based on {}",
            id, stored, attempted
        ),
    )
    .with_detail("election_id", id.to_string())
}

/// The `ElectionNotFound` error every adapter reports, carrying the id.
pub fn election_not_found(id: &ElectionId) -> DomainError {
    DomainError::new(ErrorCode::ElectionNotFound, format!("Election not found: {}", id))
        .with_detail("election_id", id.to_string())
}
