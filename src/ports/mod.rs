//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the election core and its collaborators. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `Clock` - Injected current time
//! - `ElectionRepository` - Election source and admin writes
//! - `VoterDirectory` - Voter profile source
//! - `BiometricVerifier` - Fingerprint verification
//! - `VoteCommitter` - At-most-once vote write
//! - `VoteRepository` - Authoritative vote store and tally reader
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events

mod biometric_verifier;
mod clock;
mod election_repository;
mod event_publisher;
mod vote_committer;
mod vote_repository;
mod voter_directory;

pub use biometric_verifier::BiometricVerifier;
pub use clock::Clock;
pub use election_repository::{election_conflict, election_not_found, ElectionRepository};
pub use event_publisher::EventPublisher;
pub use vote_committer::VoteCommitter;
pub use vote_repository::{duplicate_vote, VoteRepository};
pub use voter_directory::{voter_not_found, VoterDirectory};
