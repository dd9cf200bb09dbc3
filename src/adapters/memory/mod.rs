//! In-memory repository adapters.
//!
//! Process-local implementations of the storage ports. Cloning shares the
//! underlying maps.

mod election_repository;
mod vote_repository;
mod voter_directory;

pub use election_repository::InMemoryElectionRepository;
pub use vote_repository::InMemoryVoteRepository;
pub use voter_directory::InMemoryVoterDirectory;
