//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, the state machine
//! trait and event plumbing that form the vocabulary of the election domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId};
pub use ids::{CandidateId, ElectionId, VoteId, VoteSessionId, VoterId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
