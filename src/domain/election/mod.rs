//! Election domain module.
//!
//! # Module Structure
//!
//! - `clock` - Phase of an election window at a given instant
//! - `lifecycle` - LifecycleState state machine and publish rule
//! - `aggregate` - Election aggregate
//! - `candidate` - Ballot entries
//! - `errors` - ElectionError
//! - `events` - Administrative domain events

mod aggregate;
mod candidate;
mod clock;
mod errors;
mod events;
mod lifecycle;

pub use aggregate::Election;
pub use candidate::Candidate;
pub use clock::{phase, ElectionPhase, ElectionWindow};
pub use errors::ElectionError;
pub use events::{
    ElectionChange, ElectionCreated, ElectionDeleted, ElectionPublished, ElectionUpdated,
};
pub use lifecycle::LifecycleState;
