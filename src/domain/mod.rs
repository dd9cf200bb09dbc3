//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `voter` - Voter attributes and profiles
//! - `eligibility` - Criteria sets and the eligibility evaluator
//! - `election` - Election clock, lifecycle and aggregate
//! - `vote` - Vote records and the vote session state machine
//! - `results` - Tally compilation

pub mod election;
pub mod eligibility;
pub mod foundation;
pub mod results;
pub mod vote;
pub mod voter;
