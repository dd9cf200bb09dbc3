//! Univote - University Election Core
//!
//! Decides who may vote in which student election and when, and drives a
//! voter through a biometric-gated, at-most-once vote.
//!
//! - `domain` - eligibility rules, election clock and lifecycle, vote session
//!   state machine, results
//! - `ports` / `adapters` - collaborator contracts and in-memory
//!   implementations
//! - `application` - election administration, results and voting handlers
//! - `config` / `cli` - configuration and the admin command line

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
