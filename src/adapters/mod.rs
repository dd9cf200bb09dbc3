//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory election, voter and vote stores
//! - `events` - In-memory event bus
//! - `clock` - System and fixed clocks
//! - `biometric` - Scripted fingerprint verifier

pub mod biometric;
pub mod clock;
pub mod events;
pub mod memory;

pub use biometric::{ScriptedBiometricVerifier, ScriptedReading};
pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::{InMemoryElectionRepository, InMemoryVoteRepository, InMemoryVoterDirectory};
