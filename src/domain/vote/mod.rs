//! Vote domain module.
//!
//! - `record` - Vote record
//! - `session` - VoteSessionState state machine
//! - `errors` - VoteError taxonomy and collaborator errors
//! - `events` - VoteCast

mod errors;
mod events;
mod record;
mod session;

pub use errors::{BiometricError, CommitError, VoteError};
pub use events::VoteCast;
pub use record::Vote;
pub use session::VoteSessionState;
