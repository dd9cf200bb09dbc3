//! Voting handlers.
//!
//! - `CommitVoteHandler` - Server-side at-most-once vote write
//! - `StartVoteSessionHandler` / `VoteSession` - Client-side voting flow

mod commit_vote;
mod vote_session;

pub use commit_vote::CommitVoteHandler;
pub use vote_session::{
    CommitOutcome, StartVoteSessionCommand, StartVoteSessionHandler, VoteSession, VotingPorts,
};
