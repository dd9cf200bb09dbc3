//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod dashboard;
pub mod election;
pub mod results;
pub mod voting;

pub use dashboard::{
    DashboardError, ListVoterElectionsHandler, ListVoterElectionsQuery, VoterElectionItem,
};
pub use election::{
    CreateElectionCommand, CreateElectionHandler, CreateElectionResult, DeleteElectionCommand,
    DeleteElectionHandler, DeleteElectionResult, PublishElectionCommand, PublishElectionHandler,
    PublishElectionResult, UpdateElectionCommand, UpdateElectionHandler, UpdateElectionResult,
};
pub use results::{Audience, GetResultsHandler, GetResultsQuery};
pub use voting::{
    CommitOutcome, CommitVoteHandler, StartVoteSessionCommand, StartVoteSessionHandler,
    VoteSession, VotingPorts,
};
