//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through the election and vote stores; query
//! handlers only read. `VoteSession` drives one voter's attempt end to end.

pub mod handlers;

pub use handlers::{
    // Election administration
    CreateElectionCommand, CreateElectionHandler, CreateElectionResult,
    DeleteElectionCommand, DeleteElectionHandler, DeleteElectionResult,
    PublishElectionCommand, PublishElectionHandler, PublishElectionResult,
    UpdateElectionCommand, UpdateElectionHandler, UpdateElectionResult,
    // Queries
    Audience, DashboardError, GetResultsHandler, GetResultsQuery,
    ListVoterElectionsHandler, ListVoterElectionsQuery, VoterElectionItem,
    // Voting
    CommitOutcome, CommitVoteHandler, StartVoteSessionCommand, StartVoteSessionHandler,
    VoteSession, VotingPorts,
};
