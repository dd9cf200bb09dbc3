//! Voter dashboard query handlers.

mod list_voter_elections;

pub use list_voter_elections::{
    DashboardError, ListVoterElectionsHandler, ListVoterElectionsQuery, VoterElectionItem,
};
