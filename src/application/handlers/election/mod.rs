//! Election administration handlers.

mod create_election;
mod delete_election;
mod publish_election;
mod update_election;

pub use create_election::{CreateElectionCommand, CreateElectionHandler, CreateElectionResult};
pub use delete_election::{DeleteElectionCommand, DeleteElectionHandler, DeleteElectionResult};
pub use publish_election::{
    PublishElectionCommand, PublishElectionHandler, PublishElectionResult,
};
pub use update_election::{UpdateElectionCommand, UpdateElectionHandler, UpdateElectionResult};
