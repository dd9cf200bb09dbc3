//! Results query handlers.

mod get_results;

pub use get_results::{Audience, GetResultsHandler, GetResultsQuery};
