//! Results domain module.
//!
//! - `tally` - ResultsReport compilation
//! - `errors` - ResultsError

mod errors;
mod tally;

pub use errors::ResultsError;
pub use tally::{CandidateTally, ResultsReport};
