//! Eligibility domain module.
//!
//! - `criteria` - CriteriaSet attached to each election
//! - `evaluator` - Pure eligibility decision and per-check verdict

mod criteria;
mod evaluator;

pub use criteria::CriteriaSet;
pub use evaluator::{evaluate, is_eligible, EligibilityCheck, EligibilityVerdict};
