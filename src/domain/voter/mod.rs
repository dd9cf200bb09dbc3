//! Voter domain module.
//!
//! - `attributes` - Class levels, academic tracks, activities, sports
//! - `profile` - VoterProfile value object

mod attributes;
mod profile;

pub use attributes::{Activity, ClassLevel, Mention, SportType};
pub use profile::VoterProfile;
