//! UTC instants.
//!
//! Nothing in the domain reads the wall clock on its own. Lifecycle and
//! eligibility checks take a `Timestamp` from the [`Clock`](crate::ports::Clock)
//! port so tests can pin "now".

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Accepts any RFC 3339 offset and normalizes to UTC.
    pub fn parse_rfc3339(value: &str) -> Result<Self, ValidationError> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => Ok(Self(dt.with_timezone(&Utc))),
            Err(e) => Err(ValidationError::invalid_format("timestamp", e.to_string())),
        }
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self < other
    }

    /// Signed: negative when `earlier` is actually later.
    pub fn duration_since(&self, earlier: &Timestamp) -> Duration {
        self.0 - earlier.0
    }

    pub fn plus(&self, offset: Duration) -> Self {
        Self(self.0 + offset)
    }

    pub fn plus_secs(&self, secs: i64) -> Self {
        self.plus(Duration::seconds(secs))
    }

    pub fn plus_hours(&self, hours: i64) -> Self {
        self.plus(Duration::hours(hours))
    }

    pub fn minus_hours(&self, hours: i64) -> Self {
        self.plus_hours(-hours)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_rfc3339(s)
    }
}
