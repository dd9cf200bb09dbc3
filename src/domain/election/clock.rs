//! Election clock - time-derived phase of an election window.
//!
//! `now` is always passed in; nothing here reads the wall clock.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Where `now` falls relative to a `[start, end)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElectionPhase {
    /// `now < start`
    Pending,
    /// `start <= now < end`
    Open,
    /// `now >= end`
    Closed,
}

impl fmt::Display for ElectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElectionPhase::Pending => "PENDING",
            ElectionPhase::Open => "OPEN",
            ElectionPhase::Closed => "CLOSED",
        };
        write!(f, "{}", s)
    }
}

/// Classifies `now` against a window. Start is inclusive, end exclusive.
pub fn phase(now: Timestamp, start: Timestamp, end: Timestamp) -> ElectionPhase {
    if now < start {
        ElectionPhase::Pending
    } else if now < end {
        ElectionPhase::Open
    } else {
        ElectionPhase::Closed
    }
}

/// Validated voting window with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionWindow {
    start: Timestamp,
    end: Timestamp,
}

impl ElectionWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::invalid_format(
                "window",
                format!("start {} must be before end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn phase_at(&self, now: Timestamp) -> ElectionPhase {
        phase(now, self.start, self.end)
    }

    /// Remaining time before the window opens, `None` once started.
    pub fn time_until_start(&self, now: Timestamp) -> Option<Duration> {
        (now < self.start).then(|| self.start.duration_since(&now))
    }

    /// Remaining time before the window closes, `None` unless open.
    pub fn time_until_end(&self, now: Timestamp) -> Option<Duration> {
        (self.phase_at(now) == ElectionPhase::Open).then(|| self.end.duration_since(&now))
    }

    pub fn duration(&self) -> Duration {
        self.end.duration_since(&self.start)
    }
}
