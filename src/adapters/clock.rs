//! Clock adapters.

use chrono::Duration;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<Timestamp>>,
}

impl FixedClock {
    pub fn at(now: Timestamp) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.write().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|p| p.into_inner());
        *now = now.plus(by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_moves_only_when_told() {
        let start = Timestamp::parse_rfc3339("2025-01-10T08:00:00Z").unwrap();
        let clock = FixedClock::at(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::hours(10));
        assert_eq!(clock.now(), start.plus_hours(10));
    }

    #[test]
    fn clones_share_time() {
        let clock = FixedClock::at(Timestamp::now());
        let shared = clock.clone();
        let later = Timestamp::now().plus_hours(5);
        clock.set(later);
        assert_eq!(shared.now(), later);
    }

    #[test]
    fn system_clock_is_close_to_now() {
        let before = Timestamp::now();
        let read = SystemClock.now();
        assert!(!read.is_before(&before));
    }
}
