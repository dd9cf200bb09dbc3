//! Clock port - the single source of "now".
//!
//! Lifecycle decisions take time from this port instead of reading the
//! wall clock, so time-boundary behavior is testable.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
