//! Event bus that keeps every envelope in memory.
//!
//! The CLI wires it in because nothing downstream consumes events there.
//! Tests use it to assert on what a handler emitted.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

#[derive(Default)]
pub struct InMemoryEventBus {
    log: Mutex<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<EventEnvelope>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of everything published so far, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.log().clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.log()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.log().len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.log().iter().any(|e| e.event_type == event_type)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            actor = event.actor.as_deref().unwrap_or("-"),
            "event published"
        );
        self.log().push(event);
        Ok(())
    }
}
