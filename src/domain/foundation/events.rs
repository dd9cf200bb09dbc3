//! Domain event plumbing.
//!
//! Aggregates describe what happened with plain serde structs. The
//! [`domain_event!`] macro wires a struct to [`DomainEvent`], and
//! [`EventEnvelope`] is what actually travels through an `EventPublisher`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Routing information every election or vote event exposes.
pub trait DomainEvent: Send + Sync {
    /// Dotted name subscribers route on, e.g. `"vote.cast"`.
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;

    /// `"Election"` for every event in this crate so far.
    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Implements [`DomainEvent`] for a struct by naming its fields.
///
/// ```ignore
/// domain_event!(
///     VoteCast,
///     event_type = "vote.cast",
///     aggregate_id = election_id,
///     aggregate_type = "Election",
///     occurred_at = cast_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $ty:ident,
        event_type = $name:expr,
        aggregate_id = $aggregate:ident,
        aggregate_type = $kind:expr,
        occurred_at = $at:ident,
        event_id = $id:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $ty {
            fn event_type(&self) -> &'static str {
                $name
            }
            fn aggregate_id(&self) -> String {
                self.$aggregate.to_string()
            }
            fn aggregate_type(&self) -> &'static str {
                $kind
            }
            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$at
            }
            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$id.clone()
            }
        }
    };
}

pub use domain_event;

/// Random per-event id, so a subscriber can drop redeliveries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A serialized event plus the fields needed to route it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    /// Administrator or voter that caused the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub payload: JsonValue,
}

impl EventEnvelope {
    pub fn from_event<E>(event: &E) -> Self
    where
        E: DomainEvent + Serialize,
    {
        Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_owned(),
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_owned(),
            occurred_at: event.occurred_at(),
            actor: None,
            // Events are plain structs of ids, strings and timestamps.
            payload: serde_json::to_value(event).expect("domain events serialize to JSON"),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Decodes the payload back into the event it was built from.
    pub fn decode<E: for<'de> Deserialize<'de>>(&self) -> Result<E, serde_json::Error> {
        E::deserialize(&self.payload)
    }
}
