//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that records every envelope

mod in_memory;

pub use in_memory::InMemoryEventBus;
