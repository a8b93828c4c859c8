//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Every event carries the [`battle_core::SessionId`]
//! it belongs to, so one bus serves all sessions of a runtime.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, SessionEvent, SessionGameEvent};
