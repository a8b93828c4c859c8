//! Topic-based event bus implementation.

use std::collections::HashMap;

use battle_core::SessionId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ActionEvent, SessionEvent, SessionGameEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Engine events (cards drawn, attacks, phase changes, ...)
    Game,
    /// Accepted and rejected submissions
    Action,
    /// Session lifecycle and persistence failures
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Game(SessionGameEvent),
    Action(ActionEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(_) => Topic::Game,
            Event::Action(_) => Topic::Action,
            Event::Session(_) => Topic::Session,
        }
    }

    pub fn session(&self) -> SessionId {
        match self {
            Event::Game(event) => event.session,
            Event::Action(event) => event.session(),
            Event::Session(event) => event.session(),
        }
    }
}

/// Topic-based event bus
///
/// Each topic has its own broadcast channel, so a slow consumer of engine
/// events cannot make a lifecycle subscriber lag. Publishing is best-effort:
/// events published with no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    game: broadcast::Sender<Event>,
    action: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            game: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Game => &self.game,
            Topic::Action => &self.action,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SessionEvent;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut session_rx = bus.subscribe(Topic::Session);
        let mut game_rx = bus.subscribe(Topic::Game);

        bus.publish(Event::Session(SessionEvent::Resumed {
            session: SessionId(3),
        }));

        let event = session_rx.recv().await.unwrap();
        assert_eq!(event.session(), SessionId(3));
        assert!(game_rx.try_recv().is_err());
    }
}
