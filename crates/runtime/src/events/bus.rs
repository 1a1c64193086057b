//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{AbilityEvent, StatusEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round and turn boundaries
    Turn,
    /// Ability queries, blocks and activations
    Ability,
    /// Animations and derived status
    Status,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Turn(TurnEvent),
    Ability(AbilityEvent),
    Status(StatusEvent),
}

impl SessionEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SessionEvent::Turn(_) => Topic::Turn,
            SessionEvent::Ability(_) => Topic::Ability,
            SessionEvent::Status(_) => Topic::Status,
        }
    }
}

struct Channels {
    turn: broadcast::Sender<SessionEvent>,
    ability: broadcast::Sender<SessionEvent>,
    status: broadcast::Sender<SessionEvent>,
}

/// Topic-based event bus
///
/// Consumers subscribe to the topics they care about. Publishing is
/// best-effort: events sent while a topic has no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                turn: broadcast::channel(capacity).0,
                ability: broadcast::channel(capacity).0,
                status: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<SessionEvent> {
        match topic {
            Topic::Turn => &self.channels.turn,
            Topic::Ability => &self.channels.ability,
            Topic::Status => &self.channels.status,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: SessionEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic, in `Turn`, `Ability`, `Status` order.
    pub fn subscribe_all(&self) -> [broadcast::Receiver<SessionEvent>; 3] {
        [
            self.subscribe(Topic::Turn),
            self.subscribe(Topic::Ability),
            self.subscribe(Topic::Status),
        ]
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
