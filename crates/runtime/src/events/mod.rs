//! Topic-based event bus for session events.
//!
//! Every engine outcome the session produces is published here, so
//! presentation layers can subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{EventBus, SessionEvent, Topic};
pub use types::{AbilityEvent, StatusEvent, TurnEvent};
