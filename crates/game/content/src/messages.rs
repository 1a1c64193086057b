//! Human-readable text for eligibility failures.

use std::collections::BTreeMap;

use arena_core::{MessageCode, MessageOracle};

/// Message code to display text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTable {
    messages: BTreeMap<MessageCode, String>,
}

impl MessageTable {
    pub fn empty() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }

    /// Default English strings for every code.
    pub fn english() -> Self {
        use MessageCode::*;
        [
            (NotMoveable, "That creature cannot be moved."),
            (NoTarget, "No valid target."),
            (MaterializationSickness, "Just arrived; cannot act this round."),
            (AlreadyUsed, "Already used this turn."),
            (WrongPhase, "Cannot be used now."),
            (NotActive, "Not this creature's turn."),
            (Dead, "This creature is dead."),
            (Fatigued, "Too exhausted."),
        ]
        .into_iter()
        .fold(Self::empty(), |table, (code, text)| table.with(code, text))
    }

    pub fn with(mut self, code: MessageCode, text: impl Into<String>) -> Self {
        self.messages.insert(code, text.into());
        self
    }

    /// Overrides entries with those from `other`.
    pub fn merge(mut self, other: MessageTable) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::english()
    }
}

impl From<BTreeMap<MessageCode, String>> for MessageTable {
    fn from(messages: BTreeMap<MessageCode, String>) -> Self {
        Self { messages }
    }
}

impl MessageOracle for MessageTable {
    fn message(&self, code: MessageCode) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }
}
