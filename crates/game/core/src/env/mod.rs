//! Traits describing collaborators the engine reads from.
//!
//! Oracles expose ability content, the mitigation rule and observational
//! hooks. The [`Env`] aggregate bundles them with the [`EngineConfig`] so
//! every operation receives an explicit context instead of ambient state.
mod abilities;
mod error;
mod mitigation;
mod observer;

use std::fmt;

pub use abilities::AbilityOracle;
pub use error::OracleError;
pub use mitigation::{FlatMitigation, MitigationOracle};
pub use observer::{MessageOracle, StatusObserver};

use crate::ability::MessageCode;
use crate::config::EngineConfig;
use crate::state::Creature;

/// Aggregates the collaborators required by the engine and resolvers.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    config: &'a EngineConfig,
    abilities: Option<&'a dyn AbilityOracle>,
    mitigation: Option<&'a dyn MitigationOracle>,
    observer: Option<&'a dyn StatusObserver>,
    messages: Option<&'a dyn MessageOracle>,
}

impl<'a> Env<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            abilities: None,
            mitigation: None,
            observer: None,
            messages: None,
        }
    }

    pub fn with_abilities(mut self, abilities: &'a dyn AbilityOracle) -> Self {
        self.abilities = Some(abilities);
        self
    }

    pub fn with_mitigation(mut self, mitigation: &'a dyn MitigationOracle) -> Self {
        self.mitigation = Some(mitigation);
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn StatusObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_messages(mut self, messages: &'a dyn MessageOracle) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Returns the AbilityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::AbilitiesNotAvailable` if no ability oracle was provided.
    pub fn abilities(&self) -> Result<&'a dyn AbilityOracle, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Mitigation rule, [`FlatMitigation`] unless overridden.
    pub fn mitigation(&self) -> &'a dyn MitigationOracle {
        self.mitigation.unwrap_or(&FlatMitigation)
    }

    pub fn messages(&self) -> Result<&'a dyn MessageOracle, OracleError> {
        self.messages.ok_or(OracleError::MessagesNotAvailable)
    }

    /// Text for `code`, falling back to its snake_case name.
    pub fn describe(&self, code: MessageCode) -> &'a str {
        self.messages
            .and_then(|messages| messages.message(code))
            .unwrap_or(code.as_str())
    }

    pub(crate) fn notify_endurance(&self, creature: &Creature) {
        if let Some(observer) = self.observer {
            observer.endurance_changed(creature);
        }
    }
}

impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("config", self.config)
            .field("abilities", &self.abilities.is_some())
            .field("mitigation", &self.mitigation.is_some())
            .field("observer", &self.observer.is_some())
            .field("messages", &self.messages.is_some())
            .finish()
    }
}
