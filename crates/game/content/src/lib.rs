//! Ability content and data loaders for the arena engine.
//!
//! This crate houses the worked-example abilities and loads match data:
//! - Ability behaviours (Grappling Hook, Sweeping Cleave, Exhausting Blow, Bramble Hide)
//! - Ability definition tables (data-driven via RON)
//! - Scenarios: board plus starting creatures (data-driven via RON)
//! - Engine configuration and message overrides (data-driven via TOML)
//!
//! Content is consumed through the oracles in `arena_core::env` and never
//! appears in match state.

pub mod abilities;
pub mod messages;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use abilities::{
    AbilityCatalog, BrambleHide, ExhaustingBlow, GrapplingHook, SweepingCleave, behavior_for,
};
pub use messages::MessageTable;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentFactory, LoadResult, MessageLoader, ScenarioLoader,
};
