//! Trigger-gated abilities.
//!
//! A creature carries [`AbilitySlot`]s; the content layer supplies an
//! [`AbilityDefinition`] and an [`AbilityBehavior`] for each [`AbilityKind`].
mod behavior;
mod definition;
mod kind;
mod lifecycle;
mod trigger;

pub use behavior::{AbilityBehavior, AbilityContext, Eligibility, MessageCode};
pub use definition::{AbilityDefinition, AbilityRange};
pub use kind::AbilityKind;
pub use lifecycle::{AbilityId, AbilitySlot, AbilityState, PendingQuery, TransitionError};
pub use trigger::{Phase, Trigger};
