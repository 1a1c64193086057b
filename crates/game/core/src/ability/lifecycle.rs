//! Per-invocation ability state machine.
//!
//! ```text
//! Idle -> Eligible -> Targeted -> Activated -> Ended -> Idle
//!            |
//!            +-> Idle   (query cancelled)
//! ```
//!
//! An ability that fails `require` never leaves `Idle`. `Ended` is terminal
//! for one trigger occurrence; the engine resets the slot to `Idle` before the
//! next occurrence is evaluated, so no target state survives across them.

use std::fmt;

use super::{AbilityKind, Phase};
use crate::state::CreatureId;
use crate::targeting::TargetRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityState {
    #[default]
    Idle,
    /// `require` passed for the current occurrence.
    Eligible,
    /// Target resolved (or skipped for passive triggers).
    Targeted,
    Activated,
    Ended,
}

impl AbilityState {
    pub fn can_transition_to(self, next: AbilityState) -> bool {
        use AbilityState::*;
        matches!(
            (self, next),
            (Idle, Eligible)
                | (Eligible, Targeted)
                | (Eligible, Idle)
                | (Targeted, Activated)
                | (Targeted, Idle)
                | (Activated, Ended)
                | (Ended, Idle)
        )
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Illegal lifecycle step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("illegal ability transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: AbilityState,
    pub to: AbilityState,
}

/// An ability owned by a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub kind: AbilityKind,
    pub upgraded: bool,
    state: AbilityState,
    /// Interactive use already spent this turn.
    pub used: bool,
}

impl AbilitySlot {
    pub fn new(kind: AbilityKind, upgraded: bool) -> Self {
        Self {
            kind,
            upgraded,
            state: AbilityState::Idle,
            used: false,
        }
    }

    pub fn state(&self) -> AbilityState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == AbilityState::Idle
    }

    pub fn advance(&mut self, next: AbilityState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Abandons the current occurrence.
    pub fn reset(&mut self) {
        self.state = AbilityState::Idle;
    }
}

/// Address of one ability slot on one creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId {
    pub creature: CreatureId,
    pub slot: u8,
}

impl AbilityId {
    pub const fn new(creature: CreatureId, slot: u8) -> Self {
        Self { creature, slot }
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.creature, self.slot)
    }
}

/// Interactive ability suspended until the input collaborator answers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingQuery {
    pub ability: AbilityId,
    pub phase: Phase,
    pub request: TargetRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut slot = AbilitySlot::new(AbilityKind::SweepingCleave, false);
        for next in [
            AbilityState::Eligible,
            AbilityState::Targeted,
            AbilityState::Activated,
            AbilityState::Ended,
            AbilityState::Idle,
        ] {
            slot.advance(next).unwrap();
        }
        assert!(slot.is_idle());
    }

    #[test]
    fn skipping_states_is_rejected() {
        let mut slot = AbilitySlot::new(AbilityKind::GrapplingHook, true);
        let err = slot.advance(AbilityState::Activated).unwrap_err();
        assert_eq!(err.from, AbilityState::Idle);
        assert_eq!(slot.state(), AbilityState::Idle);

        slot.advance(AbilityState::Eligible).unwrap();
        assert!(slot.advance(AbilityState::Ended).is_err());
    }
}
