//! Capability interface implemented by each concrete ability.

use super::{AbilityDefinition, AbilityId, AbilitySlot, Phase};
use crate::engine::{Activation, EngineError};
use crate::env::Env;
use crate::state::{Creature, CreatureId, MatchState};
use crate::targeting::{ResolvedTarget, TargetRequest};

/// Fixed reason codes rendered by the messaging collaborator.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageCode {
    NotMoveable,
    NoTarget,
    MaterializationSickness,
    AlreadyUsed,
    WrongPhase,
    NotActive,
    Dead,
    Fatigued,
}

impl MessageCode {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Outcome of `require`. A blocked ability is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eligibility {
    Ready,
    Blocked(MessageCode),
}

impl Eligibility {
    pub fn is_ready(self) -> bool {
        matches!(self, Eligibility::Ready)
    }

    /// `Ready` when `condition` holds, otherwise blocked with `code`.
    pub fn check(condition: bool, code: MessageCode) -> Self {
        if condition {
            Eligibility::Ready
        } else {
            Eligibility::Blocked(code)
        }
    }
}

/// Read-only view handed to `check_eligible` and `resolve_target`.
pub struct AbilityContext<'s> {
    pub state: &'s MatchState,
    pub env: &'s Env<'s>,
    pub ability: AbilityId,
    pub owner: &'s Creature,
    pub slot: &'s AbilitySlot,
    pub definition: &'s AbilityDefinition,
    pub phase: Phase,
    /// The creature that caused this occurrence (the attacker for `Damage`).
    pub instigator: Option<CreatureId>,
}

impl AbilityContext<'_> {
    pub fn upgraded(&self) -> bool {
        self.slot.upgraded
    }

    pub fn max_range(&self) -> u32 {
        self.definition.range.max(self.slot.upgraded)
    }
}

/// Behaviour of one ability variant.
///
/// `check_eligible` and `resolve_target` must not mutate anything; all
/// mutation goes through the [`Activation`] handed to `apply`.
pub trait AbilityBehavior: Send + Sync {
    fn kind(&self) -> super::AbilityKind;

    /// Ability-specific part of `require`. Generic gates (phase, liveness,
    /// sickness, once per turn) have already passed.
    fn check_eligible(&self, ctx: &AbilityContext<'_>) -> Eligibility;

    /// Target request for interactive triggers. `None` skips the query.
    fn resolve_target(&self, ctx: &AbilityContext<'_>) -> Option<TargetRequest> {
        let _ = ctx;
        None
    }

    fn apply(
        &self,
        activation: &mut Activation<'_>,
        target: &ResolvedTarget,
    ) -> Result<(), EngineError>;
}
