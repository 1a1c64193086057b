//! Mutable handle given to an ability while it activates.

use super::EngineError;
use crate::ability::{AbilityDefinition, AbilityId, AbilityKind, AbilitySlot, Phase};
use crate::combat::{
    self, AttackEvent, Damage, DamageOutcome, Retaliation, RetaliationLedger,
};
use crate::env::Env;
use crate::movement::{self, MoveOrder, PullPlan};
use crate::state::{Creature, CreatureId, Effect, EffectAdd, EffectKind, MatchState};
use crate::targeting::DirectionScan;

/// One effect application as seen by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub target: CreatureId,
    pub kind: EffectKind,
    pub result: EffectAdd,
}

/// Everything a single activation changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationOutcome {
    pub damage: Vec<DamageOutcome>,
    pub effects: Vec<AppliedEffect>,
    pub moves: Vec<MoveOrder>,
    /// Creatures whose endurance was zeroed directly.
    pub fatigued: Vec<CreatureId>,
    /// Counter-responses raised, dispatched by the engine afterwards.
    pub raised: Vec<Retaliation>,
}

/// Access to the resolvers for the duration of one `apply` call.
///
/// Every damage pass shares the activation's [`AttackEvent`], so resolving
/// the same attack in several passes never grants a target more than one
/// retaliation.
pub struct Activation<'e> {
    state: &'e mut MatchState,
    env: &'e Env<'e>,
    ability: AbilityId,
    slot: AbilitySlot,
    definition: &'e AbilityDefinition,
    phase: Phase,
    instigator: Option<CreatureId>,
    event: AttackEvent,
    ledger: &'e mut RetaliationLedger,
    raises_retaliation: bool,
    outcome: ActivationOutcome,
}

impl<'e> Activation<'e> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        state: &'e mut MatchState,
        env: &'e Env<'e>,
        ability: AbilityId,
        slot: AbilitySlot,
        definition: &'e AbilityDefinition,
        phase: Phase,
        instigator: Option<CreatureId>,
        ledger: &'e mut RetaliationLedger,
        raises_retaliation: bool,
    ) -> Self {
        let event = AttackEvent(state.turn.next_attack_event());
        Self {
            state,
            env,
            ability,
            slot,
            definition,
            phase,
            instigator,
            event,
            ledger,
            raises_retaliation,
            outcome: ActivationOutcome::default(),
        }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    pub fn env(&self) -> &Env<'e> {
        self.env
    }

    pub fn ability(&self) -> AbilityId {
        self.ability
    }

    pub fn kind(&self) -> AbilityKind {
        self.slot.kind
    }

    pub fn upgraded(&self) -> bool {
        self.slot.upgraded
    }

    pub fn definition(&self) -> &AbilityDefinition {
        self.definition
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Creature that caused this occurrence, if any.
    pub fn instigator(&self) -> Option<CreatureId> {
        self.instigator
    }

    pub fn owner_id(&self) -> CreatureId {
        self.ability.creature
    }

    pub fn owner(&self) -> Result<&Creature, EngineError> {
        Ok(self.state.try_creature(self.ability.creature)?)
    }

    /// Damage from the definition's table for this slot, dealt by the owner.
    pub fn base_damage(&self) -> Damage {
        Damage::new(self.ability.creature)
            .from_ability(self.slot.kind)
            .with_amounts(self.definition.damage_for(self.slot.upgraded))
            .upgraded(self.slot.upgraded)
    }

    /// Effect template owned by this ability's creature.
    pub fn effect(&self, kind: EffectKind, target: CreatureId) -> Effect {
        Effect::new(kind, self.ability.creature, target).from_ability(self.slot.kind)
    }

    pub fn damage(
        &mut self,
        damage: &Damage,
        targets: &[CreatureId],
        suppress_retaliation: bool,
    ) -> Result<Vec<DamageOutcome>, EngineError> {
        let resolution = combat::apply_damage(
            self.state,
            self.env,
            self.ledger,
            self.event,
            damage,
            targets,
            suppress_retaliation || !self.raises_retaliation,
        )?;

        for outcome in &resolution.outcomes {
            for (effect, result) in damage.effects.iter().zip(&outcome.effects) {
                self.outcome.effects.push(AppliedEffect {
                    target: outcome.target,
                    kind: effect.kind,
                    result: *result,
                });
            }
        }
        self.outcome.raised.extend(resolution.retaliations);
        self.outcome.damage.extend(resolution.outcomes.iter().cloned());
        Ok(resolution.outcomes)
    }

    pub fn add_effect(&mut self, effect: Effect) -> Result<EffectAdd, EngineError> {
        let target = effect.target;
        let kind = effect.kind;
        let result = combat::add_effect(self.state, self.env, effect)?;
        self.outcome.effects.push(AppliedEffect {
            target,
            kind,
            result,
        });
        Ok(result)
    }

    pub fn zero_endurance(&mut self, target: CreatureId) -> Result<i32, EngineError> {
        let previous = combat::zero_endurance(self.state, self.env, target)?;
        self.outcome.fatigued.push(target);
        Ok(previous)
    }

    /// Pulls the scan's target toward the owner and commits both landings.
    pub fn pull(&mut self, scan: &DirectionScan) -> Result<PullPlan, EngineError> {
        let plan = movement::plan_pull(
            self.state,
            self.ability.creature,
            scan,
            self.definition.range.minimum,
        )?;
        let orders = movement::execute_pull(self.state, &plan)?;
        self.outcome.moves.extend(orders);
        Ok(plan)
    }

    pub(crate) fn finish(self) -> ActivationOutcome {
        self.outcome
    }
}
