//! Ability resolution pipeline.
//!
//! The [`AbilityEngine`] is the authoritative reducer for [`MatchState`]. It
//! evaluates triggers at phase boundaries and for player actions, drives each
//! ability through its lifecycle, and dispatches counter-responses. Exactly
//! one ability resolves to completion before the next one is evaluated.
//!
//! An activation either commits completely or not at all: the state is
//! snapshotted before `apply` and restored if anything in the activation,
//! including its retaliations, fails.

mod activation;
mod errors;
mod turns;

pub use activation::{Activation, ActivationOutcome, AppliedEffect};
pub use errors::{EngineError, ValidationError};

use tracing::{debug, info, warn};

use crate::ability::{
    AbilityBehavior, AbilityContext, AbilityDefinition, AbilityId, AbilityKind, AbilitySlot,
    AbilityState, Eligibility, MessageCode, PendingQuery, Phase,
};
use crate::combat::{Retaliation, RetaliationLedger};
use crate::config::EngineConfig;
use crate::env::{Env, OracleError};
use crate::state::{CreatureId, Effect, MatchState};
use crate::targeting::{ResolvedTarget, TargetRequest, TargetSelection};

/// Result of one ability invocation reaching `Ended`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationReport {
    pub ability: AbilityId,
    pub kind: AbilityKind,
    pub phase: Phase,
    /// Lifecycle states visited by this invocation, ending in `Idle`.
    pub trace: Vec<AbilityState>,
    pub outcome: ActivationOutcome,
    /// Counter-responses triggered by this activation.
    pub retaliations: Vec<ActivationReport>,
}

/// Result of asking an interactive ability to start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BeginOutcome {
    /// `require` failed; the ability stays `Idle`.
    Blocked(MessageCode),
    /// Suspended until [`AbilityEngine::confirm`] or [`AbilityEngine::cancel`].
    AwaitingTarget(TargetRequest),
    /// No query was needed.
    Activated(ActivationReport),
}

/// Everything that happened at a phase boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseReport {
    pub creature: CreatureId,
    pub phase: Phase,
    pub activations: Vec<ActivationReport>,
    pub expired: Vec<Effect>,
}

/// Engine over one match state. Collaborators are passed per call.
pub struct AbilityEngine<'a> {
    state: &'a mut MatchState,
}

struct Resolved<'e> {
    slot: AbilitySlot,
    definition: &'e AbilityDefinition,
    behavior: &'e dyn AbilityBehavior,
}

impl<'a> AbilityEngine<'a> {
    pub fn new(state: &'a mut MatchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    pub fn pending(&self) -> Option<&PendingQuery> {
        self.state.turn.pending.as_ref()
    }

    // ========================================================================
    // Eligibility
    // ========================================================================

    /// Evaluates `require` for `ability` in the current phase. Side-effect free.
    pub fn require(&self, env: &Env<'_>, ability: AbilityId) -> Result<Eligibility, EngineError> {
        self.eligibility(env, ability, self.state.turn.phase, None)
    }

    fn resolve<'e>(&self, env: &Env<'e>, ability: AbilityId) -> Result<Resolved<'e>, EngineError> {
        let owner = self
            .state
            .creature(ability.creature)
            .ok_or(ValidationError::UnknownCreature(ability.creature))?;
        let slot = *owner
            .slot(ability.slot)
            .ok_or(ValidationError::UnknownAbility(ability))?;
        let oracle = env.abilities()?;
        let definition = oracle
            .definition(slot.kind)
            .ok_or(OracleError::DefinitionNotFound(slot.kind))?;
        let behavior = oracle
            .behavior(slot.kind)
            .ok_or(OracleError::BehaviorNotFound(slot.kind))?;
        Ok(Resolved {
            slot,
            definition,
            behavior,
        })
    }

    fn eligibility(
        &self,
        env: &Env<'_>,
        ability: AbilityId,
        phase: Phase,
        instigator: Option<CreatureId>,
    ) -> Result<Eligibility, EngineError> {
        let resolved = self.resolve(env, ability)?;
        let owner = self.state.try_creature(ability.creature)?;
        let slot = &resolved.slot;

        let generic = if !owner.is_alive() {
            Eligibility::Blocked(MessageCode::Dead)
        } else if !resolved.definition.trigger().matches(phase) {
            Eligibility::Blocked(MessageCode::WrongPhase)
        } else if phase.requires_active_owner() && self.state.turn.active != Some(owner.id) {
            Eligibility::Blocked(MessageCode::NotActive)
        } else if phase == Phase::Action && slot.used {
            Eligibility::Blocked(MessageCode::AlreadyUsed)
        } else if phase == Phase::Action && owner.materialization_sickness {
            Eligibility::Blocked(MessageCode::MaterializationSickness)
        } else {
            Eligibility::Ready
        };
        if !generic.is_ready() {
            return Ok(generic);
        }

        let ctx = AbilityContext {
            state: self.state,
            env,
            ability,
            owner,
            slot,
            definition: resolved.definition,
            phase,
            instigator,
        };
        let eligibility = resolved.behavior.check_eligible(&ctx);
        debug!(
            %ability,
            kind = slot.kind.as_str(),
            phase = phase.as_str(),
            ?eligibility,
            "require evaluated"
        );
        Ok(eligibility)
    }

    fn ensure_input_open(&self) -> Result<(), EngineError> {
        if let Some(pending) = &self.state.turn.pending {
            return Err(EngineError::QueryPending(pending.ability));
        }
        if self.state.turn.input_frozen() {
            return Err(EngineError::InputFrozen {
                outstanding: self.state.turn.gate.outstanding(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, ability: AbilityId, next: AbilityState) -> Result<(), EngineError> {
        let slot = self
            .state
            .try_creature_mut(ability.creature)?
            .slot_mut(ability.slot)
            .ok_or(ValidationError::UnknownAbility(ability))?;
        slot.advance(next)
            .map_err(|source| EngineError::Lifecycle { ability, source })
    }

    fn reset(&mut self, ability: AbilityId) {
        if let Some(slot) = self
            .state
            .creature_mut(ability.creature)
            .and_then(|creature| creature.slot_mut(ability.slot))
        {
            slot.reset();
        }
    }

    // ========================================================================
    // Interactive Activation
    // ========================================================================

    /// Starts an interactive ability for the active creature.
    ///
    /// A blocked ability never leaves `Idle`. An ability whose behaviour asks
    /// for a target suspends here until [`confirm`](Self::confirm) or
    /// [`cancel`](Self::cancel); while suspended nothing else may activate.
    pub fn begin(&mut self, env: &Env<'_>, ability: AbilityId) -> Result<BeginOutcome, EngineError> {
        self.ensure_input_open()?;
        if self.state.turn.phase != Phase::Action {
            return Ok(BeginOutcome::Blocked(MessageCode::WrongPhase));
        }

        let eligibility = self.eligibility(env, ability, Phase::Action, None)?;
        if let Eligibility::Blocked(code) = eligibility {
            debug!(%ability, code = code.as_str(), "ability blocked");
            return Ok(BeginOutcome::Blocked(code));
        }

        let resolved = self.resolve(env, ability)?;
        let owner = self.state.try_creature(ability.creature)?;
        let ctx = AbilityContext {
            state: self.state,
            env,
            ability,
            owner,
            slot: &resolved.slot,
            definition: resolved.definition,
            phase: Phase::Action,
            instigator: None,
        };
        let request = resolved.behavior.resolve_target(&ctx);

        match request {
            Some(request) if request.option_count() == 0 => {
                Ok(BeginOutcome::Blocked(MessageCode::NoTarget))
            }
            Some(request) => {
                self.advance(ability, AbilityState::Eligible)?;
                info!(
                    %ability,
                    kind = resolved.slot.kind.as_str(),
                    query = request.kind_name(),
                    options = request.option_count(),
                    "target query issued"
                );
                self.state.turn.pending = Some(PendingQuery {
                    ability,
                    phase: Phase::Action,
                    request: request.clone(),
                });
                Ok(BeginOutcome::AwaitingTarget(request))
            }
            None => {
                self.advance(ability, AbilityState::Eligible)?;
                self.advance(ability, AbilityState::Targeted)?;
                let report =
                    self.execute(env, ability, Phase::Action, ResolvedTarget::None, None)?;
                Ok(BeginOutcome::Activated(report))
            }
        }
    }

    /// Activates the pending ability with the collaborator's selection.
    ///
    /// A selection that was never offered is rejected before anything
    /// changes and the query stays pending.
    pub fn confirm(
        &mut self,
        env: &Env<'_>,
        selection: TargetSelection,
    ) -> Result<ActivationReport, EngineError> {
        let pending = self
            .state
            .turn
            .pending
            .as_ref()
            .ok_or(ValidationError::NoPendingQuery)?;
        let target = pending.request.resolve(&selection)?;
        let (ability, phase) = (pending.ability, pending.phase);

        self.state.turn.pending = None;
        self.advance(ability, AbilityState::Targeted)?;
        self.execute(env, ability, phase, target, None)
    }

    /// Abandons the pending query. Nothing else changes.
    pub fn cancel(&mut self) -> Result<AbilityId, EngineError> {
        let pending = self
            .state
            .turn
            .pending
            .take()
            .ok_or(ValidationError::NoPendingQuery)?;
        self.reset(pending.ability);
        warn!(ability = %pending.ability, "target query cancelled");
        Ok(pending.ability)
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Runs a `Targeted` ability to completion, retaliations included.
    fn execute(
        &mut self,
        env: &Env<'_>,
        ability: AbilityId,
        phase: Phase,
        target: ResolvedTarget,
        instigator: Option<CreatureId>,
    ) -> Result<ActivationReport, EngineError> {
        let snapshot = self.state.clone();
        let mut ledger = RetaliationLedger::new();

        let result = self
            .activate(env, ability, phase, &target, instigator, 0, &mut ledger)
            .and_then(|mut report| {
                report.retaliations =
                    self.dispatch_retaliations(env, &report.outcome.raised, &mut ledger)?;
                self.state.verify_consistency()?;
                Ok(report)
            });

        result.inspect_err(|error| {
            *self.state = snapshot;
            self.reset(ability);
            warn!(%ability, %error, "activation rolled back");
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn activate(
        &mut self,
        env: &Env<'_>,
        ability: AbilityId,
        phase: Phase,
        target: &ResolvedTarget,
        instigator: Option<CreatureId>,
        depth: usize,
        ledger: &mut RetaliationLedger,
    ) -> Result<ActivationReport, EngineError> {
        let resolved = self.resolve(env, ability)?;
        let mut trace = vec![AbilityState::Eligible, AbilityState::Targeted];

        self.advance(ability, AbilityState::Activated)?;
        trace.push(AbilityState::Activated);

        let mut activation = Activation::new(
            self.state,
            env,
            ability,
            resolved.slot,
            resolved.definition,
            phase,
            instigator,
            ledger,
            depth < EngineConfig::MAX_RETALIATION_DEPTH,
        );
        resolved.behavior.apply(&mut activation, target)?;
        let outcome = activation.finish();

        self.advance(ability, AbilityState::Ended)?;
        trace.push(AbilityState::Ended);
        self.advance(ability, AbilityState::Idle)?;
        trace.push(AbilityState::Idle);
        if phase == Phase::Action
            && let Some(slot) = self
                .state
                .creature_mut(ability.creature)
                .and_then(|creature| creature.slot_mut(ability.slot))
        {
            slot.used = true;
        }

        info!(
            %ability,
            kind = resolved.slot.kind.as_str(),
            phase = phase.as_str(),
            damage = outcome.damage.len(),
            moves = outcome.moves.len(),
            "ability activated"
        );
        Ok(ActivationReport {
            ability,
            kind: resolved.slot.kind,
            phase,
            trace,
            outcome,
            retaliations: Vec::new(),
        })
    }

    /// Gives each responder one on-damage activation against its attacker.
    fn dispatch_retaliations(
        &mut self,
        env: &Env<'_>,
        raised: &[Retaliation],
        ledger: &mut RetaliationLedger,
    ) -> Result<Vec<ActivationReport>, EngineError> {
        let mut reports = Vec::new();
        for retaliation in raised {
            let Some(responder) = self.state.creature(retaliation.responder) else {
                continue;
            };
            let slots = responder.abilities.len() as u8;

            for slot in 0..slots {
                let ability = AbilityId::new(retaliation.responder, slot);
                let eligibility =
                    self.eligibility(env, ability, Phase::Damage, Some(retaliation.attacker))?;
                if !eligibility.is_ready() {
                    continue;
                }

                self.advance(ability, AbilityState::Eligible)?;
                self.advance(ability, AbilityState::Targeted)?;
                let report = self.activate(
                    env,
                    ability,
                    Phase::Damage,
                    &ResolvedTarget::Creature(retaliation.attacker),
                    Some(retaliation.attacker),
                    EngineConfig::MAX_RETALIATION_DEPTH,
                    ledger,
                )?;
                reports.push(report);
                break;
            }
        }
        Ok(reports)
    }

    /// Runs every passive ability whose trigger matches `phase`, in creature
    /// id then slot order.
    fn run_passive(
        &mut self,
        env: &Env<'_>,
        phase: Phase,
    ) -> Result<Vec<ActivationReport>, EngineError> {
        let mut reports = Vec::new();
        for id in self.state.creature_ids() {
            let slots = self
                .state
                .creature(id)
                .map_or(0, |creature| creature.abilities.len() as u8);

            for slot in 0..slots {
                let ability = AbilityId::new(id, slot);
                if !self.eligibility(env, ability, phase, None)?.is_ready() {
                    continue;
                }
                self.advance(ability, AbilityState::Eligible)?;
                self.advance(ability, AbilityState::Targeted)?;
                reports.push(self.execute(env, ability, phase, ResolvedTarget::None, None)?);
            }
        }
        Ok(reports)
    }
}
