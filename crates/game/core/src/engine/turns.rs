use tracing::{debug, info, warn};

use crate::ability::Phase;
use crate::combat;
use crate::env::Env;
use crate::movement::{AnimationTicket, FollowUp};
use crate::state::{CreatureId, EffectDuration};

use super::{AbilityEngine, EngineError, PhaseReport, ValidationError};

/// Phase boundaries of a creature's turn.
impl<'a> AbilityEngine<'a> {
    /// Advances to the next round. Fails while a creature is still acting.
    pub fn begin_round(&mut self) -> Result<u32, EngineError> {
        if self.state.turn.active.is_some() {
            return Err(ValidationError::TurnInProgress.into());
        }
        self.state.turn.round += 1;
        info!(round = self.state.turn.round, "round started");
        Ok(self.state.turn.round)
    }

    /// Opens `creature`'s turn: expires its turn-start effects, runs the
    /// turn-start passives, then hands over to the action phase.
    ///
    /// On error the state is restored to what it was before the call.
    pub fn start_turn(
        &mut self,
        env: &Env<'_>,
        creature: CreatureId,
    ) -> Result<PhaseReport, EngineError> {
        self.ensure_input_open()?;
        if self.state.turn.active.is_some() {
            return Err(ValidationError::TurnInProgress.into());
        }
        let actor = self
            .state
            .creature(creature)
            .ok_or(ValidationError::UnknownCreature(creature))?;
        if !actor.is_alive() {
            return Err(ValidationError::DeadCreature(creature).into());
        }

        let snapshot = self.state.clone();
        self.open_turn(env, creature).inspect_err(|error| {
            *self.state = snapshot;
            warn!(%creature, %error, "turn start rolled back");
        })
    }

    fn open_turn(
        &mut self,
        env: &Env<'_>,
        creature: CreatureId,
    ) -> Result<PhaseReport, EngineError> {
        let round = self.state.turn.round;
        let actor = self.state.try_creature_mut(creature)?;
        for slot in actor.abilities.iter_mut() {
            slot.used = false;
        }
        if actor.materialization_sickness && actor.entered_round < round {
            actor.materialization_sickness = false;
            debug!(%creature, round, "materialization sickness cleared");
        }

        self.state.turn.active = Some(creature);
        self.state.turn.phase = Phase::TurnStart;
        info!(%creature, round, "turn started");

        let expired =
            combat::expire_effects(self.state, env, creature, EffectDuration::UntilTurnStart)?;
        let activations = self.run_passive(env, Phase::TurnStart)?;
        self.state.turn.phase = Phase::Action;

        Ok(PhaseReport {
            creature,
            phase: Phase::TurnStart,
            activations,
            expired,
        })
    }

    /// Closes the active creature's turn.
    ///
    /// On error the turn stays open and the state is left as before the call.
    pub fn end_turn(&mut self, env: &Env<'_>) -> Result<PhaseReport, EngineError> {
        self.ensure_input_open()?;
        let creature = self.state.turn.active.ok_or(EngineError::NoActiveCreature)?;

        let snapshot = self.state.clone();
        self.close_turn(env, creature).inspect_err(|error| {
            *self.state = snapshot;
            warn!(%creature, %error, "turn end rolled back");
        })
    }

    fn close_turn(
        &mut self,
        env: &Env<'_>,
        creature: CreatureId,
    ) -> Result<PhaseReport, EngineError> {
        self.state.turn.phase = Phase::TurnEnd;
        let activations = self.run_passive(env, Phase::TurnEnd)?;
        let expired = if self.state.creature(creature).is_some() {
            combat::expire_effects(self.state, env, creature, EffectDuration::UntilTurnEnd)?
        } else {
            Vec::new()
        };
        self.state.turn.active = None;
        info!(%creature, "turn ended");

        Ok(PhaseReport {
            creature,
            phase: Phase::TurnEnd,
            activations,
            expired,
        })
    }

    /// Queues a turn transition behind running animations.
    ///
    /// Returns the follow-up immediately when nothing is playing.
    pub fn defer(&mut self, follow_up: FollowUp) -> Option<FollowUp> {
        let ready = self.state.turn.gate.when_released(follow_up);
        if ready.is_none() {
            debug!(?follow_up, "follow-up queued behind animations");
        }
        ready
    }

    /// Marks one animation complete and returns the follow-ups it released.
    pub fn settle_animation(
        &mut self,
        ticket: AnimationTicket,
    ) -> Result<Vec<FollowUp>, EngineError> {
        let released = self
            .state
            .turn
            .gate
            .settle(ticket)
            .ok_or(ValidationError::UnknownTicket(ticket))?;
        debug!(
            ?ticket,
            outstanding = self.state.turn.gate.outstanding(),
            released = released.len(),
            "animation settled"
        );
        Ok(released)
    }
}
