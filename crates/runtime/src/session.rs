//! Match session orchestrator.
//!
//! A [`Session`] owns the match state and content, and drives the engine
//! through turn boundaries and ability use. Target queries are answered by
//! the [`TargetProvider`]; forced moves are queued in flight, played back
//! through the [`Animator`] and settled on the engine's movement gate.
//! Turn transitions requested while moves are in flight wait on the gate
//! and run when the last one settles.

use std::collections::VecDeque;

use arena_content::{AbilityCatalog, MessageTable};
use arena_core::{
    AbilityEngine, AbilityId, ActivationReport, BeginOutcome, Creature, CreatureId, EngineConfig,
    EngineError, Env, FollowUp, GameError, MatchState, MessageCode, MoveOrder, Phase, PhaseReport,
    StatusObserver,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::{
    Animator, CollaboratorKind, InstantAnimator, Result, RuntimeError, TargetProvider,
};
use crate::events::{AbilityEvent, EventBus, SessionEvent, StatusEvent, Topic, TurnEvent};

/// What became of one `use_ability` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    Blocked { code: MessageCode, message: String },
    Cancelled,
    Activated(ActivationReport),
}

/// What became of a turn transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRequest {
    Done(PhaseReport),
    /// Queued behind moves that are still playing.
    Deferred,
}

impl AbilityOutcome {
    pub fn is_activated(&self) -> bool {
        matches!(self, AbilityOutcome::Activated(_))
    }
}

/// Forwards endurance changes to the status topic.
struct EnduranceRelay {
    bus: EventBus,
}

impl StatusObserver for EnduranceRelay {
    fn endurance_changed(&self, creature: &Creature) {
        self.bus
            .publish(SessionEvent::Status(StatusEvent::EnduranceChanged {
                creature: creature.id,
                current: creature.endurance.current,
                maximum: creature.stat(arena_core::Stat::Endurance),
                fatigued: creature.is_fatigued(),
            }));
    }
}

pub struct Session {
    state: MatchState,
    config: EngineConfig,
    catalog: AbilityCatalog,
    messages: MessageTable,
    relay: EnduranceRelay,
    provider: Box<dyn TargetProvider>,
    animator: Box<dyn Animator>,
    in_flight: VecDeque<MoveOrder>,
    bus: EventBus,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to one topic of session events.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.bus.subscribe(topic)
    }

    fn engine<R>(&mut self, f: impl FnOnce(&mut AbilityEngine<'_>, &Env<'_>) -> R) -> R {
        let env = Env::new(&self.config)
            .with_abilities(&self.catalog)
            .with_messages(&self.messages)
            .with_observer(&self.relay);
        let mut engine = AbilityEngine::new(&mut self.state);
        f(&mut engine, &env)
    }

    /// Evaluates `require` for `ability` without side effects.
    pub fn require(&mut self, ability: AbilityId) -> Result<arena_core::Eligibility> {
        Ok(self.engine(|engine, env| engine.require(env, ability))?)
    }

    pub fn begin_round(&mut self) -> Result<u32> {
        let round = self.engine(|engine, _| engine.begin_round())?;
        self.bus
            .publish(SessionEvent::Turn(TurnEvent::RoundStarted { round }));
        Ok(round)
    }

    /// Opens `creature`'s turn, waiting for running animations first.
    pub async fn start_turn(&mut self, creature: CreatureId) -> Result<PhaseReport> {
        let follow_up = FollowUp::StartTurn(creature);
        let report = match self.request(follow_up)? {
            TurnRequest::Done(report) => report,
            TurnRequest::Deferred => self.await_follow_up(follow_up).await?,
        };
        self.play_pending().await?;
        Ok(report)
    }

    /// Closes the active turn, waiting for running animations first.
    pub async fn end_turn(&mut self) -> Result<PhaseReport> {
        let report = match self.request(FollowUp::EndTurn)? {
            TurnRequest::Done(report) => report,
            TurnRequest::Deferred => self.await_follow_up(FollowUp::EndTurn).await?,
        };
        self.play_pending().await?;
        Ok(report)
    }

    /// Asks for a turn transition without waiting.
    ///
    /// While moves are still playing the transition is queued on the
    /// engine's movement gate and runs from [`Session::play_pending`] once
    /// the last one settles.
    pub fn request(&mut self, follow_up: FollowUp) -> Result<TurnRequest> {
        match self.engine(|engine, _| engine.defer(follow_up)) {
            Some(ready) => Ok(TurnRequest::Done(self.run_follow_up(ready)?)),
            None => {
                let in_flight = self.in_flight.len();
                debug!(?follow_up, in_flight, "turn transition deferred");
                self.bus
                    .publish(SessionEvent::Turn(TurnEvent::Deferred(follow_up)));
                Ok(TurnRequest::Deferred)
            }
        }
    }

    /// Moves committed by the engine but not yet played back.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Plays back every queued move, settling each on the gate, and runs the
    /// turn transitions the settles release.
    ///
    /// Transitions can commit further moves (passives); those are played in
    /// the same call. Returns the reports of the transitions that ran.
    pub async fn play_pending(&mut self) -> Result<Vec<PhaseReport>> {
        let mut reports = Vec::new();
        while let Some(order) = self.in_flight.pop_front() {
            self.bus
                .publish(SessionEvent::Status(StatusEvent::MoveStarted(order)));
            let played = self.animator.play(&order).await;
            let released = self.engine(|engine, _| engine.settle_animation(order.ticket))?;
            played?;
            self.bus
                .publish(SessionEvent::Status(StatusEvent::AnimationSettled {
                    ticket: order.ticket,
                    released: released.clone(),
                }));

            for follow_up in released {
                // An earlier transition may have frozen input again.
                if let Some(ready) = self.engine(|engine, _| engine.defer(follow_up)) {
                    reports.push(self.run_follow_up(ready)?);
                }
            }
        }
        Ok(reports)
    }

    async fn await_follow_up(&mut self, follow_up: FollowUp) -> Result<PhaseReport> {
        let wanted = match follow_up {
            FollowUp::EndTurn => Phase::TurnEnd,
            FollowUp::StartTurn(_) => Phase::TurnStart,
        };
        self.play_pending()
            .await?
            .into_iter()
            .rev()
            .find(|report| report.phase == wanted)
            .ok_or(RuntimeError::Engine(EngineError::NoActiveCreature))
    }

    fn run_follow_up(&mut self, follow_up: FollowUp) -> Result<PhaseReport> {
        let report = match follow_up {
            FollowUp::StartTurn(creature) => {
                self.engine(|engine, env| engine.start_turn(env, creature))?
            }
            FollowUp::EndTurn => self.engine(|engine, env| engine.end_turn(env))?,
        };
        for activation in &report.activations {
            self.enqueue(activation);
        }
        info!(
            creature = %report.creature,
            phase = report.phase.as_str(),
            passives = report.activations.len(),
            expired = report.expired.len(),
            "turn boundary resolved"
        );
        let event = match follow_up {
            FollowUp::StartTurn(_) => TurnEvent::TurnStarted(report.clone()),
            FollowUp::EndTurn => TurnEvent::TurnEnded(report.clone()),
        };
        self.bus.publish(SessionEvent::Turn(event));
        Ok(report)
    }

    /// Runs one interactive ability through its whole lifecycle and plays
    /// back its moves before returning.
    pub async fn use_ability(&mut self, ability: AbilityId) -> Result<AbilityOutcome> {
        let outcome = self.resolve_ability(ability).await?;
        self.play_pending().await?;
        Ok(outcome)
    }

    /// Resolves one interactive ability, leaving its moves in flight.
    ///
    /// A blocked ability and a cancelled query are outcomes, not errors.
    /// A selection the engine rejects cancels the query and surfaces the
    /// validation error.
    pub async fn resolve_ability(&mut self, ability: AbilityId) -> Result<AbilityOutcome> {
        let request = match self.engine(|engine, env| engine.begin(env, ability))? {
            BeginOutcome::Blocked(code) => {
                let message = self.engine(|_, env| env.describe(code).to_string());
                debug!(%ability, code = code.as_str(), "ability blocked");
                self.bus.publish(SessionEvent::Ability(AbilityEvent::Blocked {
                    ability,
                    code,
                    message: message.clone(),
                }));
                return Ok(AbilityOutcome::Blocked { code, message });
            }
            BeginOutcome::Activated(report) => return Ok(self.finish(report)),
            BeginOutcome::AwaitingTarget(request) => request,
        };

        self.bus
            .publish(SessionEvent::Ability(AbilityEvent::QueryIssued {
                ability,
                request: request.clone(),
            }));
        let selection = match self.provider.select(&request, &self.state).await {
            Ok(selection) => selection,
            Err(error) => {
                self.abandon(ability)?;
                return Err(error);
            }
        };

        let Some(selection) = selection else {
            self.abandon(ability)?;
            self.bus
                .publish(SessionEvent::Ability(AbilityEvent::QueryCancelled { ability }));
            return Ok(AbilityOutcome::Cancelled);
        };

        match self.engine(|engine, env| engine.confirm(env, selection)) {
            Ok(report) => Ok(self.finish(report)),
            Err(error) => {
                let context = error.context();
                warn!(%ability, %error, ?context, "selection rejected");
                self.abandon(ability)?;
                Err(error.into())
            }
        }
    }

    fn abandon(&mut self, ability: AbilityId) -> Result<()> {
        if self.state.turn.pending.is_some() {
            self.engine(|engine, _| engine.cancel())?;
            debug!(%ability, "pending query abandoned");
        }
        Ok(())
    }

    fn finish(&mut self, report: ActivationReport) -> AbilityOutcome {
        self.enqueue(&report);
        self.bus
            .publish(SessionEvent::Ability(AbilityEvent::Activated(report.clone())));
        AbilityOutcome::Activated(report)
    }

    /// Queues the moves of `report` and its retaliations for playback.
    fn enqueue(&mut self, report: &ActivationReport) {
        let mut orders = Vec::new();
        collect_moves(report, &mut orders);
        self.in_flight.extend(orders);
    }
}

fn collect_moves(report: &ActivationReport, orders: &mut Vec<MoveOrder>) {
    orders.extend(report.outcome.moves.iter().copied());
    for retaliation in &report.retaliations {
        collect_moves(retaliation, orders);
    }
}

/// Builder for [`Session`].
#[derive(Default)]
pub struct SessionBuilder {
    state: Option<MatchState>,
    config: Option<EngineConfig>,
    catalog: Option<AbilityCatalog>,
    messages: Option<MessageTable>,
    provider: Option<Box<dyn TargetProvider>>,
    animator: Option<Box<dyn Animator>>,
    event_buffer_size: Option<usize>,
}

impl SessionBuilder {
    pub fn state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn catalog(mut self, catalog: AbilityCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn messages(mut self, messages: MessageTable) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn provider(mut self, provider: impl TargetProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Box::new(animator));
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Requires a state, a catalog and a target provider. The animator
    /// defaults to [`InstantAnimator`], messages to English.
    pub fn build(self) -> Result<Session> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let provider = self.provider.ok_or(RuntimeError::CollaboratorNotSet {
            kind: CollaboratorKind::Input,
        })?;
        let bus = self
            .event_buffer_size
            .map_or_else(EventBus::new, EventBus::with_capacity);

        Ok(Session {
            state,
            config: self.config.unwrap_or_default(),
            catalog,
            messages: self.messages.unwrap_or_default(),
            relay: EnduranceRelay { bus: bus.clone() },
            provider,
            animator: self
                .animator
                .unwrap_or_else(|| Box::new(InstantAnimator)),
            in_flight: VecDeque::new(),
            bus,
        })
    }
}
