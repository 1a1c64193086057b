//! Session-level flows over the bundled skirmish.
//!
//! Layout used below: creature 1 holds a Grappling Hook with creature 3 four
//! hexes to its right; creature 2 stands with creature 5 (summoned, already
//! fatigued) directly in front.

use arena_content::{AbilityCatalog, ScenarioLoader};
use arena_core::{
    AbilityId, CreatureId, EngineConfig, EngineError, FollowUp, HexCoord, MessageCode, Phase,
    TargetSelection,
};
use arena_runtime::{
    AbilityOutcome, CancelProvider, CollaboratorKind, FirstOptionProvider, RuntimeError,
    ScriptedProvider, Session, SessionEvent, StatusEvent, TargetProvider, Topic, TurnEvent,
    TurnRequest,
};

const HOOK: AbilityId = AbilityId::new(CreatureId(1), 0);
const BLOW: AbilityId = AbilityId::new(CreatureId(2), 1);

fn session(provider: impl TargetProvider + 'static) -> Session {
    let config = EngineConfig::default();
    Session::builder()
        .state(ScenarioLoader::skirmish(&config).expect("skirmish loads"))
        .catalog(AbilityCatalog::load().expect("catalog loads"))
        .config(config)
        .provider(provider)
        .build()
        .expect("session builds")
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn hook_pulls_and_settles_before_returning() {
    let mut session = session(FirstOptionProvider);
    let mut status = session.subscribe(Topic::Status);

    session.start_turn(CreatureId(1)).await.expect("turn starts");
    let outcome = session.use_ability(HOOK).await.expect("hook resolves");

    let AbilityOutcome::Activated(report) = &outcome else {
        panic!("expected activation, got {outcome:?}");
    };
    assert_eq!(report.outcome.moves.len(), 1);

    let state = session.state();
    let victim = state.creature(CreatureId(3)).expect("victim alive");
    assert_eq!(victim.anchor, HexCoord::new(2, 3));
    assert!(victim.health.current < 10);
    assert!(!state.turn.input_frozen());
    assert!(state.verify_consistency().is_ok());

    let events = drain(&mut status);
    assert!(matches!(events.first(), Some(SessionEvent::Status(StatusEvent::MoveStarted(_)))));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, SessionEvent::Status(StatusEvent::AnimationSettled { .. })))
    );
}

#[tokio::test]
async fn second_use_in_one_turn_is_blocked_with_text() {
    let mut session = session(FirstOptionProvider);
    session.start_turn(CreatureId(1)).await.expect("turn starts");
    assert!(session.use_ability(HOOK).await.expect("first use").is_activated());

    let outcome = session.use_ability(HOOK).await.expect("second use");
    assert_eq!(
        outcome,
        AbilityOutcome::Blocked {
            code: MessageCode::AlreadyUsed,
            message: "Already used this turn.".into(),
        }
    );
}

#[tokio::test]
async fn cancelled_query_leaves_state_untouched() {
    let mut session = session(CancelProvider);
    let mut ability = session.subscribe(Topic::Ability);
    session.start_turn(CreatureId(1)).await.expect("turn starts");
    let before = session.state().clone();

    let outcome = session.use_ability(HOOK).await.expect("query answered");

    assert_eq!(outcome, AbilityOutcome::Cancelled);
    assert_eq!(session.state(), &before);
    let events = drain(&mut ability);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].topic(), Topic::Ability);
}

#[tokio::test]
async fn exhausted_script_abandons_the_query() {
    let mut session = session(ScriptedProvider::new(Vec::<Option<TargetSelection>>::new()));
    session.start_turn(CreatureId(1)).await.expect("turn starts");

    let error = session.use_ability(HOOK).await.expect_err("no answer");

    assert!(matches!(error, RuntimeError::ScriptExhausted));
    assert!(session.state().turn.pending.is_none());
    assert!(session.require(HOOK).expect("require").is_ready());
}

#[tokio::test]
async fn rejected_selection_surfaces_engine_error() {
    let provider = ScriptedProvider::new([Some(TargetSelection::Creature(CreatureId(4)))]);
    let mut session = session(provider);
    session.start_turn(CreatureId(2)).await.expect("turn starts");
    let before = session.state().clone();

    let error = session.use_ability(BLOW).await.expect_err("creature 4 is out of reach");

    assert!(matches!(error, RuntimeError::Engine(_)));
    assert_eq!(session.state(), &before);
}

#[tokio::test]
async fn endurance_changes_are_relayed() {
    let provider = ScriptedProvider::new([Some(TargetSelection::Creature(CreatureId(5)))]);
    let mut session = session(provider);
    let mut status = session.subscribe(Topic::Status);
    session.start_turn(CreatureId(2)).await.expect("turn starts");

    let outcome = session.use_ability(BLOW).await.expect("blow resolves");
    assert!(outcome.is_activated());

    let relayed = drain(&mut status).into_iter().any(|event| {
        matches!(
            event,
            SessionEvent::Status(StatusEvent::EnduranceChanged {
                creature: CreatureId(5),
                fatigued: true,
                ..
            })
        )
    });
    assert!(relayed);
}

#[tokio::test]
async fn turn_boundaries_are_published() {
    let mut session = session(FirstOptionProvider);
    let mut turns = session.subscribe(Topic::Turn);

    session.start_turn(CreatureId(1)).await.expect("turn starts");
    session.end_turn().await.expect("turn ends");
    assert_eq!(session.begin_round().expect("round advances"), 2);

    assert_eq!(drain(&mut turns).len(), 3);
    assert!(session.state().turn.active.is_none());
}

#[tokio::test]
async fn end_turn_requested_mid_pull_runs_after_the_settle() {
    let mut session = session(FirstOptionProvider);
    let mut turns = session.subscribe(Topic::Turn);
    let mut status = session.subscribe(Topic::Status);
    session.start_turn(CreatureId(1)).await.expect("turn starts");
    drain(&mut turns);

    let outcome = session.resolve_ability(HOOK).await.expect("hook resolves");
    assert!(outcome.is_activated());
    assert!(session.state().turn.input_frozen());
    assert_eq!(session.in_flight(), 1);

    let request = session.request(FollowUp::EndTurn).expect("request accepted");
    assert_eq!(request, TurnRequest::Deferred);
    assert_eq!(session.state().turn.active, Some(CreatureId(1)));
    assert_eq!(
        drain(&mut turns),
        vec![SessionEvent::Turn(TurnEvent::Deferred(FollowUp::EndTurn))]
    );

    let reports = session.play_pending().await.expect("moves play back");

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].phase, Phase::TurnEnd);
    assert_eq!(reports[0].creature, CreatureId(1));
    assert!(session.state().turn.active.is_none());
    assert!(!session.state().turn.input_frozen());

    let settled = drain(&mut status).into_iter().find_map(|event| match event {
        SessionEvent::Status(StatusEvent::AnimationSettled { released, .. }) => Some(released),
        _ => None,
    });
    assert_eq!(settled, Some(vec![FollowUp::EndTurn]));
    assert!(matches!(
        drain(&mut turns).as_slice(),
        [SessionEvent::Turn(TurnEvent::TurnEnded(_))]
    ));
}

#[tokio::test]
async fn end_turn_waits_for_moves_in_flight() {
    let mut session = session(FirstOptionProvider);
    session.start_turn(CreatureId(1)).await.expect("turn starts");
    session.resolve_ability(HOOK).await.expect("hook resolves");

    let error = session
        .resolve_ability(HOOK)
        .await
        .expect_err("input is frozen");
    assert!(matches!(
        error,
        RuntimeError::Engine(EngineError::InputFrozen { outstanding: 1 })
    ));

    let report = session.end_turn().await.expect("turn ends");
    assert_eq!(report.phase, Phase::TurnEnd);
    assert_eq!(session.in_flight(), 0);
    let victim = session.state().creature(CreatureId(3)).expect("victim alive");
    assert_eq!(victim.anchor, HexCoord::new(2, 3));
}

#[tokio::test]
async fn round_cannot_advance_mid_turn() {
    let mut session = session(FirstOptionProvider);
    session.start_turn(CreatureId(1)).await.expect("turn starts");

    assert!(matches!(session.begin_round(), Err(RuntimeError::Engine(_))));
}

#[test]
fn builder_requires_a_provider() {
    let config = EngineConfig::default();
    let result = Session::builder()
        .state(ScenarioLoader::skirmish(&config).expect("skirmish loads"))
        .catalog(AbilityCatalog::load().expect("catalog loads"))
        .build();

    assert!(matches!(
        result,
        Err(RuntimeError::CollaboratorNotSet {
            kind: CollaboratorKind::Input
        })
    ));
}

#[test]
fn reports_serialize_for_clients() {
    let event = SessionEvent::Status(StatusEvent::EnduranceChanged {
        creature: CreatureId(5),
        current: 0,
        maximum: 2,
        fatigued: true,
    });
    let json = serde_json::to_string(&event).expect("serializes");
    assert!(json.contains("EnduranceChanged"));
}
