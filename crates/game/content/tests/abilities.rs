//! Bundled abilities resolved end to end through the engine.

use arena_content::AbilityCatalog;
use arena_core::{
    AbilityEngine, AbilityId, AbilityKind, BeginOutcome, Creature, CreatureId, Direction,
    EffectKind, EngineConfig, Env, Facing, GridDimensions, HexCoord, MatchState, Meter, Phase,
    Side, Stat, TargetRequest, TargetSelection,
};

const CLEAVE: AbilityId = AbilityId::new(CreatureId(1), 0);
const BLOW: AbilityId = AbilityId::new(CreatureId(1), 0);
const HOOK: AbilityId = AbilityId::new(CreatureId(1), 0);

fn enemy(id: u32, x: i32, y: i32) -> Creature {
    Creature::new(CreatureId(id), Side(1), 1, HexCoord::new(x, y)).with_facing(Facing::Left)
}

/// Creature 1 faces right at (2, 2) with enemies on all three hexes of its
/// front arc: 2 above, 3 straight ahead, 4 below. 2 and 3 grow thorns.
fn clearing(thorns_upgraded: bool) -> MatchState {
    let mut state = MatchState::new(GridDimensions::new(8, 5));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(2, 2))
                .with_ability(AbilityKind::SweepingCleave, false),
        )
        .unwrap();
    state
        .add_creature(enemy(2, 2, 1).with_ability(AbilityKind::BrambleHide, thorns_upgraded))
        .unwrap();
    state
        .add_creature(enemy(3, 3, 2).with_ability(AbilityKind::BrambleHide, thorns_upgraded))
        .unwrap();
    state.add_creature(enemy(4, 2, 3)).unwrap();
    state
}

fn health(state: &MatchState, id: u32) -> i32 {
    state.creature(CreatureId(id)).unwrap().health.current
}

#[test]
fn cleave_offers_every_enemy_in_the_arc() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = clearing(false);
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    let BeginOutcome::AwaitingTarget(TargetRequest::Choice(query)) =
        engine.begin(&env, CLEAVE).unwrap()
    else {
        panic!("cleave should offer a choice");
    };

    assert_eq!(query.options.len(), 3);
    assert_eq!(query.options[0][0], HexCoord::new(2, 1));
    assert_eq!(query.options[1][0], HexCoord::new(3, 2));
    assert_eq!(query.options[2][0], HexCoord::new(2, 3));
    assert!(query.options.iter().all(|option| option.len() == 3));
}

#[test]
fn cleave_sweep_is_silent_and_only_the_primary_answers() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = clearing(false);
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    engine.begin(&env, CLEAVE).unwrap();
    let report = engine.confirm(&env, TargetSelection::Choice(1)).unwrap();

    // Slash 4 on the primary, half of it on the rest of the arc.
    assert_eq!(health(engine.state(), 3), 6);
    assert_eq!(health(engine.state(), 2), 8);
    assert_eq!(health(engine.state(), 4), 8);

    // Creature 2 also has thorns but was only swept.
    assert_eq!(report.retaliations.len(), 1);
    let thorns = &report.retaliations[0];
    assert_eq!(thorns.ability, AbilityId::new(CreatureId(3), 0));
    assert_eq!(thorns.phase, Phase::Damage);
    assert_eq!(health(engine.state(), 1), 9);

    let attacker = engine.state().creature(CreatureId(1)).unwrap();
    assert_eq!(attacker.effects.count(EffectKind::Entangled), 1);
    assert!(!attacker.is_moveable());
    assert_eq!(attacker.endurance.current, 5);
}

#[test]
fn entanglement_wears_off_with_the_attackers_turn() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = clearing(false);
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    engine.begin(&env, CLEAVE).unwrap();
    engine.confirm(&env, TargetSelection::Choice(1)).unwrap();
    let report = engine.end_turn(&env).unwrap();

    assert!(report.expired.iter().any(|e| e.kind == EffectKind::Entangled));
    assert!(engine.state().creature(CreatureId(1)).unwrap().is_moveable());
}

#[test]
fn upgraded_thorns_exhaust_a_surviving_attacker() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = clearing(true);
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    engine.begin(&env, CLEAVE).unwrap();
    let report = engine.confirm(&env, TargetSelection::Choice(0)).unwrap();

    assert_eq!(report.retaliations.len(), 1);
    assert_eq!(report.retaliations[0].outcome.fatigued, vec![CreatureId(1)]);
    let attacker = engine.state().creature(CreatureId(1)).unwrap();
    assert_eq!(attacker.health.current, 8);
    assert!(attacker.is_fatigued());
}

#[test]
fn bark_grows_when_an_enemy_stands_behind() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = MatchState::new(GridDimensions::new(8, 3));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(4, 1))
                .with_ability(AbilityKind::BrambleHide, false),
        )
        .unwrap();
    state
        .add_creature(Creature::new(CreatureId(2), Side(1), 1, HexCoord::new(2, 1)))
        .unwrap();
    let mut engine = AbilityEngine::new(&mut state);

    for expected in 1..=2 {
        engine.start_turn(&env, CreatureId(1)).unwrap();
        let report = engine.end_turn(&env).unwrap();
        assert_eq!(report.activations.len(), 1);

        let owner = engine.state().creature(CreatureId(1)).unwrap();
        assert_eq!(owner.effects.count(EffectKind::Bramble), expected);
        assert_eq!(owner.stat(Stat::PierceMitigation), expected as i32);
        engine.begin_round().unwrap();
    }
}

#[test]
fn bark_stays_dormant_with_an_empty_rear() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = MatchState::new(GridDimensions::new(8, 3));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(4, 1))
                .with_ability(AbilityKind::BrambleHide, false),
        )
        .unwrap();
    state
        .add_creature(Creature::new(CreatureId(2), Side(1), 1, HexCoord::new(6, 1)))
        .unwrap();
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    let report = engine.end_turn(&env).unwrap();

    assert!(report.activations.is_empty());
    let owner = engine.state().creature(CreatureId(1)).unwrap();
    assert_eq!(owner.effects.count(EffectKind::Bramble), 0);
}

/// Creature 1 stands at (2, 1) with Exhausting Blow, creature 2 right next to it.
fn duel(upgraded: bool, attacker: Meter, victim: Meter) -> MatchState {
    let mut state = MatchState::new(GridDimensions::new(6, 3));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(2, 1))
                .with_endurance(attacker)
                .with_ability(AbilityKind::ExhaustingBlow, upgraded),
        )
        .unwrap();
    state.add_creature(enemy(2, 3, 1).with_endurance(victim)).unwrap();
    state
}

fn blow(engine: &mut AbilityEngine<'_>, env: &Env<'_>) -> u32 {
    let BeginOutcome::AwaitingTarget(TargetRequest::Creature(query)) =
        engine.begin(env, BLOW).unwrap()
    else {
        panic!("blow should ask for a creature");
    };
    assert_eq!(query.candidates, vec![CreatureId(2)]);
    let report = engine
        .confirm(env, TargetSelection::Creature(CreatureId(2)))
        .unwrap();
    report.outcome.damage[0].dealt
}

#[test]
fn blow_hits_a_fatigued_creature_twice_as_hard() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);

    let mut fresh = duel(false, Meter::full(5), Meter::full(5));
    let mut engine = AbilityEngine::new(&mut fresh);
    engine.start_turn(&env, CreatureId(1)).unwrap();
    assert_eq!(blow(&mut engine, &env), 3);

    let mut spent = duel(false, Meter::full(5), Meter::new(0, 5));
    let mut engine = AbilityEngine::new(&mut spent);
    engine.start_turn(&env, CreatureId(1)).unwrap();
    assert_eq!(blow(&mut engine, &env), 6);
    assert_eq!(health(engine.state(), 2), 4);
}

#[test]
fn upgraded_blow_adds_the_endurance_gap_after_doubling() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);

    // Gap of 3 on top of the plain 3.
    let mut fresh = duel(true, Meter::full(7), Meter::full(4));
    let mut engine = AbilityEngine::new(&mut fresh);
    engine.start_turn(&env, CreatureId(1)).unwrap();
    assert_eq!(blow(&mut engine, &env), 6);

    // Doubled 3 plus the gap, not the doubled sum.
    let mut spent = duel(true, Meter::full(7), Meter::new(0, 4));
    let mut engine = AbilityEngine::new(&mut spent);
    engine.start_turn(&env, CreatureId(1)).unwrap();
    assert_eq!(blow(&mut engine, &env), 9);
    assert_eq!(health(engine.state(), 2), 1);

    // A weaker attacker never subtracts.
    let mut uphill = duel(true, Meter::full(2), Meter::full(5));
    let mut engine = AbilityEngine::new(&mut uphill);
    engine.start_turn(&env, CreatureId(1)).unwrap();
    assert_eq!(blow(&mut engine, &env), 3);
}

#[test]
fn repeated_blows_wind_the_victim_once() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = duel(false, Meter::full(5), Meter::full(5));
    let mut engine = AbilityEngine::new(&mut state);

    for _ in 0..2 {
        engine.start_turn(&env, CreatureId(1)).unwrap();
        blow(&mut engine, &env);
        engine.end_turn(&env).unwrap();
        engine.begin_round().unwrap();
    }

    let victim = engine.state().creature(CreatureId(2)).unwrap();
    assert_eq!(victim.health.current, 4);
    assert_eq!(victim.effects.count(EffectKind::Winded), 1);
    assert_eq!(victim.stat(Stat::Endurance), 4);

    // Winded lifts when the victim's own turn starts.
    let report = engine.start_turn(&env, CreatureId(2)).unwrap();
    assert!(report.expired.iter().any(|e| e.kind == EffectKind::Winded));
    let victim = engine.state().creature(CreatureId(2)).unwrap();
    assert_eq!(victim.stat(Stat::Endurance), 5);
}

#[test]
fn wide_hooker_facing_left_reels_from_its_tail() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = MatchState::new(GridDimensions::new(10, 3));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 2, HexCoord::new(7, 1))
                .with_facing(Facing::Left)
                .with_ability(AbilityKind::GrapplingHook, false),
        )
        .unwrap();
    state.add_creature(enemy(2, 2, 1)).unwrap();
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    let BeginOutcome::AwaitingTarget(TargetRequest::Direction(query)) =
        engine.begin(&env, HOOK).unwrap()
    else {
        panic!("hook should ask for a direction");
    };
    assert_eq!(query.options.len(), 1);
    assert_eq!(query.options[0].direction, Direction::Left);
    assert_eq!(query.options[0].origin, HexCoord::new(6, 1));
    assert_eq!(query.options[0].target_distance, Some(4));

    let report = engine
        .confirm(&env, TargetSelection::Direction(Direction::Left))
        .unwrap();

    assert_eq!(report.outcome.moves.len(), 1);
    let victim = engine.state().creature(CreatureId(2)).unwrap();
    assert_eq!(victim.anchor, HexCoord::new(5, 1));
    assert_eq!(victim.health.current, 8);
    assert_eq!(engine.state().creature(CreatureId(1)).unwrap().anchor, HexCoord::new(7, 1));
    engine.state().verify_consistency().unwrap();
}

#[test]
fn thorns_spare_an_ally_that_hooks_them() {
    let config = EngineConfig::default();
    let catalog = AbilityCatalog::load().unwrap();
    let env = Env::new(&config).with_abilities(&catalog);
    let mut state = MatchState::new(GridDimensions::new(8, 3));
    state
        .add_creature(
            Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(1, 1))
                .with_ability(AbilityKind::GrapplingHook, false),
        )
        .unwrap();
    state
        .add_creature(
            Creature::new(CreatureId(2), Side(0), 1, HexCoord::new(5, 1))
                .with_facing(Facing::Left)
                .with_ability(AbilityKind::BrambleHide, true),
        )
        .unwrap();
    let mut engine = AbilityEngine::new(&mut state);

    engine.start_turn(&env, CreatureId(1)).unwrap();
    engine.begin(&env, HOOK).unwrap();
    let report = engine
        .confirm(&env, TargetSelection::Direction(Direction::Right))
        .unwrap();

    assert_eq!(report.outcome.raised.len(), 1);
    assert!(report.retaliations.is_empty());
    assert_eq!(health(engine.state(), 2), 8);
    let hooker = engine.state().creature(CreatureId(1)).unwrap();
    assert_eq!(hooker.health.current, 10);
    assert!(hooker.is_moveable());
    assert!(!hooker.is_fatigued());
}
