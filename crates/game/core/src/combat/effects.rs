//! Effect application, expiry and the direct fatigue operation.

use tracing::{debug, info, warn};

use crate::engine::EngineError;
use crate::env::Env;
use crate::state::{CreatureId, Effect, EffectAdd, EffectDuration, MatchState, Stat};

/// Adds `effect` to its target under the stacking rule.
///
/// The effect list is consistent when this returns. Derived status is the
/// observer's concern; it is notified when the effect touches endurance.
pub fn add_effect(
    state: &mut MatchState,
    env: &Env<'_>,
    effect: Effect,
) -> Result<EffectAdd, EngineError> {
    state.try_creature(effect.target)?;
    let instance = state.allocate_effect_instance();
    let kind = effect.kind;
    let alters_endurance = effect.alters(Stat::Endurance);

    let target = state.try_creature_mut(effect.target)?;
    let outcome = target.effects.insert(instance, effect);
    match outcome {
        EffectAdd::Added(_) => {
            debug!(target = %target.id, kind = <&'static str>::from(kind), "effect added");
            if alters_endurance {
                env.notify_endurance(target);
            }
        }
        EffectAdd::AlreadyActive(existing) => {
            debug!(target = %target.id, kind = <&'static str>::from(kind), ?existing, "effect already active");
        }
        EffectAdd::Full => {
            warn!(target = %target.id, kind = <&'static str>::from(kind), "effect list full");
        }
    }
    Ok(outcome)
}

/// Sets current endurance to zero immediately, outside the effect system.
///
/// Returns the previous value.
pub fn zero_endurance(
    state: &mut MatchState,
    env: &Env<'_>,
    target: CreatureId,
) -> Result<i32, EngineError> {
    let creature = state.try_creature_mut(target)?;
    let previous = creature.endurance.current;
    creature.endurance.current = 0;
    info!(creature = %target, previous, "endurance zeroed");
    env.notify_endurance(creature);
    Ok(previous)
}

/// Removes effects on `creature` that end at `duration`.
pub fn expire_effects(
    state: &mut MatchState,
    env: &Env<'_>,
    creature: CreatureId,
    duration: EffectDuration,
) -> Result<Vec<Effect>, EngineError> {
    let target = state.try_creature_mut(creature)?;
    let expired = target.effects.expire(duration);
    if !expired.is_empty() {
        debug!(creature = %creature, count = expired.len(), ?duration, "effects expired");
    }
    if expired.iter().any(|effect| effect.alters(Stat::Endurance)) {
        env.notify_endurance(target);
    }
    Ok(expired)
}
