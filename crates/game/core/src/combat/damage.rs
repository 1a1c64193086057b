//! Damage calculation and application.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::effects::add_effect;
use crate::ability::AbilityKind;
use crate::config::EngineConfig;
use crate::engine::{EngineError, ValidationError};
use crate::env::Env;
use crate::state::{Creature, CreatureId, Effect, EffectAdd, MatchState, Stat};

// ============================================================================
// Damage Type
// ============================================================================

/// Typed damage component, mitigated independently.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Pierce,
    Slash,
    Crush,
}

impl DamageType {
    pub const fn mitigation_stat(self) -> Stat {
        match self {
            DamageType::Pierce => Stat::PierceMitigation,
            DamageType::Slash => Stat::SlashMitigation,
            DamageType::Crush => Stat::CrushMitigation,
        }
    }
}

// ============================================================================
// Damage Record
// ============================================================================

/// Shape of a damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageArea {
    /// Exactly one target.
    #[default]
    Single,
    /// Any number of targets, each taking `percent` of the base magnitudes.
    Area { percent: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub attacker: CreatureId,
    pub source: Option<AbilityKind>,
    /// Base magnitudes, non-negative by construction.
    pub amounts: BTreeMap<DamageType, u32>,
    /// Component doubled against fatigued targets.
    pub endurance_sensitive: Option<DamageType>,
    /// Adds the endurance-difference bonus to the sensitive component.
    pub upgrade_bonus: bool,
    pub area: DamageArea,
    /// Applied to every target hit.
    pub effects: Vec<Effect>,
}

impl Damage {
    pub fn new(attacker: CreatureId) -> Self {
        Self {
            attacker,
            source: None,
            amounts: BTreeMap::new(),
            endurance_sensitive: None,
            upgrade_bonus: false,
            area: DamageArea::Single,
            effects: Vec::new(),
        }
    }

    pub fn from_ability(mut self, source: AbilityKind) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with(mut self, damage_type: DamageType, amount: u32) -> Self {
        let entry = self.amounts.entry(damage_type).or_insert(0);
        *entry = entry.saturating_add(amount);
        self
    }

    pub fn with_amounts(mut self, amounts: BTreeMap<DamageType, u32>) -> Self {
        for (damage_type, amount) in amounts {
            self = self.with(damage_type, amount);
        }
        self
    }

    pub fn endurance_sensitive(mut self, damage_type: DamageType) -> Self {
        self.endurance_sensitive = Some(damage_type);
        self
    }

    pub fn upgraded(mut self, upgraded: bool) -> Self {
        self.upgrade_bonus = upgraded;
        self
    }

    pub fn area(mut self, area: DamageArea) -> Self {
        self.area = area;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn total(&self) -> u32 {
        self.amounts
            .values()
            .fold(0, |total, &amount| total.saturating_add(amount))
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Magnitudes after area scaling and endurance modifiers, before mitigation.
///
/// The endurance-sensitive component is multiplied by
/// `fatigue_multiplier` when the target's endurance is at or below zero; an
/// upgraded attack then adds `max(0, attacker endurance - target endurance)`
/// (effective maximum endurance) on top. The bonus itself is not multiplied.
pub fn modified_amounts(
    damage: &Damage,
    attacker: &Creature,
    target: &Creature,
    config: &EngineConfig,
) -> BTreeMap<DamageType, u32> {
    let percent = match damage.area {
        DamageArea::Single => 100,
        DamageArea::Area { percent } => percent,
    };

    damage
        .amounts
        .iter()
        .map(|(&damage_type, &amount)| {
            let mut value = amount.saturating_mul(percent) / 100;
            if damage.endurance_sensitive == Some(damage_type) {
                if target.is_fatigued() {
                    value = value.saturating_mul(config.fatigue_multiplier);
                }
                if damage.upgrade_bonus {
                    value = value.saturating_add(upgrade_bonus(attacker, target));
                }
            }
            (damage_type, value)
        })
        .collect()
}

/// Endurance-difference bonus; never negative.
pub fn upgrade_bonus(attacker: &Creature, target: &Creature) -> u32 {
    let gap = attacker
        .stat(Stat::Endurance)
        .saturating_sub(target.stat(Stat::Endurance));
    u32::try_from(gap).unwrap_or(0)
}

// ============================================================================
// Retaliation Ledger
// ============================================================================

/// One distinct attack: every resolution pass of the same activation shares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackEvent(pub u64);

/// Counter-response opportunity raised by unsuppressed damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Retaliation {
    pub event: AttackEvent,
    pub responder: CreatureId,
    pub attacker: CreatureId,
}

/// Remembers which targets already got their retaliation for an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetaliationLedger {
    granted: BTreeSet<(AttackEvent, CreatureId)>,
}

impl RetaliationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `responder` is claimed for `event`.
    pub fn claim(&mut self, event: AttackEvent, responder: CreatureId) -> bool {
        self.granted.insert((event, responder))
    }
}

// ============================================================================
// Application
// ============================================================================

/// What one target took.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    pub target: CreatureId,
    /// Per component, after mitigation.
    pub components: BTreeMap<DamageType, u32>,
    pub dealt: u32,
    pub health_after: i32,
    pub killed: bool,
    pub effects: Vec<EffectAdd>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageResolution {
    pub outcomes: Vec<DamageOutcome>,
    pub retaliations: Vec<Retaliation>,
}

/// Applies `damage` to every target.
///
/// All validation happens before the first mutation: unknown or dead
/// targets, duplicates, or several targets for a single-target damage leave
/// the state untouched. Unless `suppress_retaliation` is set, each surviving
/// target is offered one retaliation per `event`; later passes of the same
/// event never offer a second one.
pub fn apply_damage(
    state: &mut MatchState,
    env: &Env<'_>,
    ledger: &mut RetaliationLedger,
    event: AttackEvent,
    damage: &Damage,
    targets: &[CreatureId],
    suppress_retaliation: bool,
) -> Result<DamageResolution, EngineError> {
    let attacker = state.try_creature(damage.attacker)?;
    if damage.area == DamageArea::Single && targets.len() > 1 {
        return Err(ValidationError::AreaMismatch {
            targets: targets.len(),
        }
        .into());
    }

    let config = env.config();
    let mitigation = env.mitigation();
    let mut planned = Vec::with_capacity(targets.len());
    for (index, &id) in targets.iter().enumerate() {
        if targets[..index].contains(&id) {
            return Err(ValidationError::DuplicateTarget(id).into());
        }
        let target = state.try_creature(id)?;
        if !target.is_alive() {
            return Err(ValidationError::DeadTarget(id).into());
        }

        let components: BTreeMap<DamageType, u32> =
            modified_amounts(damage, attacker, target, config)
                .into_iter()
                .map(|(damage_type, amount)| {
                    let mitigated = mitigation.mitigate(target, damage_type, amount);
                    let floored = if amount > 0 {
                        mitigated.max(config.minimum_damage)
                    } else {
                        0
                    };
                    (damage_type, floored)
                })
                .collect();
        planned.push((id, components));
    }

    let mut resolution = DamageResolution::default();
    for (id, components) in planned {
        let dealt = components
            .values()
            .fold(0u32, |total, &amount| total.saturating_add(amount));
        let target = state.try_creature_mut(id)?;
        target.health.current = target
            .health
            .current
            .saturating_sub(i32::try_from(dealt).unwrap_or(i32::MAX));
        let health_after = target.health.current;
        let killed = health_after <= 0;
        debug!(attacker = %damage.attacker, target = %id, dealt, health_after, "damage applied");

        let mut effects = Vec::new();
        if !killed {
            for effect in &damage.effects {
                effects.push(add_effect(state, env, effect.targeting(id))?);
            }
        } else {
            state.remove_from_board(id);
            info!(creature = %id, killer = %damage.attacker, "creature died");
        }

        let retaliates = !suppress_retaliation
            && !killed
            && config.retaliation_enabled
            && id != damage.attacker
            && ledger.claim(event, id);
        if retaliates {
            resolution.retaliations.push(Retaliation {
                event,
                responder: id,
                attacker: damage.attacker,
            });
        }

        resolution.outcomes.push(DamageOutcome {
            target: id,
            components,
            dealt,
            health_after,
            killed,
            effects,
        });
    }
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;
    use crate::state::{BaseStats, GridDimensions, Meter, Side};

    fn fighter(id: u32, x: i32) -> Creature {
        Creature::new(CreatureId(id), Side((id % 2) as u8), 1, HexCoord::new(x, 0))
    }

    #[test]
    fn fatigued_target_doubles_sensitive_component_only() {
        let config = EngineConfig::default();
        let attacker = fighter(1, 0);
        let damage = Damage::new(attacker.id)
            .with(DamageType::Crush, 3)
            .with(DamageType::Slash, 2)
            .endurance_sensitive(DamageType::Crush);

        let fresh = fighter(2, 1).with_endurance(Meter::new(1, 5));
        let spent = fighter(2, 1).with_endurance(Meter::new(0, 5));

        let normal = modified_amounts(&damage, &attacker, &fresh, &config);
        let doubled = modified_amounts(&damage, &attacker, &spent, &config);
        assert_eq!(normal[&DamageType::Crush], 3);
        assert_eq!(doubled[&DamageType::Crush], 6);
        assert_eq!(doubled[&DamageType::Slash], 2);
    }

    #[test]
    fn upgrade_bonus_is_never_negative() {
        let strong = fighter(1, 0).with_endurance(Meter::full(7));
        let weak = fighter(2, 1).with_endurance(Meter::full(4));
        assert_eq!(upgrade_bonus(&strong, &weak), 3);
        assert_eq!(upgrade_bonus(&weak, &strong), 0);
        assert_eq!(upgrade_bonus(&weak, &weak), 0);
    }

    #[test]
    fn area_percent_scales_before_modifiers() {
        let damage = Damage::new(CreatureId(1))
            .with(DamageType::Slash, 5)
            .area(DamageArea::Area { percent: 50 });
        let amounts = modified_amounts(&damage, &fighter(1, 0), &fighter(2, 1), &EngineConfig::default());
        assert_eq!(amounts[&DamageType::Slash], 2);
    }

    #[test]
    fn rejected_request_mutates_nothing() {
        let mut state = MatchState::new(GridDimensions::new(6, 2));
        state.add_creature(fighter(1, 0)).unwrap();
        state.add_creature(fighter(2, 1)).unwrap();
        let before = state.clone();
        let config = EngineConfig::default();
        let env = Env::new(&config);
        let mut ledger = RetaliationLedger::new();
        let damage = Damage::new(CreatureId(1)).with(DamageType::Pierce, 4);

        let unknown = apply_damage(
            &mut state,
            &env,
            &mut ledger,
            AttackEvent(1),
            &damage.clone().area(DamageArea::Area { percent: 100 }),
            &[CreatureId(2), CreatureId(9)],
            false,
        );
        assert!(unknown.is_err());

        let single = apply_damage(
            &mut state,
            &env,
            &mut ledger,
            AttackEvent(1),
            &damage,
            &[CreatureId(2), CreatureId(1)],
            false,
        );
        assert!(matches!(
            single,
            Err(EngineError::Validation(ValidationError::AreaMismatch { targets: 2 }))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn mitigation_and_death_vacate_the_board() {
        let mut state = MatchState::new(GridDimensions::new(6, 2));
        state.add_creature(fighter(1, 0)).unwrap();
        state
            .add_creature(
                fighter(2, 1)
                    .with_health(3)
                    .with_stats(BaseStats { pierce: 1, ..BaseStats::default() }),
            )
            .unwrap();
        let config = EngineConfig::default();
        let env = Env::new(&config);
        let mut ledger = RetaliationLedger::new();
        let damage = Damage::new(CreatureId(1)).with(DamageType::Pierce, 4);

        let resolution = apply_damage(
            &mut state,
            &env,
            &mut ledger,
            AttackEvent(1),
            &damage,
            &[CreatureId(2)],
            false,
        )
        .unwrap();

        let outcome = &resolution.outcomes[0];
        assert_eq!(outcome.dealt, 3);
        assert!(outcome.killed);
        assert!(resolution.retaliations.is_empty());
        assert_eq!(state.grid.occupant(HexCoord::new(1, 0)), None);
        state.verify_consistency().unwrap();
    }

    #[test]
    fn oversized_hit_saturates_instead_of_wrapping() {
        let mut state = MatchState::new(GridDimensions::new(6, 2));
        state.add_creature(fighter(1, 0).with_endurance(Meter::full(i32::MAX))).unwrap();
        state
            .add_creature(fighter(2, 1).with_endurance(Meter::new(0, i32::MIN)))
            .unwrap();
        let config = EngineConfig::default();
        let env = Env::new(&config);
        let mut ledger = RetaliationLedger::new();
        let damage = Damage::new(CreatureId(1))
            .with(DamageType::Crush, u32::MAX)
            .with(DamageType::Slash, u32::MAX)
            .endurance_sensitive(DamageType::Crush)
            .upgraded(true)
            .area(DamageArea::Area { percent: 100 });

        let attacker = state.creature(CreatureId(1)).unwrap();
        let target = state.creature(CreatureId(2)).unwrap();
        assert_eq!(upgrade_bonus(attacker, target), i32::MAX as u32);
        let amounts = modified_amounts(&damage, attacker, target, &config);
        assert_eq!(amounts[&DamageType::Slash], u32::MAX / 100);
        assert_eq!(amounts[&DamageType::Crush], (u32::MAX / 100) * 2 + i32::MAX as u32);
        assert_eq!(damage.total(), u32::MAX);

        let resolution = apply_damage(
            &mut state,
            &env,
            &mut ledger,
            AttackEvent(1),
            &damage,
            &[CreatureId(2)],
            false,
        )
        .unwrap();

        let outcome = &resolution.outcomes[0];
        assert!(outcome.killed);
        assert_eq!(outcome.health_after, 10 - i32::MAX);
        assert!(state.creature(CreatureId(2)).is_none_or(|c| !c.is_alive()));
    }

    #[test]
    fn same_event_offers_one_retaliation_per_target() {
        let mut state = MatchState::new(GridDimensions::new(6, 2));
        state.add_creature(fighter(1, 0)).unwrap();
        state.add_creature(fighter(2, 1).with_health(20)).unwrap();
        let config = EngineConfig::default();
        let env = Env::new(&config);
        let mut ledger = RetaliationLedger::new();
        let damage = Damage::new(CreatureId(1)).with(DamageType::Slash, 1);

        let mut offered = 0;
        for suppress in [true, false, false] {
            offered += apply_damage(
                &mut state,
                &env,
                &mut ledger,
                AttackEvent(7),
                &damage,
                &[CreatureId(2)],
                suppress,
            )
            .unwrap()
            .retaliations
            .len();
        }
        assert_eq!(offered, 1);
    }
}
