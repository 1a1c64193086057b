//! Timed or permanent stat alterations attached to a creature.
//!
//! Effects live in the target creature's [`EffectList`] and outlive the
//! ability invocation that created them.
//!
//! # Stacking
//!
//! Two effects share an identity when kind, owner and source ability match.
//! A non-stackable effect is never present twice on the same target; a
//! stackable one accumulates independent instances, each removable on its own
//! through its [`EffectInstanceId`].

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::ability::AbilityKind;
use crate::config::EngineConfig;

use super::{CreatureId, Stat};

/// Unique handle of one applied effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectInstanceId(pub u32);

/// Named effect families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Reduced endurance after a heavy blow.
    Winded,
    /// Held in place by thorns.
    Entangled,
    /// Hardened bark, stacks per turn.
    Bramble,
    Custom(u16),
}

/// Phase boundary of the target's own turn at which an effect expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    UntilTurnStart,
    UntilTurnEnd,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    /// Creature whose ability created the effect.
    pub owner: CreatureId,
    pub source: Option<AbilityKind>,
    pub target: CreatureId,
    /// `None` means permanent.
    pub duration: Option<EffectDuration>,
    pub stackable: bool,
    pub alterations: BTreeMap<Stat, i32>,
}

impl Effect {
    pub fn new(kind: EffectKind, owner: CreatureId, target: CreatureId) -> Self {
        Self {
            kind,
            owner,
            source: None,
            target,
            duration: None,
            stackable: false,
            alterations: BTreeMap::new(),
        }
    }

    pub fn from_ability(mut self, source: AbilityKind) -> Self {
        self.source = Some(source);
        self
    }

    pub fn lasting(mut self, duration: EffectDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Adds `delta` to the alteration of `stat`.
    pub fn alter(mut self, stat: Stat, delta: i32) -> Self {
        *self.alterations.entry(stat).or_insert(0) += delta;
        self
    }

    /// Redirects the effect at another target (used when one template hits many).
    pub fn targeting(&self, target: CreatureId) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    pub fn same_identity(&self, other: &Effect) -> bool {
        self.kind == other.kind && self.owner == other.owner && self.source == other.source
    }

    pub fn alters(&self, stat: Stat) -> bool {
        self.alterations.get(&stat).is_some_and(|delta| *delta != 0)
    }
}

/// One effect as stored on its target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub instance: EffectInstanceId,
    pub effect: Effect,
}

/// Result of adding an effect under the stacking rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectAdd {
    Added(EffectInstanceId),
    /// A non-stackable effect with the same identity was already active.
    AlreadyActive(EffectInstanceId),
    /// The list is at capacity.
    Full,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectList {
    entries: ArrayVec<ActiveEffect, { EngineConfig::MAX_EFFECTS }>,
}

impl EffectList {
    /// Inserts `effect` as `instance` unless the stacking rule forbids it.
    pub fn insert(&mut self, instance: EffectInstanceId, effect: Effect) -> EffectAdd {
        if !effect.stackable
            && let Some(existing) = self
                .entries
                .iter()
                .find(|entry| entry.effect.same_identity(&effect))
        {
            return EffectAdd::AlreadyActive(existing.instance);
        }

        match self.entries.try_push(ActiveEffect { instance, effect }) {
            Ok(()) => EffectAdd::Added(instance),
            Err(_) => EffectAdd::Full,
        }
    }

    pub fn remove(&mut self, instance: EffectInstanceId) -> Option<Effect> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.instance == instance)?;
        Some(self.entries.remove(index).effect)
    }

    /// Removes and returns every effect with the given duration.
    pub fn expire(&mut self, duration: EffectDuration) -> Vec<Effect> {
        let mut expired = Vec::new();
        self.entries.retain(|entry| {
            if entry.effect.duration == Some(duration) {
                expired.push(entry.effect.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Sum of all alterations of `stat`.
    pub fn alteration(&self, stat: Stat) -> i32 {
        self.entries
            .iter()
            .filter_map(|entry| entry.effect.alterations.get(&stat))
            .sum()
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.effect.kind == kind)
            .count()
    }

    pub fn instances(&self, kind: EffectKind) -> Vec<EffectInstanceId> {
        self.entries
            .iter()
            .filter(|entry| entry.effect.kind == kind)
            .map(|entry| entry.instance)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
