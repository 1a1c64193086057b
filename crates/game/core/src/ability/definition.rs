//! Declarative ability data supplied by the content layer.

use std::collections::BTreeMap;

use super::{AbilityKind, Phase, Trigger};
use crate::combat::DamageType;
use crate::targeting::TargetTeam;

/// Reach of an ability in hexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityRange {
    /// Closest selectable distance; anything nearer is the deadzone.
    pub minimum: u32,
    pub regular: u32,
    pub upgraded: u32,
}

impl AbilityRange {
    pub const fn new(minimum: u32, regular: u32, upgraded: u32) -> Self {
        Self {
            minimum,
            regular,
            upgraded,
        }
    }

    pub const fn max(&self, upgraded: bool) -> u32 {
        if upgraded { self.upgraded } else { self.regular }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub kind: AbilityKind,
    pub name: String,
    pub triggers: Vec<Phase>,
    pub team: TargetTeam,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: AbilityRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Vec<(DamageType, u32)>,
    /// Replaces `damage` when the slot is upgraded; empty means unchanged.
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgraded_damage: Vec<(DamageType, u32)>,
}

impl AbilityDefinition {
    pub fn trigger(&self) -> Trigger {
        Trigger::from_phases(&self.triggers)
    }

    pub fn damage_for(&self, upgraded: bool) -> BTreeMap<DamageType, u32> {
        let table = if upgraded && !self.upgraded_damage.is_empty() {
            &self.upgraded_damage
        } else {
            &self.damage
        };
        let mut amounts = BTreeMap::new();
        for &(damage_type, amount) in table {
            *amounts.entry(damage_type).or_insert(0) += amount;
        }
        amounts
    }
}
