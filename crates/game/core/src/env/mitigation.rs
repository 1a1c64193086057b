//! Pluggable damage mitigation.

use crate::combat::DamageType;
use crate::state::Creature;

/// Reduces one damage component before it hits the target.
pub trait MitigationOracle: Send + Sync {
    fn mitigate(&self, target: &Creature, damage_type: DamageType, amount: u32) -> u32;
}

/// Subtracts the target's per-type mitigation stat.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatMitigation;

impl MitigationOracle for FlatMitigation {
    fn mitigate(&self, target: &Creature, damage_type: DamageType, amount: u32) -> u32 {
        let mitigation = target.stat(damage_type.mitigation_stat()).max(0) as u32;
        amount.saturating_sub(mitigation)
    }
}
