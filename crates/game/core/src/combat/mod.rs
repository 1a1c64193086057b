//! Damage and effect resolution.
mod damage;
mod effects;

pub use damage::{
    AttackEvent, Damage, DamageArea, DamageOutcome, DamageResolution, DamageType, Retaliation,
    RetaliationLedger, apply_damage, modified_amounts, upgrade_bonus,
};
pub use effects::{add_effect, expire_effects, zero_endurance};
