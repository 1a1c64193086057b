//! Deterministic ability resolution for hex-grid tactical combat.
//!
//! `arena-core` owns the rules: hex geometry, the board and its occupancy,
//! targeting queries, the ability lifecycle, damage and effect resolution,
//! and forced movement. All mutation of [`MatchState`] flows through
//! [`engine::AbilityEngine`]; presentation, input and data loading are
//! supplied by the host through the oracles in [`env`].
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod hex;
pub mod movement;
pub mod state;
pub mod targeting;

pub use ability::{
    AbilityBehavior, AbilityContext, AbilityDefinition, AbilityId, AbilityKind, AbilityRange,
    AbilitySlot, AbilityState, Eligibility, MessageCode, PendingQuery, Phase, Trigger,
};
pub use combat::{AttackEvent, Damage, DamageArea, DamageOutcome, DamageType, Retaliation};
pub use config::EngineConfig;
pub use engine::{
    AbilityEngine, Activation, ActivationOutcome, ActivationReport, AppliedEffect, BeginOutcome,
    EngineError, PhaseReport, ValidationError,
};
pub use env::{
    AbilityOracle, Env, FlatMitigation, MessageOracle, MitigationOracle, OracleError,
    StatusObserver,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use hex::{Direction, Facing, HexCoord, OffsetMatrix, PatternOrigin};
pub use movement::{AnimationTicket, FollowUp, MoveOrder, PullPlan};
pub use state::{
    BaseStats, Creature, CreatureId, Effect, EffectDuration, EffectKind, Grid, GridDimensions,
    MatchState, Meter, Side, Stat, StateError, Terrain,
};
pub use targeting::{
    Condition, DirectionScan, ResolvedTarget, TargetFilter, TargetRequest, TargetSelection,
    TargetTeam,
};
