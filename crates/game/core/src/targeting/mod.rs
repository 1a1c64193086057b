//! Targeting queries.
//!
//! Two shapes are supported:
//! - directional scans, walking outward hex by hex and stopping at the first
//!   creature, obstacle or board edge
//! - fixed offset patterns expanded around a creature's front or rear hex
//!
//! Both are pure reads of [`MatchState`](crate::state::MatchState). The
//! request types describe what the input collaborator is asked to choose.
mod filter;
mod pattern;
mod request;
mod scan;

pub use filter::{Condition, TargetFilter, TargetTeam};
pub use pattern::{at_least_one_target, creatures_in, pattern_hexes, pattern_targets};
pub use request::{
    ChoiceQuery, CreatureQuery, DirectionQuery, ResolvedTarget, TargetRequest, TargetSelection,
};
pub use scan::{DirectionScan, scan_direction, scan_directions};
