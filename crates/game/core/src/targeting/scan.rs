//! Directional scans with interruption.

use tracing::debug;

use super::TargetFilter;
use crate::hex::{Direction, HexCoord};
use crate::state::{Creature, CreatureId, MatchState};

/// Result of walking outward from a creature along one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionScan {
    pub direction: Direction,
    /// Body edge the scan starts from (distance 0).
    pub origin: HexCoord,
    /// Reachable hexes at or beyond the minimum distance, nearest first. Ends
    /// with the target's hex when there is one.
    pub path: Vec<HexCoord>,
    pub target: Option<CreatureId>,
    pub target_distance: Option<u32>,
    /// Creature that stopped the scan without qualifying as a target.
    pub blocker: Option<CreatureId>,
}

impl DirectionScan {
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Distance of `hex` from the scan origin.
    pub fn distance_of(&self, hex: HexCoord) -> u32 {
        self.origin.distance(hex)
    }
}

/// Walks from `source` along `direction`.
///
/// The first creature met ends the scan whether or not it qualifies: a
/// creature failing `filter`, or standing closer than `minimum`, interrupts
/// the walk without becoming a target. Obstacles and the board edge also end
/// it. Empty hexes inside the deadzone are not part of the path.
pub fn scan_direction(
    state: &MatchState,
    source: &Creature,
    direction: Direction,
    minimum: u32,
    maximum: u32,
    filter: &TargetFilter,
) -> DirectionScan {
    let origin = source.edge_toward(direction);
    let mut scan = DirectionScan {
        direction,
        origin,
        path: Vec::new(),
        target: None,
        target_distance: None,
        blocker: None,
    };

    for distance in 1..=maximum {
        let hex = origin.step(direction, distance);
        if !state.grid.is_passable(hex) {
            break;
        }

        match state.creature_at(hex) {
            Some(occupant) if occupant.id == source.id => continue,
            Some(occupant) => {
                if distance >= minimum && filter.accepts(source, occupant) {
                    scan.path.push(hex);
                    scan.target = Some(occupant.id);
                    scan.target_distance = Some(distance);
                } else {
                    scan.blocker = Some(occupant.id);
                }
                break;
            }
            None if distance >= minimum => scan.path.push(hex),
            None => {}
        }
    }

    debug!(
        source = %source.id,
        direction = <&'static str>::from(direction),
        target = ?scan.target,
        blocker = ?scan.blocker,
        reach = scan.path.len(),
        "direction scanned"
    );
    scan
}

/// One scan per direction, in the given order.
pub fn scan_directions(
    state: &MatchState,
    source: &Creature,
    directions: &[Direction],
    minimum: u32,
    maximum: u32,
    filter: &TargetFilter,
) -> Vec<DirectionScan> {
    directions
        .iter()
        .map(|&direction| scan_direction(state, source, direction, minimum, maximum, filter))
        .collect()
}
