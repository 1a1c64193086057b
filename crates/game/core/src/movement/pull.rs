//! Forced movement: pulling a creature and its puller together.
//!
//! The pair travels "through the air" along the scanned line, so only the
//! landing hexes have to be free. Who moves depends on the pulled creature's
//! footprint:
//!
//! | pulled size | puller | pulled |
//! |---|---|---|
//! | 1 | stays | lands on the first free hex in front of the puller |
//! | 2 | moves `ceil(n / 2)` hexes | moves `floor(n / 2)` hexes |
//! | 3+ | lands on the last free hex before the pulled creature | stays |
//!
//! where `n` is the number of free hexes between them.

use tracing::{info, warn};

use super::MoveOrder;
use crate::engine::{EngineError, ValidationError};
use crate::hex::{Direction, HexCoord, OffsetMatrix};
use crate::state::{Creature, CreatureId, InvariantViolation, MatchState};
use crate::targeting::DirectionScan;

/// Resting place of one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landing {
    pub creature: CreatureId,
    /// Hex the leading edge of the body lands on.
    pub hex: HexCoord,
    pub anchor: HexCoord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PullPlan {
    pub direction: Direction,
    /// Free hexes between the two bodies, nearest to the puller first.
    pub path: Vec<HexCoord>,
    pub puller: Option<Landing>,
    pub pulled: Option<Landing>,
}

impl PullPlan {
    /// Anchor changes to commit together.
    pub fn moves(&self) -> Vec<(CreatureId, HexCoord)> {
        [self.puller, self.pulled]
            .into_iter()
            .flatten()
            .map(|landing| (landing.creature, landing.anchor))
            .collect()
    }
}

/// Free hexes the pull traverses, deadzone included, in traversal order.
pub fn pull_path(state: &MatchState, scan: &DirectionScan, minimum: u32) -> Vec<HexCoord> {
    let deadzone = OffsetMatrix::front_line(minimum.saturating_sub(1))
        .rotated(scan.direction)
        .expand(scan.origin);

    let mut path: Vec<HexCoord> = deadzone
        .into_iter()
        .chain(scan.path.iter().copied())
        .filter(|hex| state.grid.is_free(*hex))
        .collect();
    path.sort_by_key(|hex| scan.origin.distance(*hex));
    path.dedup();
    path
}

/// Anchor that puts the body's leading edge on `leading` when heading along `heading`.
fn anchor_for(creature: &Creature, leading: HexCoord, heading: Direction) -> HexCoord {
    if heading.points_right() {
        leading
    } else {
        HexCoord::new(leading.x + i32::from(creature.size) - 1, leading.y)
    }
}

/// Computes where both participants come to rest.
pub fn plan_pull(
    state: &MatchState,
    puller: CreatureId,
    scan: &DirectionScan,
    minimum: u32,
) -> Result<PullPlan, EngineError> {
    let pulled = scan.target.ok_or(ValidationError::ScanWithoutTarget(scan.direction))?;
    let puller = state.try_creature(puller)?;
    let pulled = state.try_creature(pulled)?;

    let path = pull_path(state, scan, minimum);
    let len = path.len();
    if len == 0 {
        return Err(InvariantViolation::EmptyPullPath {
            puller: puller.id,
            pulled: pulled.id,
        }
        .into());
    }

    let toward_pulled = scan.direction;
    let toward_puller = toward_pulled.opposite();
    let puller_at = |index: usize| Landing {
        creature: puller.id,
        hex: path[index],
        anchor: anchor_for(puller, path[index], toward_pulled),
    };
    let pulled_at = |index: usize| Landing {
        creature: pulled.id,
        hex: path[index],
        anchor: anchor_for(pulled, path[index], toward_puller),
    };

    let (puller_landing, pulled_landing) = match pulled.size {
        1 => (None, Some(pulled_at(0))),
        2 => {
            let puller_steps = len.div_ceil(2);
            let pulled_steps = len / 2;
            let pulled_landing = (pulled_steps > 0).then(|| pulled_at(len - pulled_steps));
            (Some(puller_at(puller_steps - 1)), pulled_landing)
        }
        _ => (Some(puller_at(len - 1)), None),
    };

    Ok(PullPlan {
        direction: toward_pulled,
        path,
        puller: puller_landing,
        pulled: pulled_landing,
    })
}

/// Commits `plan` atomically and issues one animation per moved creature.
///
/// Fails without touching the board when any landing footprint is blocked,
/// occupied, or shared by both participants.
pub fn execute_pull(state: &mut MatchState, plan: &PullPlan) -> Result<Vec<MoveOrder>, EngineError> {
    let moves: Vec<(CreatureId, HexCoord)> = plan
        .moves()
        .into_iter()
        .filter(|&(id, anchor)| state.creature(id).is_some_and(|c| c.anchor != anchor))
        .collect();
    if moves.is_empty() {
        return Ok(Vec::new());
    }

    let changes = state.relocate(&moves).inspect_err(|error| {
        warn!(%error, direction = <&'static str>::from(plan.direction), "pull refused");
    })?;

    let orders: Vec<MoveOrder> = changes
        .into_iter()
        .map(|change| {
            let ticket = state.turn.gate.issue();
            MoveOrder::forced(change.creature, change.from, change.to, ticket)
        })
        .collect();
    for order in &orders {
        info!(creature = %order.creature, from = %order.from, to = %order.to, "pulled");
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridDimensions, Side};
    use crate::targeting::{TargetFilter, TargetTeam, scan_direction};

    fn setup(target_size: u8, target_anchor: i32) -> MatchState {
        let mut state = MatchState::new(GridDimensions::new(14, 3));
        state
            .add_creature(Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(1, 1)))
            .unwrap();
        state
            .add_creature(Creature::new(
                CreatureId(2),
                Side(1),
                target_size,
                HexCoord::new(target_anchor, 1),
            ))
            .unwrap();
        state
    }

    fn scan_right(state: &MatchState) -> DirectionScan {
        let source = state.creature(CreatureId(1)).unwrap();
        scan_direction(
            state,
            source,
            Direction::Right,
            2,
            10,
            &TargetFilter::new(TargetTeam::Enemy),
        )
    }

    #[test]
    fn path_includes_deadzone_and_skips_bodies() {
        let state = setup(1, 5);
        let path = pull_path(&state, &scan_right(&state), 2);
        assert_eq!(
            path,
            vec![HexCoord::new(2, 1), HexCoord::new(3, 1), HexCoord::new(4, 1)]
        );
    }

    #[test]
    fn plan_for_small_target_moves_only_the_target() {
        let state = setup(1, 6);
        let plan = plan_pull(&state, CreatureId(1), &scan_right(&state), 2).unwrap();
        assert_eq!(plan.puller, None);
        assert_eq!(plan.pulled.map(|l| l.anchor), Some(HexCoord::new(2, 1)));
    }

    #[test]
    fn leftward_pull_anchors_multi_hex_puller_on_its_tail() {
        let mut state = MatchState::new(GridDimensions::new(14, 3));
        state
            .add_creature(Creature::new(CreatureId(1), Side(0), 2, HexCoord::new(10, 1)))
            .unwrap();
        state
            .add_creature(Creature::new(CreatureId(2), Side(1), 3, HexCoord::new(3, 1)))
            .unwrap();
        let source = state.creature(CreatureId(1)).unwrap();
        let scan = scan_direction(
            &state,
            source,
            Direction::Left,
            2,
            10,
            &TargetFilter::new(TargetTeam::Enemy),
        );

        let plan = plan_pull(&state, CreatureId(1), &scan, 2).unwrap();
        let puller = plan.puller.unwrap();
        assert_eq!(puller.hex, HexCoord::new(4, 1));
        assert_eq!(puller.anchor, HexCoord::new(5, 1));

        execute_pull(&mut state, &plan).unwrap();
        state.verify_consistency().unwrap();
    }

    #[test]
    fn execution_issues_forced_orders_and_freezes_input() {
        let mut state = setup(1, 6);
        let plan = plan_pull(&state, CreatureId(1), &scan_right(&state), 2).unwrap();
        let orders = execute_pull(&mut state, &plan).unwrap();

        assert_eq!(orders.len(), 1);
        assert!(orders[0].ignore_path && orders[0].ignore_movement_point);
        assert_eq!(orders[0].from, HexCoord::new(6, 1));
        assert!(state.turn.input_frozen());
        assert_eq!(state.creature(CreatureId(2)).unwrap().anchor, HexCoord::new(2, 1));
    }

    #[test]
    fn colliding_landing_is_an_invariant_violation() {
        let mut state = setup(1, 6);
        let plan = plan_pull(&state, CreatureId(1), &scan_right(&state), 2).unwrap();
        // Something else claims the landing hex before the pull commits.
        state
            .add_creature(Creature::new(CreatureId(3), Side(1), 1, HexCoord::new(2, 1)))
            .unwrap();
        let before = state.clone();

        let result = execute_pull(&mut state, &plan);
        assert!(matches!(result, Err(EngineError::State(_))));
        assert_eq!(state, before);
    }
}
