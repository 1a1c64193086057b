//! Fixed-pattern lookups.

use std::collections::BTreeSet;

use super::TargetFilter;
use crate::hex::{HexCoord, OffsetMatrix, PatternOrigin};
use crate::state::{Creature, CreatureId, MatchState};

/// Expands `matrix` around `source`, honouring its facing.
///
/// `mirrored` flips the pattern once more, for abilities aimed at the side
/// opposite the one the creature faces.
pub fn pattern_hexes(source: &Creature, matrix: &OffsetMatrix, mirrored: bool) -> Vec<HexCoord> {
    let origin = match matrix.origin() {
        PatternOrigin::Front => source.front_hex(),
        PatternOrigin::Rear => source.rear_hex(),
    };
    if source.facing.is_mirrored() != mirrored {
        matrix.mirrored().expand(origin)
    } else {
        matrix.expand(origin)
    }
}

/// On-board hexes covered by the pattern.
pub fn pattern_targets(
    state: &MatchState,
    source: &Creature,
    matrix: &OffsetMatrix,
    mirrored: bool,
) -> BTreeSet<HexCoord> {
    pattern_hexes(source, matrix, mirrored)
        .into_iter()
        .filter(|hex| state.grid.contains(*hex))
        .collect()
}

/// True as soon as one hex holds a creature accepted by `filter`.
pub fn at_least_one_target<I>(
    state: &MatchState,
    source: &Creature,
    hexes: I,
    filter: &TargetFilter,
) -> bool
where
    I: IntoIterator<Item = HexCoord>,
{
    hexes.into_iter().any(|hex| {
        state
            .creature_at(hex)
            .is_some_and(|candidate| filter.accepts(source, candidate))
    })
}

/// Accepted creatures standing on `hexes`, each once, in hex order.
pub fn creatures_in<I>(
    state: &MatchState,
    source: &Creature,
    hexes: I,
    filter: &TargetFilter,
) -> Vec<CreatureId>
where
    I: IntoIterator<Item = HexCoord>,
{
    let mut found = Vec::new();
    for hex in hexes {
        if let Some(candidate) = state.creature_at(hex)
            && filter.accepts(source, candidate)
            && !found.contains(&candidate.id)
        {
            found.push(candidate.id);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::{Direction, Facing};
    use crate::state::{GridDimensions, Side};
    use crate::targeting::TargetTeam;

    fn state_with(source: Creature, others: &[(u32, u8, HexCoord)]) -> MatchState {
        let mut state = MatchState::new(GridDimensions::new(10, 6));
        state.add_creature(source).unwrap();
        for &(id, side, anchor) in others {
            state
                .add_creature(Creature::new(CreatureId(id), Side(side), 1, anchor))
                .unwrap();
        }
        state
    }

    #[test]
    fn behind_pattern_follows_facing() {
        let right = Creature::new(CreatureId(1), Side(0), 2, HexCoord::new(5, 2));
        assert_eq!(
            pattern_hexes(&right, &OffsetMatrix::behind(2), false),
            vec![HexCoord::new(3, 2), HexCoord::new(2, 2)]
        );

        let left = right.clone().with_facing(Facing::Left);
        assert_eq!(
            pattern_hexes(&left, &OffsetMatrix::behind(2), false),
            vec![HexCoord::new(6, 2), HexCoord::new(7, 2)]
        );
        assert_eq!(
            pattern_hexes(&left, &OffsetMatrix::behind(2), true),
            vec![HexCoord::new(4, 2), HexCoord::new(3, 2)]
        );
    }

    #[test]
    fn pattern_targets_drop_off_board_hexes() {
        let source = Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(9, 0));
        let state = state_with(source.clone(), &[]);
        let hexes = pattern_targets(&state, &source, &OffsetMatrix::front_arc(), false);
        assert!(hexes.is_empty());
    }

    #[test]
    fn existence_check_matches_materialized_targets() {
        let source = Creature::new(CreatureId(1), Side(0), 1, HexCoord::new(3, 2));
        let front = source.front_hex();
        let state = state_with(
            source.clone(),
            &[
                (2, 1, front.neighbor(Direction::UpperRight)),
                (3, 0, front.neighbor(Direction::Right)),
            ],
        );
        let arc = pattern_targets(&state, &source, &OffsetMatrix::front_arc(), false);
        let enemies = TargetFilter::new(TargetTeam::Enemy);

        assert!(at_least_one_target(&state, &source, arc.iter().copied(), &enemies));
        assert_eq!(
            creatures_in(&state, &source, arc.iter().copied(), &enemies),
            vec![CreatureId(2)]
        );
        assert!(!at_least_one_target(
            &state,
            &source,
            arc.iter().copied(),
            &TargetFilter::new(TargetTeam::Ally).with(crate::targeting::Condition::Fatigued)
        ));
    }
}
