//! Relative hex patterns used for area and inline targeting.
//!
//! Offsets are axial and authored for a creature facing right, with `+q`
//! pointing forward. [`OffsetMatrix::mirrored`] produces the left-facing
//! variant and [`OffsetMatrix::rotated`] re-aims a pattern along any of the
//! six directions.

use super::{Direction, HexCoord};

/// Which hex of a creature's footprint a pattern is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternOrigin {
    /// The hex the creature faces out of.
    #[default]
    Front,
    /// The hex at the back of the body.
    Rear,
}

/// Ordered sequence of relative offsets defining a targeting pattern.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetMatrix {
    origin: PatternOrigin,
    offsets: Vec<(i32, i32)>,
}

impl OffsetMatrix {
    pub fn new(origin: PatternOrigin, offsets: Vec<(i32, i32)>) -> Self {
        Self { origin, offsets }
    }

    /// `length` hexes straight ahead of the front hex.
    pub fn front_line(length: u32) -> Self {
        let offsets = (1..=length as i32).map(|q| (q, 0)).collect();
        Self::new(PatternOrigin::Front, offsets)
    }

    /// `length` hexes directly behind the body.
    pub fn behind(length: u32) -> Self {
        let offsets = (1..=length as i32).map(|q| (-q, 0)).collect();
        Self::new(PatternOrigin::Rear, offsets)
    }

    /// The three hexes touching the front hex on its forward side.
    pub fn front_arc() -> Self {
        Self::new(
            PatternOrigin::Front,
            vec![
                Direction::UpperRight.axial(),
                Direction::Right.axial(),
                Direction::LowerRight.axial(),
            ],
        )
    }

    /// The six neighbors of the front hex.
    pub fn adjacent() -> Self {
        Self::new(
            PatternOrigin::Front,
            Direction::all().map(Direction::axial).collect(),
        )
    }

    pub fn origin(&self) -> PatternOrigin {
        self.origin
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Reflects the pattern for a left-facing creature.
    pub fn mirrored(&self) -> Self {
        let offsets = self.offsets.iter().map(|&(q, r)| (-q - r, r)).collect();
        Self::new(self.origin, offsets)
    }

    /// Rotates a right-authored pattern so that forward points along `direction`.
    pub fn rotated(&self, direction: Direction) -> Self {
        let steps = direction.rotation();
        let offsets = self
            .offsets
            .iter()
            .map(|&offset| (0..steps).fold(offset, |(q, r), _| (q + r, -q)))
            .collect();
        Self::new(self.origin, offsets)
    }

    /// Absolute hexes relative to `origin`, in pattern order.
    pub fn expand(&self, origin: HexCoord) -> Vec<HexCoord> {
        self.offsets
            .iter()
            .map(|&(dq, dr)| origin.offset(dq, dr))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_front_line_points_left() {
        let origin = HexCoord::new(5, 2);
        let hexes = OffsetMatrix::front_line(2).mirrored().expand(origin);
        assert_eq!(hexes, vec![HexCoord::new(4, 2), HexCoord::new(3, 2)]);
    }

    #[test]
    fn rotated_line_matches_direction_walk() {
        let origin = HexCoord::new(4, 3);
        for direction in Direction::all() {
            let hexes = OffsetMatrix::front_line(3).rotated(direction).expand(origin);
            assert_eq!(hexes, origin.line(direction, 3));
        }
    }

    #[test]
    fn front_arc_mirrors_to_the_left_side() {
        let origin = HexCoord::new(4, 2);
        let right = OffsetMatrix::front_arc().expand(origin);
        let left = OffsetMatrix::front_arc().mirrored().expand(origin);
        assert_eq!(
            right,
            vec![
                origin.neighbor(Direction::UpperRight),
                origin.neighbor(Direction::Right),
                origin.neighbor(Direction::LowerRight),
            ]
        );
        assert_eq!(
            left,
            vec![
                origin.neighbor(Direction::UpperLeft),
                origin.neighbor(Direction::Left),
                origin.neighbor(Direction::LowerLeft),
            ]
        );
    }
}
