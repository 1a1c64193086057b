use std::cmp::Ordering;
use std::fmt;

use arrayvec::ArrayVec;

use crate::config::EngineConfig;

/// Hex cell in an offset layout where odd rows sit half a hex to the right.
///
/// `x` is the column and `y` the row. Geometry (distance, rotation) is done in
/// axial coordinates; see [`HexCoord::to_axial`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl PartialOrd for HexCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HexCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Row-major ordering for deterministic iteration
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl HexCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to axial `(q, r)`.
    pub const fn to_axial(self) -> (i32, i32) {
        let q = self.x - (self.y - (self.y & 1)) / 2;
        (q, self.y)
    }

    pub const fn from_axial(q: i32, r: i32) -> Self {
        Self {
            x: q + (r - (r & 1)) / 2,
            y: r,
        }
    }

    /// Translates by an axial offset.
    pub fn offset(self, dq: i32, dr: i32) -> Self {
        let (q, r) = self.to_axial();
        Self::from_axial(q + dq, r + dr)
    }

    pub fn neighbor(self, direction: Direction) -> Self {
        self.step(direction, 1)
    }

    /// Walks `distance` hexes along `direction`.
    pub fn step(self, direction: Direction, distance: u32) -> Self {
        let (dq, dr) = direction.axial();
        let n = distance as i32;
        self.offset(dq * n, dr * n)
    }

    /// Hex steps between two cells.
    pub fn distance(self, other: HexCoord) -> u32 {
        let (q1, r1) = self.to_axial();
        let (q2, r2) = other.to_axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    pub fn is_adjacent(self, other: HexCoord) -> bool {
        self.distance(other) == 1
    }

    /// Straight line of `length` hexes starting one step away from `self`.
    pub fn line(self, direction: Direction, length: u32) -> Vec<HexCoord> {
        (1..=length).map(|d| self.step(direction, d)).collect()
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Hexes covered by a creature of `size` anchored at `anchor`.
///
/// The anchor is the right-most hex; the body extends left along the row.
pub fn footprint(anchor: HexCoord, size: u8) -> ArrayVec<HexCoord, { EngineConfig::MAX_FOOTPRINT }> {
    let size = (size as usize).clamp(1, EngineConfig::MAX_FOOTPRINT);
    (0..size)
        .map(|i| HexCoord::new(anchor.x - i as i32, anchor.y))
        .collect()
}

/// The six hex directions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    UpperLeft,
    UpperRight,
    Right,
    LowerRight,
    LowerLeft,
}

impl Direction {
    /// Axial step for one hex in this direction (rows grow downward).
    pub const fn axial(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::UpperRight => (1, -1),
            Direction::UpperLeft => (0, -1),
            Direction::Left => (-1, 0),
            Direction::LowerLeft => (-1, 1),
            Direction::LowerRight => (0, 1),
        }
    }

    /// Sixty-degree counter-clockwise steps from [`Direction::Right`].
    pub const fn rotation(self) -> u8 {
        match self {
            Direction::Right => 0,
            Direction::UpperRight => 1,
            Direction::UpperLeft => 2,
            Direction::Left => 3,
            Direction::LowerLeft => 4,
            Direction::LowerRight => 5,
        }
    }

    pub const fn from_rotation(steps: u8) -> Self {
        match steps % 6 {
            0 => Direction::Right,
            1 => Direction::UpperRight,
            2 => Direction::UpperLeft,
            3 => Direction::Left,
            4 => Direction::LowerLeft,
            _ => Direction::LowerRight,
        }
    }

    pub const fn opposite(self) -> Self {
        Self::from_rotation(self.rotation() + 3)
    }

    /// Reflection across the vertical axis.
    pub const fn mirrored(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::UpperRight => Direction::UpperLeft,
            Direction::UpperLeft => Direction::UpperRight,
            Direction::LowerRight => Direction::LowerLeft,
            Direction::LowerLeft => Direction::LowerRight,
        }
    }

    /// True for the three directions with a rightward component.
    pub const fn points_right(self) -> bool {
        matches!(
            self,
            Direction::Right | Direction::UpperRight | Direction::LowerRight
        )
    }

    /// Straight along the row (the "inline" directions).
    pub const fn is_inline(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub const fn inline() -> [Direction; 2] {
        [Direction::Left, Direction::Right]
    }

    pub fn all() -> impl Iterator<Item = Direction> {
        <Direction as strum::IntoEnumIterator>::iter()
    }
}

/// Horizontal orientation of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub const fn forward(self) -> Direction {
        match self {
            Facing::Right => Direction::Right,
            Facing::Left => Direction::Left,
        }
    }

    pub const fn is_mirrored(self) -> bool {
        matches!(self, Facing::Left)
    }

    pub const fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}
