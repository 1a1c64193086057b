//! Hex geometry: coordinates, directions, footprints and offset patterns.
mod coord;
mod matrix;

pub use coord::{Direction, Facing, HexCoord, footprint};
pub use matrix::{OffsetMatrix, PatternOrigin};
