use std::collections::BTreeMap;

use crate::hex::HexCoord;

use super::{CreatureId, InvariantViolation};

/// Static terrain of a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Floor,
    /// Stops scans and can never be landed on.
    Obstacle,
}

impl Terrain {
    pub fn is_passable(self) -> bool {
        matches!(self, Terrain::Floor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, hex: HexCoord) -> bool {
        hex.x >= 0 && hex.y >= 0 && hex.x < self.width as i32 && hex.y < self.height as i32
    }
}

/// One creature relocation inside an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relocation {
    pub creature: CreatureId,
    pub from: Vec<HexCoord>,
    pub to: Vec<HexCoord>,
}

/// Hex board: terrain plus occupancy.
///
/// Occupancy is the single source of truth for who stands where. Every
/// mutation either succeeds completely or leaves the map untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: GridDimensions,
    obstacles: BTreeMap<HexCoord, Terrain>,
    occupancy: BTreeMap<HexCoord, CreatureId>,
}

impl Grid {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            obstacles: BTreeMap::new(),
            occupancy: BTreeMap::new(),
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn contains(&self, hex: HexCoord) -> bool {
        self.dimensions.contains(hex)
    }

    pub fn set_terrain(&mut self, hex: HexCoord, terrain: Terrain) {
        if terrain.is_passable() {
            self.obstacles.remove(&hex);
        } else {
            self.obstacles.insert(hex, terrain);
        }
    }

    pub fn terrain(&self, hex: HexCoord) -> Terrain {
        self.obstacles.get(&hex).copied().unwrap_or_default()
    }

    /// In bounds and not an obstacle.
    pub fn is_passable(&self, hex: HexCoord) -> bool {
        self.contains(hex) && self.terrain(hex).is_passable()
    }

    pub fn occupant(&self, hex: HexCoord) -> Option<CreatureId> {
        self.occupancy.get(&hex).copied()
    }

    /// Passable and unoccupied.
    pub fn is_free(&self, hex: HexCoord) -> bool {
        self.is_passable(hex) && !self.occupancy.contains_key(&hex)
    }

    pub fn occupancy(&self) -> &BTreeMap<HexCoord, CreatureId> {
        &self.occupancy
    }

    pub fn hexes_of(&self, creature: CreatureId) -> Vec<HexCoord> {
        self.occupancy
            .iter()
            .filter(|(_, occupant)| **occupant == creature)
            .map(|(hex, _)| *hex)
            .collect()
    }

    /// Places `creature` on every hex of `hexes`.
    pub fn place(&mut self, creature: CreatureId, hexes: &[HexCoord]) -> Result<(), InvariantViolation> {
        for &hex in hexes {
            self.check_landing(creature, hex, &[])?;
        }
        for &hex in hexes {
            self.occupancy.insert(hex, creature);
        }
        Ok(())
    }

    /// Removes `creature` from every hex it holds.
    pub fn vacate(&mut self, creature: CreatureId) {
        self.occupancy.retain(|_, occupant| *occupant != creature);
    }

    /// Moves several creatures at once.
    ///
    /// Hexes vacated by a creature in the batch may be reused by another one,
    /// but no two destinations may overlap and every destination must be free
    /// of creatures outside the batch.
    pub fn relocate(&mut self, moves: &[Relocation]) -> Result<(), InvariantViolation> {
        let moving: Vec<CreatureId> = moves.iter().map(|m| m.creature).collect();
        let mut claimed: BTreeMap<HexCoord, CreatureId> = BTreeMap::new();

        for relocation in moves {
            for &hex in &relocation.to {
                self.check_landing(relocation.creature, hex, &moving)?;
                if let Some(first) = claimed.insert(hex, relocation.creature)
                    && first != relocation.creature
                {
                    return Err(InvariantViolation::DestinationsOverlap {
                        first,
                        second: relocation.creature,
                        hex,
                    });
                }
            }
        }

        for relocation in moves {
            for hex in &relocation.from {
                if self.occupancy.get(hex) == Some(&relocation.creature) {
                    self.occupancy.remove(hex);
                }
            }
        }
        self.occupancy.extend(claimed);
        Ok(())
    }

    fn check_landing(
        &self,
        creature: CreatureId,
        hex: HexCoord,
        moving: &[CreatureId],
    ) -> Result<(), InvariantViolation> {
        if !self.is_passable(hex) {
            return Err(InvariantViolation::DestinationBlocked { creature, hex });
        }
        match self.occupant(hex) {
            Some(occupant) if occupant != creature && !moving.contains(&occupant) => {
                Err(InvariantViolation::DestinationOccupied {
                    creature,
                    hex,
                    occupant,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(GridDimensions::new(8, 4))
    }

    #[test]
    fn place_refuses_occupied_hex_without_partial_write() {
        let mut grid = grid();
        grid.place(CreatureId(1), &[HexCoord::new(2, 1)]).unwrap();

        let result = grid.place(CreatureId(2), &[HexCoord::new(3, 1), HexCoord::new(2, 1)]);

        assert!(matches!(
            result,
            Err(InvariantViolation::DestinationOccupied { occupant, .. }) if occupant == CreatureId(1)
        ));
        assert_eq!(grid.occupant(HexCoord::new(3, 1)), None);
    }

    #[test]
    fn obstacles_block_placement() {
        let mut grid = grid();
        grid.set_terrain(HexCoord::new(4, 0), Terrain::Obstacle);
        assert!(!grid.is_free(HexCoord::new(4, 0)));
        assert!(grid.place(CreatureId(1), &[HexCoord::new(4, 0)]).is_err());
        assert!(grid.place(CreatureId(1), &[HexCoord::new(9, 0)]).is_err());
    }

    #[test]
    fn relocate_allows_swapping_into_vacated_hexes() {
        let mut grid = grid();
        grid.place(CreatureId(1), &[HexCoord::new(1, 1)]).unwrap();
        grid.place(CreatureId(2), &[HexCoord::new(2, 1)]).unwrap();

        grid.relocate(&[
            Relocation {
                creature: CreatureId(1),
                from: vec![HexCoord::new(1, 1)],
                to: vec![HexCoord::new(2, 1)],
            },
            Relocation {
                creature: CreatureId(2),
                from: vec![HexCoord::new(2, 1)],
                to: vec![HexCoord::new(3, 1)],
            },
        ])
        .unwrap();

        assert_eq!(grid.occupant(HexCoord::new(1, 1)), None);
        assert_eq!(grid.occupant(HexCoord::new(2, 1)), Some(CreatureId(1)));
        assert_eq!(grid.occupant(HexCoord::new(3, 1)), Some(CreatureId(2)));
    }

    #[test]
    fn relocate_rejects_overlapping_destinations() {
        let mut grid = grid();
        grid.place(CreatureId(1), &[HexCoord::new(0, 0)]).unwrap();
        grid.place(CreatureId(2), &[HexCoord::new(4, 0)]).unwrap();
        let before = grid.clone();

        let result = grid.relocate(&[
            Relocation {
                creature: CreatureId(1),
                from: vec![HexCoord::new(0, 0)],
                to: vec![HexCoord::new(2, 0)],
            },
            Relocation {
                creature: CreatureId(2),
                from: vec![HexCoord::new(4, 0)],
                to: vec![HexCoord::new(2, 0)],
            },
        ]);

        assert!(matches!(
            result,
            Err(InvariantViolation::DestinationsOverlap { .. })
        ));
        assert_eq!(grid, before);
    }
}
