//! Authoritative match state.
//!
//! This module owns the board, the creature roster and turn bookkeeping.
//! Callers read it freely but mutate occupancy exclusively through
//! [`MatchState`] so grid and creature positions never drift apart.
mod creature;
mod effect;
mod error;
mod grid;
mod turn;

use std::collections::BTreeMap;

pub use creature::{AbilitySlots, BaseStats, Creature, CreatureId, Meter, Side, Stat};
pub use effect::{
    ActiveEffect, Effect, EffectAdd, EffectDuration, EffectInstanceId, EffectKind, EffectList,
};
pub use error::{InvariantViolation, StateError};
pub use grid::{Grid, GridDimensions, Relocation, Terrain};
pub use turn::TurnState;

use crate::config::EngineConfig;
use crate::hex::HexCoord;

/// A committed anchor change for one creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorChange {
    pub creature: CreatureId,
    pub from: HexCoord,
    pub to: HexCoord,
}

/// Canonical snapshot of one match session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub grid: Grid,
    creatures: BTreeMap<CreatureId, Creature>,
    pub turn: TurnState,
    next_effect_instance: u32,
}

impl MatchState {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self::with_grid(Grid::new(dimensions))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            creatures: BTreeMap::new(),
            turn: TurnState::new(),
            next_effect_instance: 1,
        }
    }

    /// Puts a creature on the board at its anchor.
    pub fn add_creature(&mut self, creature: Creature) -> Result<(), StateError> {
        if creature.size == 0 || creature.size as usize > EngineConfig::MAX_FOOTPRINT {
            return Err(StateError::InvalidSize {
                creature: creature.id,
                size: creature.size,
            });
        }
        if self.creatures.contains_key(&creature.id) {
            return Err(StateError::DuplicateCreature(creature.id));
        }

        self.grid.place(creature.id, &creature.footprint())?;
        self.creatures.insert(creature.id, creature);
        Ok(())
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn try_creature(&self, id: CreatureId) -> Result<&Creature, StateError> {
        self.creature(id).ok_or(StateError::UnknownCreature(id))
    }

    pub fn try_creature_mut(&mut self, id: CreatureId) -> Result<&mut Creature, StateError> {
        self.creatures
            .get_mut(&id)
            .ok_or(StateError::UnknownCreature(id))
    }

    /// All creatures in id order, dead ones included.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn creature_ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    /// Creature standing on `hex`, resolved through the grid.
    pub fn creature_at(&self, hex: HexCoord) -> Option<&Creature> {
        self.grid.occupant(hex).and_then(|id| self.creature(id))
    }

    /// Moves creatures to new anchors as one atomic step.
    ///
    /// Facing is preserved. Nothing changes when any destination is invalid.
    pub fn relocate(
        &mut self,
        moves: &[(CreatureId, HexCoord)],
    ) -> Result<Vec<AnchorChange>, StateError> {
        let mut relocations = Vec::with_capacity(moves.len());
        let mut changes = Vec::with_capacity(moves.len());
        for &(id, anchor) in moves {
            let creature = self.try_creature(id)?;
            relocations.push(Relocation {
                creature: id,
                from: creature.footprint().to_vec(),
                to: crate::hex::footprint(anchor, creature.size).to_vec(),
            });
            changes.push(AnchorChange {
                creature: id,
                from: creature.anchor,
                to: anchor,
            });
        }

        self.grid.relocate(&relocations)?;
        for change in &changes {
            if let Some(creature) = self.creatures.get_mut(&change.creature) {
                creature.anchor = change.to;
            }
        }
        Ok(changes)
    }

    /// Takes a creature off the board; it stays in the roster.
    pub fn remove_from_board(&mut self, id: CreatureId) {
        self.grid.vacate(id);
    }

    pub fn allocate_effect_instance(&mut self) -> EffectInstanceId {
        let id = EffectInstanceId(self.next_effect_instance);
        self.next_effect_instance += 1;
        id
    }

    /// Cross-checks grid occupancy against creature positions.
    pub fn verify_consistency(&self) -> Result<(), InvariantViolation> {
        for creature in self.creatures.values().filter(|c| c.is_alive()) {
            for hex in creature.footprint() {
                let grid = self.grid.occupant(hex);
                if grid != Some(creature.id) {
                    return Err(InvariantViolation::OccupancyDesync {
                        hex,
                        creature: creature.id,
                        grid,
                    });
                }
            }
        }
        for (&hex, &id) in self.grid.occupancy() {
            let standing = self
                .creature(id)
                .is_some_and(|creature| creature.is_alive() && creature.occupies(hex));
            if !standing {
                return Err(InvariantViolation::OccupancyDesync {
                    hex,
                    creature: id,
                    grid: Some(id),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> MatchState {
        let mut state = MatchState::new(GridDimensions::new(10, 5));
        state
            .add_creature(Creature::new(CreatureId(1), Side(0), 2, HexCoord::new(2, 2)))
            .unwrap();
        state
            .add_creature(Creature::new(CreatureId(2), Side(1), 1, HexCoord::new(6, 2)))
            .unwrap();
        state
    }

    #[test]
    fn creature_at_resolves_multi_hex_bodies() {
        let state = state();
        assert_eq!(state.creature_at(HexCoord::new(1, 2)).map(|c| c.id), Some(CreatureId(1)));
        assert_eq!(state.creature_at(HexCoord::new(3, 2)).map(|c| c.id), None);
        state.verify_consistency().unwrap();
    }

    #[test]
    fn overlapping_roster_entries_are_rejected() {
        let mut state = state();
        let result = state.add_creature(Creature::new(CreatureId(3), Side(1), 3, HexCoord::new(7, 2)));
        assert!(matches!(result, Err(StateError::Invariant(_))));
        assert!(state.creature(CreatureId(3)).is_none());
    }

    #[test]
    fn relocate_keeps_grid_and_anchor_in_sync() {
        let mut state = state();
        let changes = state.relocate(&[(CreatureId(1), HexCoord::new(4, 2))]).unwrap();

        assert_eq!(changes[0].from, HexCoord::new(2, 2));
        assert_eq!(state.creature(CreatureId(1)).unwrap().anchor, HexCoord::new(4, 2));
        assert_eq!(state.grid.occupant(HexCoord::new(1, 2)), None);
        assert_eq!(state.grid.occupant(HexCoord::new(3, 2)), Some(CreatureId(1)));
        state.verify_consistency().unwrap();
    }

    #[test]
    fn relocate_onto_another_creature_changes_nothing() {
        let mut state = state();
        let before = state.clone();
        let result = state.relocate(&[(CreatureId(1), HexCoord::new(6, 2))]);
        assert!(result.is_err());
        assert_eq!(state, before);
    }
}
