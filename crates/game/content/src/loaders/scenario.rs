//! Scenario loader.
//!
//! A scenario is a board (dimensions and obstacles) plus the creatures that
//! start on it. Loading produces a validated [`MatchState`].

use std::path::Path;

use arena_core::{
    AbilityKind, BaseStats, Creature, CreatureId, EngineConfig, Facing, GridDimensions, HexCoord,
    MatchState, Meter, Side, Terrain,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dimensions: Option<(u32, u32)>,
    #[serde(default)]
    obstacles: Vec<(i32, i32)>,
    creatures: Vec<CreatureRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreatureRon {
    id: u32,
    side: u8,
    #[serde(default = "default_size")]
    size: u8,
    anchor: (i32, i32),
    #[serde(default)]
    facing: Facing,
    health: i32,
    endurance: Meter,
    #[serde(default)]
    stats: BaseStats,
    #[serde(default = "default_moveable")]
    moveable: bool,
    /// Enters play this round with materialization sickness.
    #[serde(default)]
    summoned: bool,
    #[serde(default)]
    abilities: Vec<AbilityRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilityRon {
    kind: AbilityKind,
    #[serde(default)]
    upgraded: bool,
}

fn default_size() -> u8 {
    1
}

fn default_moveable() -> bool {
    true
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    ///
    /// `config` supplies the board size when the scenario omits it.
    pub fn load(path: &Path, config: &EngineConfig) -> LoadResult<MatchState> {
        let content = read_file(path)?;
        Self::parse(&content, config)
            .map_err(|e| anyhow::anyhow!("Scenario {}: {}", path.display(), e))
    }

    /// The bundled two-side skirmish.
    pub fn skirmish(config: &EngineConfig) -> LoadResult<MatchState> {
        Self::parse(include_str!("../../data/scenarios/skirmish.ron"), config)
    }

    pub fn parse(content: &str, config: &EngineConfig) -> LoadResult<MatchState> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let (width, height) = data
            .dimensions
            .unwrap_or((config.grid_width, config.grid_height));
        let mut state = MatchState::new(GridDimensions::new(width, height));

        for (x, y) in data.obstacles {
            let hex = HexCoord::new(x, y);
            if !state.grid.contains(hex) {
                anyhow::bail!("obstacle ({x}, {y}) lies outside the {width}x{height} board");
            }
            state.grid.set_terrain(hex, Terrain::Obstacle);
        }

        let round = state.turn.round;
        for spec in data.creatures {
            if spec.abilities.len() > EngineConfig::MAX_ABILITIES {
                anyhow::bail!(
                    "creature {} lists {} abilities (at most {})",
                    spec.id,
                    spec.abilities.len(),
                    EngineConfig::MAX_ABILITIES
                );
            }

            let (x, y) = spec.anchor;
            let mut creature = Creature::new(
                CreatureId(spec.id),
                Side(spec.side),
                spec.size,
                HexCoord::new(x, y),
            )
            .with_facing(spec.facing)
            .with_health(spec.health)
            .with_endurance(spec.endurance)
            .with_stats(spec.stats)
            .with_moveable(spec.moveable);
            if spec.summoned {
                creature = creature.summoned(round);
            }
            for ability in spec.abilities {
                creature = creature.with_ability(ability.kind, ability.upgraded);
            }

            state
                .add_creature(creature)
                .map_err(|e| anyhow::anyhow!("Failed to place creature {}: {}", spec.id, e))?;
        }

        state
            .verify_consistency()
            .map_err(|e| anyhow::anyhow!("Scenario is inconsistent: {}", e))?;
        if let Some(name) = data.name {
            tracing::debug!(
                scenario = %name,
                creatures = state.creature_ids().len(),
                "scenario loaded"
            );
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skirmish_places_every_creature() {
        let state = ScenarioLoader::skirmish(&EngineConfig::default()).expect("skirmish loads");
        assert!(state.creature_ids().len() >= 4);
        assert!(state.verify_consistency().is_ok());
    }

    #[test]
    fn missing_dimensions_use_config() {
        let content = r#"(
            creatures: [
                (id: 1, side: 0, anchor: (1, 1), health: 5, endurance: (current: 2, maximum: 2)),
            ],
        )"#;
        let config = EngineConfig {
            grid_width: 4,
            grid_height: 3,
            ..EngineConfig::default()
        };
        let state = ScenarioLoader::parse(content, &config).expect("scenario parses");
        assert_eq!(state.grid.dimensions(), GridDimensions::new(4, 3));
        assert_eq!(state.grid.occupant(HexCoord::new(1, 1)), Some(CreatureId(1)));
    }

    #[test]
    fn overlapping_creatures_are_rejected() {
        let content = r#"(
            dimensions: Some((6, 3)),
            creatures: [
                (id: 1, side: 0, size: 2, anchor: (3, 1), health: 5, endurance: (current: 2, maximum: 2)),
                (id: 2, side: 1, anchor: (2, 1), health: 5, endurance: (current: 2, maximum: 2)),
            ],
        )"#;
        assert!(ScenarioLoader::parse(content, &EngineConfig::default()).is_err());
    }

    #[test]
    fn summoned_creatures_start_sick() {
        let content = r#"(
            dimensions: Some((6, 3)),
            creatures: [
                (id: 7, side: 0, anchor: (0, 0), health: 5, endurance: (current: 2, maximum: 2), summoned: true),
            ],
        )"#;
        let state = ScenarioLoader::parse(content, &EngineConfig::default()).expect("parses");
        let creature = state.creature(CreatureId(7)).expect("placed");
        assert!(creature.materialization_sickness);
        assert_eq!(creature.entered_round, 1);
    }
}
