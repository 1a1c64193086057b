//! Ability definition loader.
//!
//! Loads [`AbilityDefinition`] tables from RON data files.

use std::path::Path;

use arena_core::AbilityDefinition;

use crate::loaders::{LoadResult, read_file};

/// Loader for ability definitions from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load a list of definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Definitions embedded at compile time from `data/abilities.ron`.
    pub fn builtin() -> LoadResult<Vec<AbilityDefinition>> {
        Self::parse(include_str!("../../data/abilities.ron"))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let definitions: Vec<AbilityDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities RON: {}", e))?;

        for definition in &definitions {
            let range = definition.range;
            if range.minimum > range.regular || range.regular > range.upgraded {
                anyhow::bail!(
                    "{}: range must satisfy minimum <= regular <= upgraded",
                    definition.kind
                );
            }
            if definition.triggers.is_empty() {
                anyhow::bail!("{}: at least one trigger is required", definition.kind);
            }
        }
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{AbilityKind, AbilityRange, Phase, TargetTeam};

    use super::*;

    #[test]
    fn builtin_grappling_hook_range() {
        let definitions = AbilityLoader::builtin().expect("embedded definitions parse");
        let hook = definitions
            .iter()
            .find(|definition| definition.kind == AbilityKind::GrapplingHook)
            .expect("grappling hook defined");
        assert_eq!(hook.range, AbilityRange::new(2, 5, 7));
        assert_eq!(hook.triggers, vec![Phase::Action]);
        assert_eq!(hook.team, TargetTeam::Both);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let content = r#"[
            (
                kind: GrapplingHook,
                name: "Broken",
                triggers: [Action],
                team: Enemy,
                range: (minimum: 4, regular: 2, upgraded: 3),
            ),
        ]"#;
        assert!(AbilityLoader::parse(content).is_err());
    }
}
