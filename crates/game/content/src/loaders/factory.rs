//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use arena_core::{EngineConfig, MatchState};

use crate::abilities::AbilityCatalog;
use crate::loaders::{AbilityLoader, ConfigLoader, LoadResult, MessageLoader, ScenarioLoader};
use crate::messages::MessageTable;

/// Content factory that loads match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── messages.toml      (optional)
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The `data/` directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_catalog(&self) -> LoadResult<AbilityCatalog> {
        let definitions = AbilityLoader::load(&self.data_dir.join("abilities.ron"))?;
        Ok(AbilityCatalog::new(definitions))
    }

    /// Load `messages.toml`, or the English defaults when it is absent.
    pub fn load_messages(&self) -> LoadResult<MessageTable> {
        let path = self.data_dir.join("messages.toml");
        if path.exists() {
            MessageLoader::load(&path)
        } else {
            Ok(MessageTable::english())
        }
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str, config: &EngineConfig) -> LoadResult<MatchState> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", name));
        ScenarioLoader::load(&path, config)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_directory_loads() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().expect("config loads");
        let catalog = factory.load_catalog().expect("catalog loads");
        assert_eq!(catalog.len(), 4);
        factory
            .load_scenario("skirmish", &config)
            .expect("skirmish loads");
        assert!(!factory.load_messages().expect("messages load").is_empty());
    }
}
