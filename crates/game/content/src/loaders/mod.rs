//! Content loaders for reading match data from files.
//!
//! Ability definitions and scenarios are RON; engine configuration and the
//! message table are TOML. Every loader returns core types directly.

pub mod abilities;
pub mod config;
pub mod factory;
pub mod messages;
pub mod scenario;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use messages::MessageLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
