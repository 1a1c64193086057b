//! Message table loader.

use std::collections::BTreeMap;
use std::path::Path;

use arena_core::MessageCode;

use crate::loaders::{LoadResult, read_file};
use crate::messages::MessageTable;

/// Loader for message overrides from TOML files.
///
/// Keys are message code names (`NotMoveable = "..."`); codes left out keep
/// their English default.
pub struct MessageLoader;

impl MessageLoader {
    pub fn load(path: &Path) -> LoadResult<MessageTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MessageTable> {
        let overrides: BTreeMap<MessageCode, String> = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse messages TOML: {}", e))?;
        Ok(MessageTable::english().merge(overrides.into()))
    }
}
