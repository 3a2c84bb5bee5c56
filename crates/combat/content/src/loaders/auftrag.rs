//! Auftrag encounter table loader.

use std::path::Path;

use crate::encounter::AuftragTable;
use crate::loaders::{LoadResult, read_file};

/// Loads the [`AuftragTable`] from TOML.
///
/// ```toml
/// pool = ["Goblin", "Wolf"]
/// min_enemies = 1
/// max_enemies = 3
/// level_spread = 2
/// ```
pub struct AuftragLoader;

impl AuftragLoader {
    pub fn load(path: &Path) -> LoadResult<AuftragTable> {
        let content = read_file(path)?;
        let table: AuftragTable = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse auftrag TOML at {:?}: {}", path, e))?;
        table.validate()?;
        Ok(table)
    }
}
