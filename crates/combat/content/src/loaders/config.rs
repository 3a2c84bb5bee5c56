//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatConfig`] from TOML files.
///
/// Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config TOML at {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)?;
        anyhow::ensure!(
            config.drop_chance_percent <= 100,
            "drop_chance_percent must be at most 100, got {}",
            config.drop_chance_percent
        );
        anyhow::ensure!(
            (1..=20).contains(&config.critical_roll),
            "critical_roll must be a d20 face, got {}",
            config.critical_roll
        );
        Ok(config)
    }
}
