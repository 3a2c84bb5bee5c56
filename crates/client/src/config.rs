//! Simulator configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use combat_core::{CharacterClass, CombatConfig};

/// Settings for one simulator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Base seed. Each encounter offsets it by its index; random when unset.
    pub seed: Option<u64>,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    /// Number of Auftrag encounters to fight.
    pub encounters: u32,
    /// Story stage fought before the Auftrag run.
    pub stage: Option<u32>,
    /// Content directory; the bundled data is used when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            name: "Hero".to_owned(),
            class: CharacterClass::Paladin,
            level: 5,
            encounters: 3,
            stage: None,
            data_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Base seed (default: random)
    /// - `COMBAT_NAME` - Player name (default: Hero)
    /// - `COMBAT_CLASS` - `Paladin` or `Barbar` (default: Paladin)
    /// - `COMBAT_LEVEL` - Player level, clamped to 1..=100 (default: 5)
    /// - `COMBAT_ENCOUNTERS` - Auftrag encounters to run (default: 3)
    /// - `COMBAT_STAGE` - Story stage id to fight first (default: none)
    /// - `COMBAT_DATA_DIR` - Content directory (default: bundled data)
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Same as [`SimConfig::from_env`] with an arbitrary variable source.
    pub fn from_source(source: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_var::<u64>(&source, "COMBAT_SEED") {
            config.seed = Some(seed);
        }
        if let Some(name) = source("COMBAT_NAME").filter(|name| !name.trim().is_empty()) {
            config.name = name.trim().to_owned();
        }
        if let Some(class) = read_var::<CharacterClass>(&source, "COMBAT_CLASS") {
            config.class = class;
        }
        if let Some(level) = read_var::<u32>(&source, "COMBAT_LEVEL") {
            config.level = level.clamp(1, CombatConfig::MAX_LEVEL);
        }
        if let Some(encounters) = read_var::<u32>(&source, "COMBAT_ENCOUNTERS") {
            config.encounters = encounters;
        }
        config.stage = read_var::<u32>(&source, "COMBAT_STAGE");
        config.data_dir = read_var::<PathBuf>(&source, "COMBAT_DATA_DIR");

        config
    }

    /// Seed for the `index`-th combat of the run.
    pub fn encounter_seed(&self, index: u32) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(u64::from(index)))
    }
}

fn read_var<T>(source: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    source(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config(&[]), SimConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("COMBAT_SEED", "42"),
            ("COMBAT_NAME", " Brakka "),
            ("COMBAT_CLASS", "Barbar"),
            ("COMBAT_LEVEL", "0"),
            ("COMBAT_ENCOUNTERS", "10"),
            ("COMBAT_STAGE", "2"),
            ("COMBAT_DATA_DIR", "/tmp/content"),
        ]);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.name, "Brakka");
        assert_eq!(config.class, CharacterClass::Barbar);
        assert_eq!(config.level, 1);
        assert_eq!(config.encounters, 10);
        assert_eq!(config.stage, Some(2));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/content")));
        assert_eq!(config.encounter_seed(3), Some(45));
    }

    #[test]
    fn level_is_capped() {
        assert_eq!(config(&[("COMBAT_LEVEL", "900000000")]).level, CombatConfig::MAX_LEVEL);
    }

    #[test]
    fn unparsable_values_are_ignored() {
        let config = config(&[("COMBAT_CLASS", "Wizard"), ("COMBAT_LEVEL", "high")]);
        assert_eq!(config.class, CharacterClass::Paladin);
        assert_eq!(config.level, 5);
        assert_eq!(config.encounter_seed(0), None);
    }
}
