//! Content factory for loading combat data from a directory.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::encounter::{AuftragTable, StoryStage};
use crate::loaders::{AuftragLoader, ConfigLoader, LoadResult, StoryLoader};

/// Loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── story.ron
/// └── auftrag.toml
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config.toml not found, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load story stages from `story.ron`.
    pub fn load_story(&self) -> LoadResult<Vec<StoryStage>> {
        StoryLoader::load(&self.data_dir.join("story.ron"))
    }

    /// Load one story stage by id.
    pub fn load_stage(&self, id: u32) -> LoadResult<StoryStage> {
        self.load_story()?
            .into_iter()
            .find(|stage| stage.id == id)
            .ok_or_else(|| anyhow::anyhow!("Story stage {} not found", id))
    }

    /// Load the Auftrag table from `auftrag.toml`.
    pub fn load_auftrag_table(&self) -> LoadResult<AuftragTable> {
        AuftragLoader::load(&self.data_dir.join("auftrag.toml"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
