//! Story stage loader.

use std::path::Path;

use crate::encounter::{StoryStage, validate_stages};
use crate::loaders::{LoadResult, read_file};

/// Loads the scripted story stages.
///
/// File format: a RON list of stages.
///
/// ```ron
/// [
///     (id: 1, name: "Goblin Camp", tutorial: true, enemies: [(Goblin, 1)]),
///     (id: 2, name: "Wolf Den", enemies: [(Wolf, 2), (Wolf, 2)]),
/// ]
/// ```
pub struct StoryLoader;

impl StoryLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<StoryStage>> {
        let content = read_file(path)?;
        let stages: Vec<StoryStage> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse story RON at {:?}: {}", path, e))?;
        validate_stages(&stages)?;

        tracing::debug!(stages = stages.len(), path = %path.display(), "story loaded");
        Ok(stages)
    }
}
