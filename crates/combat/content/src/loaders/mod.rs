//! Loaders that read combat content from RON/TOML files.

pub mod auftrag;
pub mod config;
pub mod factory;
pub mod story;

pub use auftrag::AuftragLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use story::StoryLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
