//! Data-driven combat content.
//!
//! - Story stages: scripted enemy lists (RON)
//! - Auftrag tables: monster pools for randomized encounters (TOML)
//! - Combat configuration (TOML)
//!
//! Encounter building is pure and always available; file loaders sit behind
//! the default `loaders` feature.

pub mod encounter;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use encounter::{
    AuftragTable, ELITE_LEVEL_BONUS, EncounterError, StoryStage, auftrag_combat, build_auftrag,
    validate_stages,
};

#[cfg(feature = "loaders")]
pub use loaders::{AuftragLoader, ConfigLoader, ContentFactory, LoadResult, StoryLoader};
