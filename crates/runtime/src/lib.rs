//! Runtime orchestration for combat sessions.
//!
//! This crate wires the deterministic combat engine to its surroundings: the
//! Character/Progression Service that supplies the player and receives the
//! rewards, the content that defines encounters, and the snapshots a
//! presentation layer renders.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session orchestrator and builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`progression`] defines the progression contract and an in-memory impl
//! - [`snapshot`] builds serializable presentation views
pub mod api;
pub mod progression;
pub mod session;
pub mod snapshot;

pub use api::{Result, RuntimeError};
pub use progression::{InMemoryProgression, ProgressionService};
pub use session::{CombatSession, SessionBuilder};
pub use snapshot::{CombatSnapshot, CombatantView};
