//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejections from the combat engine and setup failures so clients
//! can bubble them up with consistent context.
use thiserror::Error;

use combat_core::{ActionError, CombatError, ErrorSeverity, LoadoutError, SetupError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("invalid loadout")]
    Loadout(#[from] LoadoutError),

    #[error("invalid encounter data")]
    Encounter(#[from] combat_content::EncounterError),

    #[error("combat has not ended yet")]
    CombatInProgress,

    #[error("combat rewards were already committed")]
    AlreadyCommitted,

    #[error("progression service rejected the rewards: {0}")]
    Progression(String),

    #[error("failed to encode snapshot")]
    Snapshot(#[source] serde_json::Error),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Action(err) => err.severity(),
            RuntimeError::Setup(err) => err.severity(),
            RuntimeError::Loadout(err) => err.severity(),
            RuntimeError::Encounter(err) => err.severity(),
            RuntimeError::CombatInProgress => ErrorSeverity::Recoverable,
            RuntimeError::AlreadyCommitted => ErrorSeverity::Validation,
            RuntimeError::Progression(_) | RuntimeError::Snapshot(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Action(err) => err.error_code(),
            RuntimeError::Setup(err) => err.error_code(),
            RuntimeError::Loadout(err) => err.error_code(),
            RuntimeError::Encounter(err) => err.error_code(),
            RuntimeError::CombatInProgress => "RUNTIME_COMBAT_IN_PROGRESS",
            RuntimeError::AlreadyCommitted => "RUNTIME_ALREADY_COMMITTED",
            RuntimeError::Progression(_) => "RUNTIME_PROGRESSION",
            RuntimeError::Snapshot(_) => "RUNTIME_SNAPSHOT",
        }
    }
}
