//! Combat construction errors.

use crate::error::{CombatError, ErrorSeverity};

/// Errors raised while setting up or starting a combat.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("player party has no living combatants")]
    EmptyPlayerParty,

    #[error("enemy party has no living combatants")]
    EmptyEnemyParty,

    #[error("combat has already been started")]
    AlreadyStarted,
}

impl CombatError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SetupError::EmptyPlayerParty | SetupError::EmptyEnemyParty => ErrorSeverity::Validation,
            SetupError::AlreadyStarted => ErrorSeverity::Internal,
        }
    }
}
