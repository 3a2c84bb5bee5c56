//! Illegal-action errors.
//!
//! Every variant is a rejected no-op: the state is exactly as it was before
//! the request.

use crate::error::{CombatError, ErrorSeverity};

/// Reasons an action request is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("combat has not started")]
    CombatNotStarted,

    #[error("combat has ended")]
    CombatEnded,

    #[error("it is not a player's turn")]
    NotPlayersTurn,

    #[error("it is not an enemy's turn")]
    NotEnemysTurn,

    #[error("acting combatant is dead")]
    ActorDead,

    #[error("target not found")]
    TargetNotFound,

    #[error("target is dead")]
    TargetDead,

    #[error("invalid target for this action")]
    InvalidTarget,

    #[error("ability is not equipped")]
    AbilityNotEquipped,

    #[error("requires level {required}, actor is level {level}")]
    LevelTooLow { required: u32, level: u32 },

    #[error("on cooldown for {remaining} more round(s)")]
    OnCooldown { remaining: u32 },

    #[error("insufficient mana: requires {required}, has {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("passive pool is exhausted")]
    PassiveExhausted,

    #[error("target has nothing to cleanse")]
    NothingToCleanse,
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionError::NotPlayersTurn
            | ActionError::NotEnemysTurn
            | ActionError::OnCooldown { .. }
            | ActionError::InsufficientMana { .. }
            | ActionError::PassiveExhausted => ErrorSeverity::Recoverable,

            ActionError::CombatNotStarted
            | ActionError::CombatEnded
            | ActionError::ActorDead
            | ActionError::TargetNotFound
            | ActionError::TargetDead
            | ActionError::InvalidTarget
            | ActionError::AbilityNotEquipped
            | ActionError::LevelTooLow { .. }
            | ActionError::NothingToCleanse => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionError::CombatNotStarted => "ACTION_COMBAT_NOT_STARTED",
            ActionError::CombatEnded => "ACTION_COMBAT_ENDED",
            ActionError::NotPlayersTurn => "ACTION_NOT_PLAYERS_TURN",
            ActionError::NotEnemysTurn => "ACTION_NOT_ENEMYS_TURN",
            ActionError::ActorDead => "ACTION_ACTOR_DEAD",
            ActionError::TargetNotFound => "ACTION_TARGET_NOT_FOUND",
            ActionError::TargetDead => "ACTION_TARGET_DEAD",
            ActionError::InvalidTarget => "ACTION_INVALID_TARGET",
            ActionError::AbilityNotEquipped => "ACTION_ABILITY_NOT_EQUIPPED",
            ActionError::LevelTooLow { .. } => "ACTION_LEVEL_TOO_LOW",
            ActionError::OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            ActionError::InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            ActionError::PassiveExhausted => "ACTION_PASSIVE_EXHAUSTED",
            ActionError::NothingToCleanse => "ACTION_NOTHING_TO_CLEANSE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_conditions_are_recoverable() {
        assert!(ActionError::OnCooldown { remaining: 2 }.severity().is_recoverable());
        assert!(!ActionError::TargetDead.severity().is_recoverable());
        assert_eq!(ActionError::TargetDead.error_code(), "ACTION_TARGET_DEAD");
    }
}
