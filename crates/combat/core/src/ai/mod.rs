//! Enemy decision making.
//!
//! Each enemy turn the engine asks the policy matching the enemy's
//! [`effective_strategy`] for an [`EnemyAction`]. Policies are pure functions
//! of the state and the injected RNG, so a seeded combat replays exactly.
//!
//! The engine never consults a policy once a party is wiped out; policies may
//! assume at least one living player.

mod simple;
mod smart;

pub use simple::SimplePolicy;
pub use smart::{Score, SmartPolicy};

use crate::action::EnemyAction;
use crate::catalog::AiStrategy;
use crate::config::CombatConfig;
use crate::env::CombatEnv;
use crate::state::{CombatKind, CombatState};

/// Chooses an action for one enemy.
pub trait AiPolicy {
    fn decide(&self, state: &CombatState, env: &CombatEnv<'_>, enemy: usize) -> EnemyAction;
}

/// True if the `counter`-th Auftrag encounter forces the smart strategy.
pub const fn escalates(counter: u32, interval: u32) -> bool {
    interval > 0 && counter > 0 && counter % interval == 0
}

/// Strategy an enemy actually uses in this combat.
///
/// Every `smart_escalation_interval`-th Auftrag encounter upgrades all
/// enemies to [`AiStrategy::Smart`]. Tutorial fights keep the defaults.
pub fn effective_strategy(state: &CombatState, config: &CombatConfig, enemy: usize) -> AiStrategy {
    let default = state
        .enemy(enemy)
        .map_or(AiStrategy::Simple, |enemy| enemy.strategy());

    if state.is_tutorial() {
        return default;
    }
    match state.kind() {
        CombatKind::Auftrag { counter } if escalates(counter, config.smart_escalation_interval) => {
            AiStrategy::Smart
        }
        CombatKind::Auftrag { .. } | CombatKind::Story { .. } => default,
    }
}

/// Runs the policy for the enemy's effective strategy.
pub fn decide(state: &CombatState, env: &CombatEnv<'_>, enemy: usize) -> EnemyAction {
    let strategy = effective_strategy(state, env.config(), enemy);
    let action = match strategy {
        AiStrategy::Simple => SimplePolicy.decide(state, env, enemy),
        AiStrategy::Smart => SmartPolicy.decide(state, env, enemy),
    };
    tracing::debug!(enemy, %strategy, ?action, "enemy decision");
    action
}
