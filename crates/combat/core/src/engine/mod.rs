//! Combat state machine.
//!
//! [`CombatEngine`] is the only writer of [`CombatState`]. It borrows the
//! state for the duration of one request, so there is exactly one logical
//! writer at a time and every request either completes or is rejected.
//!
//! ```text
//! NotStarted --start()--> InProgress --end check--> Ended(Victory | Defeat)
//! ```
//!
//! After every resolved action the engine bumps the nonce, runs the end
//! check, and, if the combat continues, moves the turn pointer.

mod turns;

pub use turns::compute_turn_order;

use crate::action::resolve::{self, Plan};
use crate::action::{ActionError, ActionOutcome, PlayerAction};
use crate::ai;
use crate::env::{CombatEnv, context};
use crate::loot;
use crate::state::{
    CombatOutcome, CombatPhase, CombatResult, CombatState, CombatantRef, LogKind, SetupError,
    Side, Vital,
};

/// Drives one combat.
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState, env: CombatEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    /// Builds the turn order and enters round 1.
    pub fn start(&mut self) -> Result<(), SetupError> {
        if self.state.is_started() {
            return Err(SetupError::AlreadyStarted);
        }

        let order = compute_turn_order(self.state);
        self.state.turn_order = order;
        self.state.round = 1;
        self.state.turn_index = 0;
        self.state.phase = CombatPhase::InProgress;

        let enemies = self
            .state
            .enemies()
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| format!("{} (lvl {})", enemy.name(), enemy.level()))
            .collect::<Vec<_>>()
            .join(", ");
        self.state
            .push_log(LogKind::System, None, format!("Combat begins against {enemies}"), false);

        tracing::info!(
            kind = ?self.state.kind(),
            seed = self.state.seed(),
            combatants = self.state.turn_order.len(),
            first = ?self.state.current_actor(),
            "combat started"
        );
        Ok(())
    }

    /// Checks that the combat accepts an action from `side` and returns the
    /// acting combatant.
    fn acting(&self, side: Side) -> Result<CombatantRef, ActionError> {
        match self.state.phase() {
            CombatPhase::NotStarted => return Err(ActionError::CombatNotStarted),
            CombatPhase::Ended(_) => return Err(ActionError::CombatEnded),
            CombatPhase::InProgress => {}
        }
        let actor = self
            .state
            .current_actor()
            .unwrap_or_else(|| panic!("turn index {} outside turn order", self.state.turn_index));
        if actor.side != side {
            return Err(match side {
                Side::Player => ActionError::NotPlayersTurn,
                Side::Enemy => ActionError::NotEnemysTurn,
            });
        }
        Ok(actor)
    }

    /// Resolves the current player's action.
    ///
    /// Rejected requests return an error and leave the state unchanged.
    pub fn submit_player_action(
        &mut self,
        action: PlayerAction,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = self.acting(Side::Player)?;
        let plan = resolve::plan_player(self.state, actor.index, action)?;
        Ok(self.execute(actor, plan))
    }

    /// Lets the AI pick and resolve the current enemy's action.
    pub fn advance_enemy_turn(&mut self) -> Result<ActionOutcome, ActionError> {
        let actor = self.acting(Side::Enemy)?;
        let action = ai::decide(self.state, &self.env, actor.index);
        let plan = resolve::plan_enemy(self.state, actor.index, action)?;
        Ok(self.execute(actor, plan))
    }

    fn execute(&mut self, actor: CombatantRef, plan: Plan) -> ActionOutcome {
        let outcome = resolve::apply(self.state, &self.env, actor, plan);
        self.state.nonce += 1;

        if !self.check_end() {
            self.advance_turn();
        }
        outcome
    }

    /// Ends the combat if one side is wiped out. Returns true if ended.
    fn check_end(&mut self) -> bool {
        let outcome = if self.state.side_defeated(Side::Enemy) {
            CombatOutcome::Victory
        } else if self.state.side_defeated(Side::Player) {
            CombatOutcome::Defeat
        } else {
            return false;
        };

        assert!(self.state.result.is_none(), "combat result produced twice");

        let rounds = self.state.round;
        let result = match outcome {
            CombatOutcome::Victory => {
                let rewards = self.state.enemies().iter().map(|e| e.rewards()).sum();
                CombatResult::won(rewards, self.roll_loot(), rounds)
            }
            CombatOutcome::Defeat => CombatResult::lost(rounds),
        };

        let message = match result.loot() {
            Some(item) => format!(
                "{outcome}! {} XP, {} gold, {} essence; found {} {} {} (tier {})",
                result.experience(),
                result.currency(),
                result.essence(),
                item.rarity,
                item.set,
                item.slot,
                item.tier.get()
            ),
            None if result.victory() => format!(
                "{outcome}! {} XP, {} gold, {} essence",
                result.experience(),
                result.currency(),
                result.essence()
            ),
            None => format!("{outcome} after {rounds} round(s)"),
        };
        self.state.push_log(LogKind::System, None, message, true);

        tracing::info!(
            %outcome,
            rounds,
            experience = result.experience(),
            currency = result.currency(),
            essence = result.essence(),
            loot = ?result.loot(),
            "combat ended"
        );

        self.state.phase = CombatPhase::Ended(outcome);
        self.state.result = Some(result);
        true
    }

    /// Loot from the highest-level enemy for the first player's class.
    fn roll_loot(&self) -> Option<crate::catalog::Equipment> {
        let (index, enemy) = self
            .state
            .enemies()
            .iter()
            .enumerate()
            .max_by_key(|(index, enemy)| (enemy.level(), core::cmp::Reverse(*index)))?;
        let class = self.state.players().first()?.class();
        let seed = self
            .state
            .roll_seed(CombatantRef::enemy(index), context::LOOT_DROP);

        loot::generate_drop(self.env.rng(), self.env.config(), seed, enemy.level(), class)
    }

    pub fn result(&self) -> Option<&CombatResult> {
        self.state.result()
    }
}
