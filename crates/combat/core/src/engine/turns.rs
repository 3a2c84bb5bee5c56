use crate::state::{CombatState, CombatantRef, Side, TurnOrder, Vital};

use super::CombatEngine;

/// Sorts living combatants by descending initiative.
///
/// Ties keep insertion order: players in roster order, then enemies in
/// roster order. No randomness is involved.
pub fn compute_turn_order(state: &CombatState) -> TurnOrder {
    let mut entries: Vec<(i32, CombatantRef)> = state
        .living(Side::Player)
        .chain(state.living(Side::Enemy))
        .filter_map(|r| state.combatant(r).map(|c| (c.initiative(), r)))
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.0.cmp(&a.0));

    TurnOrder::new(entries.into_iter().map(|(_, r)| r).collect())
}

/// Turn pointer movement for CombatEngine.
impl CombatEngine<'_> {
    /// Moves the pointer to the next living combatant, wrapping into a new
    /// round at the end of the order.
    ///
    /// # Panics
    ///
    /// Panics if no combatant in the order is alive; the end check must run
    /// first.
    pub(super) fn advance_turn(&mut self) {
        let len = self.state.turn_order.len();
        assert!(len > 0, "advancing an empty turn order");

        for _ in 0..len {
            self.state.turn_index += 1;
            if self.state.turn_index >= len {
                self.state.turn_index = 0;
                self.end_round();
            }
            if let Some(next) = self.state.turn_order.get(self.state.turn_index) {
                if self.state.is_alive(next) {
                    return;
                }
            }
        }

        panic!("turn order has no living combatant left");
    }

    /// Round rollover: cooldowns and effects tick down, the round advances.
    fn end_round(&mut self) {
        self.state.cooldowns.tick();
        for enemy in self.state.enemies.iter_mut() {
            enemy.tick_cooldowns();
            enemy.effects.tick();
        }
        for player in self.state.players.iter_mut() {
            player.effects.tick();
        }
        self.state.round += 1;
        tracing::debug!(round = self.state.round, "round started");
    }
}
