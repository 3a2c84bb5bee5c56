//! Contract with the Character/Progression Service.
//!
//! Combat reads the player's profile at setup and writes aggregate rewards
//! once, when a finished session is committed. Nothing is written while a
//! combat is running.

mod memory;

pub use memory::InMemoryProgression;

use combat_core::{CombatResult, PlayerProfile};

use crate::api::Result;

/// Character/Progression Service consumed by combat sessions.
pub trait ProgressionService {
    /// Current profile of the player character.
    fn player_profile(&self) -> PlayerProfile;

    /// Number of Auftrag encounters started so far.
    fn auftrag_counter(&self) -> u32;

    /// Registers a new Auftrag encounter and returns its counter value.
    fn next_auftrag(&mut self) -> u32;

    /// Adds the totals of a finished combat to the player's accumulators.
    fn commit_rewards(&mut self, result: &CombatResult) -> Result<()>;
}
