//! In-memory progression service for tests and local runs.

use combat_core::{CombatResult, Equipment, PlayerProfile, Rewards};

use super::ProgressionService;
use crate::api::Result;

/// Keeps the profile, reward accumulators and inventory in memory.
#[derive(Clone, Debug)]
pub struct InMemoryProgression {
    profile: PlayerProfile,
    auftrag_counter: u32,
    totals: Rewards,
    inventory: Vec<Equipment>,
    victories: u32,
    defeats: u32,
}

impl InMemoryProgression {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            auftrag_counter: 0,
            totals: Rewards::default(),
            inventory: Vec::new(),
            victories: 0,
            defeats: 0,
        }
    }

    /// Starts the Auftrag counter at a given value.
    pub fn with_auftrag_counter(mut self, counter: u32) -> Self {
        self.auftrag_counter = counter;
        self
    }

    pub fn totals(&self) -> Rewards {
        self.totals
    }

    pub fn inventory(&self) -> &[Equipment] {
        &self.inventory
    }

    pub fn victories(&self) -> u32 {
        self.victories
    }

    pub fn defeats(&self) -> u32 {
        self.defeats
    }
}

impl ProgressionService for InMemoryProgression {
    fn player_profile(&self) -> PlayerProfile {
        self.profile.clone()
    }

    fn auftrag_counter(&self) -> u32 {
        self.auftrag_counter
    }

    fn next_auftrag(&mut self) -> u32 {
        self.auftrag_counter += 1;
        self.auftrag_counter
    }

    fn commit_rewards(&mut self, result: &CombatResult) -> Result<()> {
        self.totals += result.rewards();
        if let Some(item) = result.loot() {
            self.inventory.push(*item);
        }
        if result.victory() {
            self.victories += 1;
        } else {
            self.defeats += 1;
        }

        tracing::info!(
            outcome = %result.outcome(),
            experience = self.totals.experience,
            currency = self.totals.currency,
            essence = self.totals.essence,
            inventory = self.inventory.len(),
            "rewards committed"
        );
        Ok(())
    }
}
