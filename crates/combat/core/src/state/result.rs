//! Final outcome of a combat.

use crate::catalog::{Equipment, Rewards};

/// How a combat ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Produced once when a combat ends; read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    outcome: CombatOutcome,
    rewards: Rewards,
    loot: Option<Equipment>,
    rounds_survived: u32,
}

impl CombatResult {
    pub(crate) fn won(rewards: Rewards, loot: Option<Equipment>, rounds_survived: u32) -> Self {
        Self {
            outcome: CombatOutcome::Victory,
            rewards,
            loot,
            rounds_survived,
        }
    }

    /// A lost combat grants nothing.
    pub(crate) fn lost(rounds_survived: u32) -> Self {
        Self {
            outcome: CombatOutcome::Defeat,
            rewards: Rewards::default(),
            loot: None,
            rounds_survived,
        }
    }

    pub fn outcome(&self) -> CombatOutcome {
        self.outcome
    }

    pub fn victory(&self) -> bool {
        self.outcome == CombatOutcome::Victory
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn experience(&self) -> u64 {
        self.rewards.experience
    }

    pub fn currency(&self) -> u64 {
        self.rewards.currency
    }

    pub fn essence(&self) -> u64 {
        self.rewards.essence
    }

    pub fn loot(&self) -> Option<&Equipment> {
        self.loot.as_ref()
    }

    pub fn rounds_survived(&self) -> u32 {
        self.rounds_survived
    }
}
