/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Percent chance (0-100) that a won encounter drops equipment.
    pub drop_chance_percent: u32,

    /// Every N-th Auftrag encounter forces the Smart strategy on all enemies.
    /// Zero disables escalation.
    pub smart_escalation_interval: u32,

    /// Smart enemies consider healing below this HP percentage.
    pub smart_heal_threshold_percent: u32,

    /// Natural d20 roll that counts as a critical hit.
    pub critical_roll: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of normal ability slots on a loadout.
    pub const MAX_NORMAL_SLOTS: usize = 5;
    /// Maximum number of simultaneous effects on one combatant.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;
    /// Maximum number of abilities on one enemy.
    pub const MAX_ENEMY_ABILITIES: usize = 4;
    /// Maximum number of passive pools on a loadout.
    pub const MAX_PASSIVES: usize = 4;

    // ===== rule constants =====
    /// Highest character and monster level.
    pub const MAX_LEVEL: u32 = 100;
    /// Character level that unlocks the ultimate slot.
    pub const ULTIMATE_UNLOCK_LEVEL: u32 = 10;
    /// Base healing at or above this value heals to full and is not scaled.
    pub const FULL_HEAL_SENTINEL: u32 = 999;
    /// Highest equipment tier.
    pub const MAX_TIER: u32 = 10;
    /// Number of log entries exposed in presentation snapshots.
    pub const LOG_TAIL: usize = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DROP_CHANCE_PERCENT: u32 = 30;
    pub const DEFAULT_SMART_ESCALATION_INTERVAL: u32 = 10;
    pub const DEFAULT_SMART_HEAL_THRESHOLD_PERCENT: u32 = 50;
    pub const DEFAULT_CRITICAL_ROLL: u32 = 20;

    pub fn new() -> Self {
        Self {
            drop_chance_percent: Self::DEFAULT_DROP_CHANCE_PERCENT,
            smart_escalation_interval: Self::DEFAULT_SMART_ESCALATION_INTERVAL,
            smart_heal_threshold_percent: Self::DEFAULT_SMART_HEAL_THRESHOLD_PERCENT,
            critical_roll: Self::DEFAULT_CRITICAL_ROLL,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
