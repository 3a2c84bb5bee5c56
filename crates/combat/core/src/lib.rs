//! Deterministic turn-based combat rules.
//!
//! `combat-core` defines the combatant model, the static catalog, the turn
//! scheduler, the action resolver, the enemy AI, the loot generator and the
//! combat state machine. It performs no I/O: randomness comes in through the
//! [`RngOracle`] carried by [`CombatEnv`], and all state mutation flows
//! through [`CombatEngine`].
pub mod action;
pub mod ai;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod loot;
pub mod state;
pub mod stats;

pub use action::{
    ActionError, ActionOutcome, AttackRoll, EnemyAction, Impact, PlayerAction, Resolution,
};
pub use ai::{AiPolicy, SimplePolicy, SmartPolicy, effective_strategy};
pub use catalog::{
    AbilityCategory, AbilityCost, AbilityDef, AbilityId, AiStrategy, BarbarAbility,
    CharacterClass, EffectKind, Equipment, EquipmentSet, EquippedGear, Healing, MonsterAbility,
    MonsterType, PaladinAbility, PassiveKind, Rarity, Rewards, Slot, TargetType, Tier,
};
pub use config::CombatConfig;
pub use engine::{CombatEngine, compute_turn_order};
pub use env::{CombatEnv, PcgRng, RngOracle, compute_seed};
pub use error::{CombatError, ErrorSeverity};
pub use loot::{generate_drop, generate_drop_from};
pub use state::{
    AbilityStatus, Availability, CombatKind, CombatLog, CombatLogEntry, CombatOutcome,
    CombatPhase, CombatResult, CombatState, Combatant, CombatantRef, EnemyCombatant, Loadout,
    LoadoutError, LogKind, PlayerCombatant, PlayerProfile, SetupError, Side, TurnOrder, Vital,
};
pub use stats::{Attribute, AttributeScores, DerivedStats, StatBonuses};
