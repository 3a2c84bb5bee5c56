//! Static game data: classes, abilities, passives, equipment, monsters.
//!
//! Everything here is pure data and pure functions keyed by enums. Lookups
//! are exhaustive matches, so a missing definition is a compile error rather
//! than a runtime gap.

pub mod ability;
pub mod class;
pub mod equipment;
pub mod monster;
pub mod passive;

pub use ability::{
    AbilityCategory, AbilityCost, AbilityDef, AbilityId, BarbarAbility, EffectKind, Healing,
    MonsterAbility, PaladinAbility, TargetType,
};
pub use class::CharacterClass;
pub use equipment::{Equipment, EquipmentSet, EquippedGear, Rarity, Slot, Tier, equipment_stats};
pub use monster::{AiStrategy, MonsterTemplate, MonsterType, Rewards};
pub use passive::PassiveKind;
