//! Ability catalog.
//!
//! Abilities are static records keyed by a class-tagged id. All scaling is a
//! pure function of the caster's level:
//!
//! ```text
//! damage(level)   = base_damage  + level × 2.5     (rounded down)
//! healing(level)  = base_healing + level × 2       (base ≥ 999 heals to full)
//! temp_hp(level)  = base_temp_hp + level × 2
//! duration(level) = base_duration + level / 5
//! ```
//!
//! A zero base means the ability has no such component. Effect magnitudes
//! (buff and debuff percentages) use per-ability formulas, see
//! [`AbilityId::effect`].
//!
//! Every lookup is an exhaustive `match`, so an ability without a definition
//! does not compile.

use crate::config::CombatConfig;

use super::class::CharacterClass;

/// Slot an ability occupies on a loadout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCategory {
    Normal,
    Ultimate,
}

/// How an ability is paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCost {
    /// Usable when the cooldown is 0; sets the cooldown to this many rounds.
    CooldownRounds(u32),
    /// Deducts this much mana; requires at least this much.
    ManaCost(u32),
}

/// Who an ability lands on, seen from the caster's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SingleEnemy,
    AllEnemies,
    OnSelf,
    Ally,
    AllAllies,
}

impl TargetType {
    /// True if the ability lands on the opposing side.
    pub const fn is_hostile(self) -> bool {
        matches!(self, TargetType::SingleEnemy | TargetType::AllEnemies)
    }

    /// True if the caller must name a specific target index.
    pub const fn needs_target(self) -> bool {
        matches!(self, TargetType::SingleEnemy | TargetType::Ally)
    }
}

/// A timed modifier applied to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Outgoing damage +N%.
    DamageBoost(u32),
    /// Armor class +N against attack rolls.
    ArmorBoost(u32),
    /// Outgoing damage -N%.
    Weakened(u32),
}

impl EffectKind {
    /// Effects that a cleanse removes.
    pub const fn is_harmful(self) -> bool {
        matches!(self, EffectKind::Weakened(_))
    }

    /// Two effects of the same variant replace each other.
    pub fn same_variant(self, other: EffectKind) -> bool {
        core::mem::discriminant(&self) == core::mem::discriminant(&other)
    }
}

/// Healing produced by an ability at a given level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Healing {
    None,
    Amount(u32),
    /// Restore the target to maximum HP.
    Full,
}

/// Static definition of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityDef {
    pub name: &'static str,
    pub category: AbilityCategory,
    pub cost: AbilityCost,
    pub level_requirement: u32,
    pub target: TargetType,
    pub base_damage: u32,
    pub base_healing: u32,
    pub base_duration: u32,
    pub base_temp_hp: u32,
}

impl AbilityDef {
    const fn normal(name: &'static str, cost: AbilityCost, level: u32, target: TargetType) -> Self {
        Self {
            name,
            category: AbilityCategory::Normal,
            cost,
            level_requirement: level,
            target,
            base_damage: 0,
            base_healing: 0,
            base_duration: 0,
            base_temp_hp: 0,
        }
    }

    const fn ultimate(self) -> Self {
        Self {
            category: AbilityCategory::Ultimate,
            ..self
        }
    }

    const fn damage(self, base: u32) -> Self {
        Self {
            base_damage: base,
            ..self
        }
    }

    const fn healing(self, base: u32) -> Self {
        Self {
            base_healing: base,
            ..self
        }
    }

    const fn duration(self, base: u32) -> Self {
        Self {
            base_duration: base,
            ..self
        }
    }

    const fn temp_hp(self, base: u32) -> Self {
        Self {
            base_temp_hp: base,
            ..self
        }
    }

    /// `base_damage + level × 2.5`, or 0 for abilities without damage.
    pub const fn scaled_damage(&self, level: u32) -> u32 {
        if self.base_damage == 0 {
            return 0;
        }
        self.base_damage.saturating_add(level.saturating_mul(5) / 2)
    }

    /// `base_healing + level × 2`; the full-heal sentinel is not scaled.
    pub const fn scaled_healing(&self, level: u32) -> Healing {
        if self.base_healing == 0 {
            Healing::None
        } else if self.base_healing >= CombatConfig::FULL_HEAL_SENTINEL {
            Healing::Full
        } else {
            Healing::Amount(self.base_healing.saturating_add(level.saturating_mul(2)))
        }
    }

    /// `base_duration + level / 5` rounds, or 0 for instant abilities.
    pub const fn scaled_duration(&self, level: u32) -> u32 {
        if self.base_duration == 0 {
            return 0;
        }
        self.base_duration + level / 5
    }

    pub const fn scaled_temp_hp(&self, level: u32) -> u32 {
        if self.base_temp_hp == 0 {
            return 0;
        }
        self.base_temp_hp.saturating_add(level.saturating_mul(2))
    }

    /// Rounds of cooldown, or 0 for mana abilities.
    pub const fn cooldown(&self) -> u32 {
        match self.cost {
            AbilityCost::CooldownRounds(rounds) => rounds,
            AbilityCost::ManaCost(_) => 0,
        }
    }

    /// True if the ability can restore HP.
    pub const fn heals(&self) -> bool {
        self.base_healing > 0
    }
}

/// Paladin abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaladinAbility {
    DivineSmite,
    HealingWord,
    ShieldOfFaith,
    Judgement,
    Consecration,
    SacredVow,
    AvengingWrath,
}

/// Barbar abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarbarAbility {
    RecklessStrike,
    Rage,
    Intimidate,
    Whirlwind,
    WarCry,
    Bloodthirst,
    Berserk,
}

/// Abilities carried by monsters. All are cooldown-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterAbility {
    Backstab,
    Bite,
    Howl,
    BoneShield,
    Cleave,
    Curse,
    DarkMend,
    Regenerate,
    Fireball,
    DragonBreath,
}

/// Class-tagged ability id.
///
/// The tag is resolved once when a loadout is built; the resolver works
/// with the flat [`AbilityDef`] afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityId {
    Paladin(PaladinAbility),
    Barbar(BarbarAbility),
    Monster(MonsterAbility),
}

impl AbilityId {
    /// Class that can equip this ability (`None` for monster abilities).
    pub const fn class(self) -> Option<CharacterClass> {
        match self {
            AbilityId::Paladin(_) => Some(CharacterClass::Paladin),
            AbilityId::Barbar(_) => Some(CharacterClass::Barbar),
            AbilityId::Monster(_) => None,
        }
    }

    pub const fn name(self) -> &'static str {
        self.definition().name
    }

    /// Static definition of this ability.
    pub const fn definition(self) -> AbilityDef {
        use AbilityCost::{CooldownRounds, ManaCost};
        use TargetType::*;

        match self {
            AbilityId::Paladin(ability) => match ability {
                PaladinAbility::DivineSmite => {
                    AbilityDef::normal("Divine Smite", CooldownRounds(2), 1, SingleEnemy).damage(12)
                }
                PaladinAbility::HealingWord => {
                    AbilityDef::normal("Healing Word", ManaCost(8), 1, Ally).healing(10)
                }
                PaladinAbility::ShieldOfFaith => {
                    AbilityDef::normal("Shield of Faith", CooldownRounds(4), 3, Ally)
                        .temp_hp(8)
                        .duration(2)
                }
                PaladinAbility::Judgement => {
                    AbilityDef::normal("Judgement", ManaCost(12), 4, SingleEnemy)
                        .damage(10)
                        .duration(1)
                }
                PaladinAbility::Consecration => {
                    AbilityDef::normal("Consecration", ManaCost(15), 5, AllEnemies).damage(8)
                }
                PaladinAbility::SacredVow => {
                    AbilityDef::normal("Sacred Vow", CooldownRounds(8), 8, OnSelf)
                        .healing(CombatConfig::FULL_HEAL_SENTINEL)
                }
                PaladinAbility::AvengingWrath => {
                    AbilityDef::normal("Avenging Wrath", CooldownRounds(10), 10, AllEnemies)
                        .ultimate()
                        .damage(30)
                        .duration(2)
                }
            },
            AbilityId::Barbar(ability) => match ability {
                BarbarAbility::RecklessStrike => {
                    AbilityDef::normal("Reckless Strike", CooldownRounds(1), 1, SingleEnemy)
                        .damage(14)
                }
                BarbarAbility::Rage => {
                    AbilityDef::normal("Rage", CooldownRounds(5), 1, OnSelf).duration(3)
                }
                BarbarAbility::Intimidate => {
                    AbilityDef::normal("Intimidate", ManaCost(8), 2, AllEnemies).duration(2)
                }
                BarbarAbility::Whirlwind => {
                    AbilityDef::normal("Whirlwind", CooldownRounds(3), 3, AllEnemies).damage(9)
                }
                BarbarAbility::WarCry => {
                    AbilityDef::normal("War Cry", ManaCost(10), 4, AllAllies).temp_hp(10)
                }
                BarbarAbility::Bloodthirst => {
                    AbilityDef::normal("Bloodthirst", CooldownRounds(3), 6, SingleEnemy)
                        .damage(16)
                        .healing(6)
                }
                BarbarAbility::Berserk => {
                    AbilityDef::normal("Berserk", CooldownRounds(10), 10, OnSelf)
                        .ultimate()
                        .temp_hp(20)
                        .duration(3)
                }
            },
            AbilityId::Monster(ability) => match ability {
                MonsterAbility::Backstab => {
                    AbilityDef::normal("Backstab", CooldownRounds(2), 0, SingleEnemy).damage(8)
                }
                MonsterAbility::Bite => {
                    AbilityDef::normal("Bite", CooldownRounds(2), 0, SingleEnemy).damage(6)
                }
                MonsterAbility::Howl => {
                    AbilityDef::normal("Howl", CooldownRounds(4), 0, AllAllies).duration(2)
                }
                MonsterAbility::BoneShield => {
                    AbilityDef::normal("Bone Shield", CooldownRounds(4), 0, OnSelf).temp_hp(8)
                }
                MonsterAbility::Cleave => {
                    AbilityDef::normal("Cleave", CooldownRounds(2), 0, SingleEnemy).damage(9)
                }
                MonsterAbility::Curse => {
                    AbilityDef::normal("Curse", CooldownRounds(3), 0, SingleEnemy)
                        .damage(4)
                        .duration(2)
                }
                MonsterAbility::DarkMend => {
                    AbilityDef::normal("Dark Mend", CooldownRounds(3), 0, Ally).healing(12)
                }
                MonsterAbility::Regenerate => {
                    AbilityDef::normal("Regenerate", CooldownRounds(3), 0, OnSelf).healing(15)
                }
                MonsterAbility::Fireball => {
                    AbilityDef::normal("Fireball", CooldownRounds(3), 0, AllEnemies).damage(10)
                }
                MonsterAbility::DragonBreath => {
                    AbilityDef::normal("Dragon Breath", CooldownRounds(4), 0, AllEnemies)
                        .damage(18)
                }
            },
        }
    }

    /// Timed effect applied to the ability's targets, scaled by level.
    pub const fn effect(self, level: u32) -> Option<EffectKind> {
        match self {
            AbilityId::Paladin(ability) => match ability {
                PaladinAbility::ShieldOfFaith => Some(EffectKind::ArmorBoost(2 + level / 5)),
                PaladinAbility::Judgement => Some(EffectKind::Weakened(15 + level)),
                PaladinAbility::AvengingWrath => Some(EffectKind::Weakened(25)),
                PaladinAbility::DivineSmite
                | PaladinAbility::HealingWord
                | PaladinAbility::Consecration
                | PaladinAbility::SacredVow => None,
            },
            AbilityId::Barbar(ability) => match ability {
                // +1% per level on top of the base rage
                BarbarAbility::Rage => Some(EffectKind::DamageBoost(25 + level)),
                BarbarAbility::Intimidate => Some(EffectKind::Weakened(15 + level / 2)),
                BarbarAbility::Berserk => Some(EffectKind::DamageBoost(50 + 2 * level)),
                BarbarAbility::RecklessStrike
                | BarbarAbility::Whirlwind
                | BarbarAbility::WarCry
                | BarbarAbility::Bloodthirst => None,
            },
            AbilityId::Monster(ability) => match ability {
                MonsterAbility::Howl => Some(EffectKind::DamageBoost(20)),
                MonsterAbility::Curse => Some(EffectKind::Weakened(20)),
                MonsterAbility::Backstab
                | MonsterAbility::Bite
                | MonsterAbility::BoneShield
                | MonsterAbility::Cleave
                | MonsterAbility::DarkMend
                | MonsterAbility::Regenerate
                | MonsterAbility::Fireball
                | MonsterAbility::DragonBreath => None,
            },
        }
    }
}
