//! Monster templates.
//!
//! Templates are static per monster type; [`MonsterTemplate::rewards`] and the
//! HP/damage scaling turn a template plus a level into concrete numbers.

use super::ability::MonsterAbility;

/// Decision strategy an enemy uses on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiStrategy {
    /// Random living target, basic attacks only.
    Simple,
    /// Weakest target, best available ability.
    Smart,
}

/// Monster types available to encounters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterType {
    Goblin,
    Wolf,
    Skeleton,
    Bandit,
    Orc,
    Cultist,
    Troll,
    Dragon,
}

/// Experience, currency and essence granted for defeating an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub experience: u64,
    pub currency: u64,
    pub essence: u64,
}

impl core::ops::AddAssign for Rewards {
    fn add_assign(&mut self, rhs: Rewards) {
        self.experience += rhs.experience;
        self.currency += rhs.currency;
        self.essence += rhs.essence;
    }
}

impl core::iter::Sum for Rewards {
    fn sum<I: Iterator<Item = Rewards>>(iter: I) -> Self {
        iter.fold(Rewards::default(), |mut acc, r| {
            acc += r;
            acc
        })
    }
}

/// Static monster template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub base_hp: u32,
    pub hp_per_level: u32,
    pub armor: u32,
    pub base_damage: u32,
    pub initiative: i32,
    pub strategy: AiStrategy,
    pub abilities: &'static [MonsterAbility],
    pub base_experience: u64,
    pub base_currency: u64,
    pub base_essence: u64,
}

impl MonsterTemplate {
    /// Maximum HP at a level: `base_hp + hp_per_level × (level − 1)`.
    pub const fn max_hp(&self, level: u32) -> u32 {
        self.base_hp + self.hp_per_level * level.saturating_sub(1)
    }

    /// Basic attack damage at a level: `base_damage + level / 2`.
    pub const fn damage(&self, level: u32) -> u32 {
        self.base_damage + level / 2
    }

    pub const fn rewards(&self, level: u32) -> Rewards {
        let level = level as u64;
        Rewards {
            experience: self.base_experience * level,
            currency: self.base_currency * level,
            essence: self.base_essence * (1 + level / 5),
        }
    }
}

impl MonsterType {
    pub const fn template(self) -> MonsterTemplate {
        use AiStrategy::{Simple, Smart};
        use MonsterAbility::*;

        match self {
            MonsterType::Goblin => MonsterTemplate {
                name: "Goblin",
                base_hp: 14,
                hp_per_level: 4,
                armor: 11,
                base_damage: 4,
                initiative: 14,
                strategy: Simple,
                abilities: &[Backstab],
                base_experience: 10,
                base_currency: 5,
                base_essence: 1,
            },
            MonsterType::Wolf => MonsterTemplate {
                name: "Wolf",
                base_hp: 16,
                hp_per_level: 5,
                armor: 12,
                base_damage: 5,
                initiative: 15,
                strategy: Simple,
                abilities: &[Bite, Howl],
                base_experience: 12,
                base_currency: 3,
                base_essence: 1,
            },
            MonsterType::Skeleton => MonsterTemplate {
                name: "Skeleton",
                base_hp: 20,
                hp_per_level: 5,
                armor: 13,
                base_damage: 5,
                initiative: 10,
                strategy: Simple,
                abilities: &[BoneShield],
                base_experience: 14,
                base_currency: 6,
                base_essence: 2,
            },
            MonsterType::Bandit => MonsterTemplate {
                name: "Bandit",
                base_hp: 18,
                hp_per_level: 5,
                armor: 12,
                base_damage: 6,
                initiative: 13,
                strategy: Smart,
                abilities: &[Backstab],
                base_experience: 15,
                base_currency: 12,
                base_essence: 1,
            },
            MonsterType::Orc => MonsterTemplate {
                name: "Orc",
                base_hp: 28,
                hp_per_level: 7,
                armor: 13,
                base_damage: 7,
                initiative: 9,
                strategy: Simple,
                abilities: &[Cleave],
                base_experience: 20,
                base_currency: 10,
                base_essence: 2,
            },
            MonsterType::Cultist => MonsterTemplate {
                name: "Cultist",
                base_hp: 18,
                hp_per_level: 4,
                armor: 11,
                base_damage: 4,
                initiative: 11,
                strategy: Smart,
                abilities: &[Curse, DarkMend, Fireball],
                base_experience: 22,
                base_currency: 14,
                base_essence: 4,
            },
            MonsterType::Troll => MonsterTemplate {
                name: "Troll",
                base_hp: 45,
                hp_per_level: 10,
                armor: 14,
                base_damage: 9,
                initiative: 7,
                strategy: Simple,
                abilities: &[Regenerate, Cleave],
                base_experience: 35,
                base_currency: 20,
                base_essence: 5,
            },
            MonsterType::Dragon => MonsterTemplate {
                name: "Dragon",
                base_hp: 80,
                hp_per_level: 15,
                armor: 17,
                base_damage: 12,
                initiative: 12,
                strategy: Smart,
                abilities: &[DragonBreath, Bite],
                base_experience: 80,
                base_currency: 60,
                base_essence: 15,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use strum::IntoEnumIterator;

    #[test]
    fn scaling_by_level() {
        let orc = MonsterType::Orc.template();
        assert_eq!(orc.max_hp(1), 28);
        assert_eq!(orc.max_hp(3), 42);
        assert_eq!(orc.damage(1), 7);
        assert_eq!(orc.damage(4), 9);
    }

    #[test]
    fn rewards_scale_by_level() {
        let goblin = MonsterType::Goblin.template();
        assert_eq!(
            goblin.rewards(5),
            Rewards {
                experience: 50,
                currency: 25,
                essence: 2,
            }
        );
    }

    #[test]
    fn templates_fit_enemy_ability_capacity() {
        for monster in MonsterType::iter() {
            assert!(monster.template().abilities.len() <= CombatConfig::MAX_ENEMY_ABILITIES);
        }
    }

    #[test]
    fn rewards_sum() {
        let total: Rewards = [
            MonsterType::Goblin.template().rewards(1),
            MonsterType::Wolf.template().rewards(1),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.experience, 22);
        assert_eq!(total.currency, 8);
        assert_eq!(total.essence, 2);
    }
}
