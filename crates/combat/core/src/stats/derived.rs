//! Derived combat values.
//!
//! Pure functions of class, level, attribute scores, and equipment bonuses.
//! Computed once when a player combatant is built; never stored by the
//! progression layer.

use crate::catalog::CharacterClass;

use super::attributes::{AttributeScores, modifier};
use super::bonus::StatBonuses;

/// Derived combat statistics for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    /// Target number for attack rolls against this character.
    pub armor_class: i32,

    /// Added to the passive initiative score of 10.
    pub initiative_bonus: i32,

    /// `2 + (level - 1) / 4`
    pub proficiency_bonus: i32,

    /// Added to the d20 on basic attacks.
    pub attack_bonus: i32,

    /// Damage of a basic attack.
    pub basic_damage: u32,

    pub max_hp: u32,
    pub max_mana: u32,
}

impl DerivedStats {
    /// Compute derived stats.
    ///
    /// Formulas:
    /// - AC: `10 + DEX mod + equipment AC`
    /// - Initiative bonus: `DEX mod + equipment initiative`
    /// - Attack bonus: `proficiency + STR mod + equipment attack`
    /// - Basic damage: `4 + STR mod + level / 2 + equipment damage` (min 1)
    /// - Max HP: `hit die + CON mod + (level - 1) × (hit die / 2 + 1 + CON mod)`
    ///   + equipment (min 1)
    /// - Max mana: `10 + 5 × level + 5 × casting mod` + equipment (min 0)
    pub fn compute(
        class: CharacterClass,
        level: u32,
        base: &AttributeScores,
        bonuses: &StatBonuses,
    ) -> Self {
        let scores = bonuses.apply_to(base);
        let level = level.max(1) as i32;

        let str_mod = modifier(scores.str);
        let dex_mod = modifier(scores.dex);
        let con_mod = modifier(scores.con);
        let cast_mod = scores.modifier(class.casting_attribute());

        let proficiency_bonus = proficiency_bonus(level as u32);
        let hit_die = class.hit_die();

        let max_hp = hit_die + con_mod + (level - 1) * (hit_die / 2 + 1 + con_mod) + bonuses.max_hp;
        let max_mana = 10 + 5 * level + 5 * cast_mod + bonuses.max_mana;
        let basic_damage = 4 + str_mod + level / 2 + bonuses.damage;

        Self {
            armor_class: 10 + dex_mod + bonuses.armor_class,
            initiative_bonus: dex_mod + bonuses.initiative,
            proficiency_bonus,
            attack_bonus: proficiency_bonus + str_mod + bonuses.attack,
            basic_damage: basic_damage.max(1) as u32,
            max_hp: max_hp.max(1) as u32,
            max_mana: max_mana.max(0) as u32,
        }
    }

    /// Initiative value used for turn order: `10 + initiative bonus`.
    pub const fn initiative(&self) -> i32 {
        10 + self.initiative_bonus
    }
}

/// `2 + (level - 1) / 4`
pub const fn proficiency_bonus(level: u32) -> i32 {
    2 + (level.saturating_sub(1) / 4) as i32
}
