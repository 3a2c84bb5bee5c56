//! Additive stat bonuses.
//!
//! Equipment contributes flat bonuses only. Bonuses from several pieces are
//! summed field by field and applied once when derived stats are computed.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use super::attributes::{Attribute, AttributeScores};

/// Flat bonuses applied on top of a character's base stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBonuses {
    /// Added to attribute scores before modifiers are taken.
    pub attributes: AttributeScores,
    pub armor_class: i32,
    pub attack: i32,
    pub damage: i32,
    pub max_hp: i32,
    pub max_mana: i32,
    pub initiative: i32,
}

impl StatBonuses {
    /// No bonuses at all.
    pub const NONE: StatBonuses = StatBonuses {
        attributes: AttributeScores::new(0, 0, 0, 0, 0, 0),
        armor_class: 0,
        attack: 0,
        damage: 0,
        max_hp: 0,
        max_mana: 0,
        initiative: 0,
    };

    pub fn with_attribute(mut self, attribute: Attribute, value: i32) -> Self {
        *self.attributes.get_mut(attribute) += value;
        self
    }

    /// Applies the attribute part of these bonuses to base scores.
    pub fn apply_to(&self, base: &AttributeScores) -> AttributeScores {
        AttributeScores::new(
            base.str + self.attributes.str,
            base.dex + self.attributes.dex,
            base.con + self.attributes.con,
            base.int + self.attributes.int,
            base.wis + self.attributes.wis,
            base.cha + self.attributes.cha,
        )
    }
}

impl Default for StatBonuses {
    fn default() -> Self {
        Self::NONE
    }
}

impl Add for StatBonuses {
    type Output = StatBonuses;

    fn add(mut self, rhs: StatBonuses) -> StatBonuses {
        self += rhs;
        self
    }
}

impl AddAssign for StatBonuses {
    fn add_assign(&mut self, rhs: StatBonuses) {
        self.attributes = rhs.apply_to(&self.attributes);
        self.armor_class += rhs.armor_class;
        self.attack += rhs.attack;
        self.damage += rhs.damage;
        self.max_hp += rhs.max_hp;
        self.max_mana += rhs.max_mana;
        self.initiative += rhs.initiative;
    }
}

impl Sum for StatBonuses {
    fn sum<I: Iterator<Item = StatBonuses>>(iter: I) -> Self {
        iter.fold(StatBonuses::NONE, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_sum_field_by_field() {
        let a = StatBonuses {
            armor_class: 2,
            damage: 3,
            ..StatBonuses::NONE
        }
        .with_attribute(Attribute::Strength, 1);
        let b = StatBonuses {
            armor_class: 1,
            max_hp: 10,
            ..StatBonuses::NONE
        }
        .with_attribute(Attribute::Strength, 2);

        let total: StatBonuses = [a, b].into_iter().sum();
        assert_eq!(total.armor_class, 3);
        assert_eq!(total.damage, 3);
        assert_eq!(total.max_hp, 10);
        assert_eq!(total.attributes.str, 3);
        assert_eq!(total.attributes.dex, 0);
    }

    #[test]
    fn default_is_none() {
        assert_eq!(StatBonuses::default(), StatBonuses::NONE);
    }
}
