//! Playable character classes.

use crate::stats::Attribute;

use super::ability::{AbilityId, BarbarAbility, PaladinAbility};
use super::equipment::EquipmentSet;
use super::passive::PassiveKind;

/// Playable class. Determines hit die, casting attribute, which abilities
/// can be equipped, which passives are granted, and which equipment sets drop.
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
pub enum CharacterClass {
    Paladin,
    Barbar,
}

impl CharacterClass {
    /// Hit die size used for maximum HP.
    pub const fn hit_die(self) -> i32 {
        match self {
            CharacterClass::Paladin => 10,
            CharacterClass::Barbar => 12,
        }
    }

    /// Attribute whose modifier scales the mana pool.
    pub const fn casting_attribute(self) -> Attribute {
        match self {
            CharacterClass::Paladin => Attribute::Charisma,
            CharacterClass::Barbar => Attribute::Wisdom,
        }
    }

    /// Every ability this class can learn, normal and ultimate.
    pub fn abilities(self) -> &'static [AbilityId] {
        const PALADIN: &[AbilityId] = &[
            AbilityId::Paladin(PaladinAbility::DivineSmite),
            AbilityId::Paladin(PaladinAbility::HealingWord),
            AbilityId::Paladin(PaladinAbility::ShieldOfFaith),
            AbilityId::Paladin(PaladinAbility::Consecration),
            AbilityId::Paladin(PaladinAbility::SacredVow),
            AbilityId::Paladin(PaladinAbility::Judgement),
            AbilityId::Paladin(PaladinAbility::AvengingWrath),
        ];
        const BARBAR: &[AbilityId] = &[
            AbilityId::Barbar(BarbarAbility::RecklessStrike),
            AbilityId::Barbar(BarbarAbility::Rage),
            AbilityId::Barbar(BarbarAbility::Whirlwind),
            AbilityId::Barbar(BarbarAbility::WarCry),
            AbilityId::Barbar(BarbarAbility::Bloodthirst),
            AbilityId::Barbar(BarbarAbility::Intimidate),
            AbilityId::Barbar(BarbarAbility::Berserk),
        ];
        match self {
            CharacterClass::Paladin => PALADIN,
            CharacterClass::Barbar => BARBAR,
        }
    }

    /// Passives granted by the class.
    pub fn passives(self) -> &'static [PassiveKind] {
        match self {
            CharacterClass::Paladin => &[PassiveKind::LayOnHands, PassiveKind::CleansingTouch],
            CharacterClass::Barbar => &[PassiveKind::SecondWind],
        }
    }

    /// Equipment sets that can drop for this class.
    pub fn equipment_sets(self) -> &'static [EquipmentSet] {
        match self {
            CharacterClass::Paladin => &[EquipmentSet::Lichtbringer, EquipmentSet::Bollwerk],
            CharacterClass::Barbar => &[EquipmentSet::Blutrausch, EquipmentSet::Sturmfell],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn class_abilities_belong_to_class() {
        for class in CharacterClass::iter() {
            for ability in class.abilities() {
                assert_eq!(ability.class(), Some(class), "{ability:?}");
            }
        }
    }

    #[test]
    fn class_sets_belong_to_class() {
        for class in CharacterClass::iter() {
            assert!(!class.equipment_sets().is_empty());
            for set in class.equipment_sets() {
                assert_eq!(set.class(), class);
            }
        }
    }

    #[test]
    fn parses_from_name() {
        assert_eq!("Barbar".parse::<CharacterClass>(), Ok(CharacterClass::Barbar));
        assert!("Wizard".parse::<CharacterClass>().is_err());
    }
}
