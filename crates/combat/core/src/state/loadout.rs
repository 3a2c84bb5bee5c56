//! Equipped abilities and passive pools of a player.
//!
//! Class and level checks happen here, once, when the loadout is built. The
//! resolver only asks whether an ability is equipped.

use arrayvec::ArrayVec;

use crate::catalog::{AbilityCategory, AbilityId, CharacterClass, PassiveKind};
use crate::config::CombatConfig;
use crate::error::{CombatError, ErrorSeverity};

/// Number of normal ability slots at a character level.
pub const fn normal_slot_count(level: u32) -> usize {
    match level {
        0..=2 => 2,
        3..=5 => 3,
        6..=8 => 4,
        _ => CombatConfig::MAX_NORMAL_SLOTS,
    }
}

/// Errors raised while equipping abilities.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadoutError {
    #[error("{ability:?} cannot be equipped by a {class}")]
    WrongClass {
        ability: AbilityId,
        class: CharacterClass,
    },

    #[error("{ability:?} requires level {required}, character is level {level}")]
    LevelTooLow {
        ability: AbilityId,
        required: u32,
        level: u32,
    },

    #[error("all {capacity} normal slots are in use")]
    SlotsFull { capacity: usize },

    #[error("ultimate slot unlocks at level {required}")]
    UltimateLocked { required: u32 },

    #[error("{0:?} is not an ultimate ability")]
    NotAnUltimate(AbilityId),

    #[error("{0:?} is an ultimate and needs the ultimate slot")]
    UltimateInNormalSlot(AbilityId),

    #[error("{0:?} is already equipped")]
    Duplicate(AbilityId),
}

impl CombatError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Remaining charges (or HP, for Lay on Hands) of one passive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassivePool {
    pub kind: PassiveKind,
    pub remaining: u32,
}

/// A player's equipped abilities and passive pools.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    class: CharacterClass,
    level: u32,
    normal: ArrayVec<AbilityId, { CombatConfig::MAX_NORMAL_SLOTS }>,
    ultimate: Option<AbilityId>,
    passives: ArrayVec<PassivePool, { CombatConfig::MAX_PASSIVES }>,
}

impl Loadout {
    /// Empty loadout with full passive pools for the class.
    pub fn new(class: CharacterClass, level: u32) -> Self {
        let passives = class
            .passives()
            .iter()
            .map(|&kind| PassivePool {
                kind,
                remaining: kind.pool_size(level),
            })
            .collect();

        Self {
            class,
            level,
            normal: ArrayVec::new(),
            ultimate: None,
            passives,
        }
    }

    /// Builds a loadout from ability lists, validating every entry.
    pub fn build(
        class: CharacterClass,
        level: u32,
        normal: &[AbilityId],
        ultimate: Option<AbilityId>,
    ) -> Result<Self, LoadoutError> {
        let mut loadout = Self::new(class, level);
        for &ability in normal {
            loadout.equip(ability)?;
        }
        if let Some(ability) = ultimate {
            loadout.equip_ultimate(ability)?;
        }
        Ok(loadout)
    }

    /// Puts an ability in the next free normal slot.
    pub fn equip(&mut self, ability: AbilityId) -> Result<(), LoadoutError> {
        self.check_learnable(ability)?;
        let def = ability.definition();
        if def.category == AbilityCategory::Ultimate {
            return Err(LoadoutError::UltimateInNormalSlot(ability));
        }
        if self.normal.contains(&ability) {
            return Err(LoadoutError::Duplicate(ability));
        }
        let capacity = self.capacity();
        if self.normal.len() >= capacity {
            return Err(LoadoutError::SlotsFull { capacity });
        }
        self.normal.push(ability);
        Ok(())
    }

    /// Fills the ultimate slot, replacing any previous ultimate.
    pub fn equip_ultimate(&mut self, ability: AbilityId) -> Result<(), LoadoutError> {
        if self.level < CombatConfig::ULTIMATE_UNLOCK_LEVEL {
            return Err(LoadoutError::UltimateLocked {
                required: CombatConfig::ULTIMATE_UNLOCK_LEVEL,
            });
        }
        self.check_learnable(ability)?;
        if ability.definition().category != AbilityCategory::Ultimate {
            return Err(LoadoutError::NotAnUltimate(ability));
        }
        self.ultimate = Some(ability);
        Ok(())
    }

    fn check_learnable(&self, ability: AbilityId) -> Result<(), LoadoutError> {
        if ability.class() != Some(self.class) {
            return Err(LoadoutError::WrongClass {
                ability,
                class: self.class,
            });
        }
        let required = ability.definition().level_requirement;
        if self.level < required {
            return Err(LoadoutError::LevelTooLow {
                ability,
                required,
                level: self.level,
            });
        }
        Ok(())
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    /// Normal slots available at this loadout's level.
    pub fn capacity(&self) -> usize {
        normal_slot_count(self.level)
    }

    pub fn normal(&self) -> &[AbilityId] {
        &self.normal
    }

    pub fn ultimate(&self) -> Option<AbilityId> {
        self.ultimate
    }

    /// Normal abilities followed by the ultimate.
    pub fn abilities(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.normal.iter().copied().chain(self.ultimate)
    }

    pub fn contains(&self, ability: AbilityId) -> bool {
        self.abilities().any(|equipped| equipped == ability)
    }

    pub fn passives(&self) -> &[PassivePool] {
        &self.passives
    }

    pub fn passive(&self, kind: PassiveKind) -> Option<&PassivePool> {
        self.passives.iter().find(|pool| pool.kind == kind)
    }

    pub(crate) fn passive_mut(&mut self, kind: PassiveKind) -> Option<&mut PassivePool> {
        self.passives.iter_mut().find(|pool| pool.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BarbarAbility, PaladinAbility};

    const SMITE: AbilityId = AbilityId::Paladin(PaladinAbility::DivineSmite);
    const HEALING_WORD: AbilityId = AbilityId::Paladin(PaladinAbility::HealingWord);
    const CONSECRATION: AbilityId = AbilityId::Paladin(PaladinAbility::Consecration);
    const WRATH: AbilityId = AbilityId::Paladin(PaladinAbility::AvengingWrath);

    #[test]
    fn slot_count_by_level_tier() {
        assert_eq!(normal_slot_count(1), 2);
        assert_eq!(normal_slot_count(2), 2);
        assert_eq!(normal_slot_count(3), 3);
        assert_eq!(normal_slot_count(5), 3);
        assert_eq!(normal_slot_count(6), 4);
        assert_eq!(normal_slot_count(8), 4);
        assert_eq!(normal_slot_count(9), 5);
        assert_eq!(normal_slot_count(40), 5);
    }

    #[test]
    fn rejects_foreign_and_locked_abilities() {
        let err = Loadout::build(
            CharacterClass::Paladin,
            1,
            &[AbilityId::Barbar(BarbarAbility::Rage)],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, LoadoutError::WrongClass { .. }));

        let err = Loadout::build(CharacterClass::Paladin, 1, &[CONSECRATION], None).unwrap_err();
        assert_eq!(
            err,
            LoadoutError::LevelTooLow {
                ability: CONSECRATION,
                required: 5,
                level: 1,
            }
        );
    }

    #[test]
    fn enforces_slot_capacity_and_duplicates() {
        let mut loadout = Loadout::new(CharacterClass::Paladin, 1);
        loadout.equip(SMITE).unwrap();
        assert_eq!(loadout.equip(SMITE), Err(LoadoutError::Duplicate(SMITE)));
        loadout.equip(HEALING_WORD).unwrap();

        let err = loadout
            .equip(AbilityId::Paladin(PaladinAbility::HealingWord))
            .unwrap_err();
        assert_eq!(err, LoadoutError::Duplicate(HEALING_WORD));

        let mut full =
            Loadout::build(CharacterClass::Paladin, 3, &[SMITE, HEALING_WORD], None).unwrap();
        full.equip(AbilityId::Paladin(PaladinAbility::ShieldOfFaith)).unwrap();
        let err = full
            .equip(AbilityId::Paladin(PaladinAbility::Judgement))
            .unwrap_err();
        assert!(matches!(err, LoadoutError::LevelTooLow { .. }));
    }

    #[test]
    fn slots_full_reports_capacity() {
        let mut loadout = Loadout::build(CharacterClass::Barbar, 1, &[], None).unwrap();
        loadout.equip(AbilityId::Barbar(BarbarAbility::RecklessStrike)).unwrap();
        loadout.equip(AbilityId::Barbar(BarbarAbility::Rage)).unwrap();
        let err = Loadout::build(
            CharacterClass::Barbar,
            2,
            &[
                AbilityId::Barbar(BarbarAbility::RecklessStrike),
                AbilityId::Barbar(BarbarAbility::Rage),
                AbilityId::Barbar(BarbarAbility::Intimidate),
            ],
            None,
        )
        .unwrap_err();
        assert_eq!(err, LoadoutError::SlotsFull { capacity: 2 });
    }

    #[test]
    fn ultimate_slot_unlocks_at_ten() {
        let err = Loadout::build(CharacterClass::Paladin, 9, &[], Some(WRATH)).unwrap_err();
        assert_eq!(err, LoadoutError::UltimateLocked { required: 10 });

        let loadout = Loadout::build(CharacterClass::Paladin, 10, &[SMITE], Some(WRATH)).unwrap();
        assert_eq!(loadout.ultimate(), Some(WRATH));
        assert!(loadout.contains(WRATH));
        assert_eq!(loadout.abilities().count(), 2);

        let err = Loadout::build(CharacterClass::Paladin, 10, &[WRATH], None).unwrap_err();
        assert_eq!(err, LoadoutError::UltimateInNormalSlot(WRATH));

        let err = Loadout::build(CharacterClass::Paladin, 10, &[], Some(SMITE)).unwrap_err();
        assert_eq!(err, LoadoutError::NotAnUltimate(SMITE));
    }

    #[test]
    fn passive_pools_start_full() {
        let loadout = Loadout::new(CharacterClass::Paladin, 10);
        assert_eq!(loadout.passive(PassiveKind::LayOnHands).unwrap().remaining, 50);
        assert_eq!(loadout.passive(PassiveKind::CleansingTouch).unwrap().remaining, 3);
        assert!(loadout.passive(PassiveKind::SecondWind).is_none());
    }
}
