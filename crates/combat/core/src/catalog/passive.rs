//! Passive abilities backed by per-combat resource pools.
//!
//! Passives do not use cooldowns or mana. Each one is a pool on the loadout
//! (HP for Lay on Hands, charges for the others) that is filled when the
//! combat starts and drained by use.

use super::class::CharacterClass;

/// Passive ability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    /// Heal an ally from an HP pool of `5 × level`.
    LayOnHands,
    /// Remove harmful effects from an ally; `1 + level / 5` charges.
    CleansingTouch,
    /// Heal self by `5 + level`; `1 + level / 10` charges.
    SecondWind,
}

impl PassiveKind {
    pub const fn name(self) -> &'static str {
        match self {
            PassiveKind::LayOnHands => "Lay on Hands",
            PassiveKind::CleansingTouch => "Cleansing Touch",
            PassiveKind::SecondWind => "Second Wind",
        }
    }

    pub const fn class(self) -> CharacterClass {
        match self {
            PassiveKind::LayOnHands | PassiveKind::CleansingTouch => CharacterClass::Paladin,
            PassiveKind::SecondWind => CharacterClass::Barbar,
        }
    }

    /// Pool size at the start of a combat.
    pub const fn pool_size(self, level: u32) -> u32 {
        match self {
            PassiveKind::LayOnHands => 5 * level,
            PassiveKind::CleansingTouch => 1 + level / 5,
            PassiveKind::SecondWind => 1 + level / 10,
        }
    }

    /// True if the passive can land on an ally rather than only on the user.
    pub const fn targets_ally(self) -> bool {
        match self {
            PassiveKind::LayOnHands | PassiveKind::CleansingTouch => true,
            PassiveKind::SecondWind => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_sizes_scale_with_level() {
        assert_eq!(PassiveKind::LayOnHands.pool_size(4), 20);
        assert_eq!(PassiveKind::CleansingTouch.pool_size(4), 1);
        assert_eq!(PassiveKind::CleansingTouch.pool_size(5), 2);
        assert_eq!(PassiveKind::SecondWind.pool_size(9), 1);
        assert_eq!(PassiveKind::SecondWind.pool_size(10), 2);
    }
}
