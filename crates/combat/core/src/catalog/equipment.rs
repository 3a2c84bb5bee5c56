//! Equipment catalog.
//!
//! A piece of equipment is the tuple (slot, set, rarity, tier). Its stats are
//! a deterministic function of `(set, slot, rarity multiplier, tier)` and are
//! purely additive to the wearer's derived stats. Combat never mutates
//! equipment.

use crate::config::CombatConfig;
use crate::stats::{Attribute, StatBonuses};

use super::class::CharacterClass;

/// Equipment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    Weapon,
    Armor,
    Accessory,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Weapon, Slot::Armor, Slot::Accessory];
}

/// Rarity tier, ordered from common to rare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[strum(to_string = "GRAU")]
    Grau,
    #[strum(to_string = "WEISS")]
    Weiss,
    #[strum(to_string = "GRUEN")]
    Gruen,
    #[strum(to_string = "BLAU")]
    Blau,
    #[strum(to_string = "LILA")]
    Lila,
}

impl Rarity {
    /// Integer stat multiplier: 1, 2, 4, 8, 16.
    pub const fn multiplier(self) -> i32 {
        match self {
            Rarity::Grau => 1,
            Rarity::Weiss => 2,
            Rarity::Gruen => 4,
            Rarity::Blau => 8,
            Rarity::Lila => 16,
        }
    }
}

/// Class-specific thematic equipment group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSet {
    Lichtbringer,
    Bollwerk,
    Blutrausch,
    Sturmfell,
}

/// Secondary stat an accessory of a set provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetSecondary {
    Mana,
    Health,
    Initiative,
}

impl EquipmentSet {
    pub const fn class(self) -> CharacterClass {
        match self {
            EquipmentSet::Lichtbringer | EquipmentSet::Bollwerk => CharacterClass::Paladin,
            EquipmentSet::Blutrausch | EquipmentSet::Sturmfell => CharacterClass::Barbar,
        }
    }

    /// Attribute the set raises.
    pub const fn primary_attribute(self) -> Attribute {
        match self {
            EquipmentSet::Lichtbringer => Attribute::Charisma,
            EquipmentSet::Bollwerk => Attribute::Constitution,
            EquipmentSet::Blutrausch => Attribute::Strength,
            EquipmentSet::Sturmfell => Attribute::Dexterity,
        }
    }

    const fn secondary(self) -> SetSecondary {
        match self {
            EquipmentSet::Lichtbringer => SetSecondary::Mana,
            EquipmentSet::Bollwerk | EquipmentSet::Blutrausch => SetSecondary::Health,
            EquipmentSet::Sturmfell => SetSecondary::Initiative,
        }
    }
}

/// Equipment tier, always within `1..=MAX_TIER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Tier(u32);

impl Tier {
    /// Clamps into the valid tier range.
    pub const fn new(value: u32) -> Self {
        let clamped = if value < 1 {
            1
        } else if value > CombatConfig::MAX_TIER {
            CombatConfig::MAX_TIER
        } else {
            value
        };
        Self(clamped)
    }

    /// Tier dropped by an enemy of the given level: `clamp(level / 2 + 1, 1, 10)`.
    pub const fn for_enemy_level(level: u32) -> Self {
        Self::new(level / 2 + 1)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Tier {
    fn from(value: u32) -> Self {
        Tier::new(value)
    }
}

impl From<Tier> for u32 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

/// A concrete piece of equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub slot: Slot,
    pub set: EquipmentSet,
    pub rarity: Rarity,
    pub tier: Tier,
}

impl Equipment {
    pub const fn new(slot: Slot, set: EquipmentSet, rarity: Rarity, tier: Tier) -> Self {
        Self {
            slot,
            set,
            rarity,
            tier,
        }
    }

    /// Stat bonuses granted by this piece.
    pub fn stats(&self) -> StatBonuses {
        equipment_stats(self.set, self.slot, self.rarity.multiplier(), self.tier)
    }
}

/// Stat line for `(set, slot, rarity multiplier, tier)`.
///
/// ```text
/// Weapon:    damage = 2m + tier, attack = m/2 + tier/3, primary + m/2
/// Armor:     armor_class = 1 + m/2 + tier/4, max_hp = 5m + 2·tier
/// Accessory: primary + m, plus the set's secondary stat
///            (mana 3m + tier | hp 3m + tier | initiative 1 + m/4 + tier/5)
/// ```
pub fn equipment_stats(set: EquipmentSet, slot: Slot, multiplier: i32, tier: Tier) -> StatBonuses {
    let m = multiplier;
    let t = tier.get() as i32;
    let primary = set.primary_attribute();

    match slot {
        Slot::Weapon => StatBonuses {
            damage: 2 * m + t,
            attack: m / 2 + t / 3,
            ..StatBonuses::NONE
        }
        .with_attribute(primary, m / 2),
        Slot::Armor => StatBonuses {
            armor_class: 1 + m / 2 + t / 4,
            max_hp: 5 * m + 2 * t,
            ..StatBonuses::NONE
        },
        Slot::Accessory => {
            let secondary = match set.secondary() {
                SetSecondary::Mana => StatBonuses {
                    max_mana: 3 * m + t,
                    ..StatBonuses::NONE
                },
                SetSecondary::Health => StatBonuses {
                    max_hp: 3 * m + t,
                    ..StatBonuses::NONE
                },
                SetSecondary::Initiative => StatBonuses {
                    initiative: 1 + m / 4 + t / 5,
                    ..StatBonuses::NONE
                },
            };
            secondary.with_attribute(primary, m)
        }
    }
}

/// Equipment a player wears into combat, one piece per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedGear {
    pub weapon: Option<Equipment>,
    pub armor: Option<Equipment>,
    pub accessory: Option<Equipment>,
}

impl EquippedGear {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Equips a piece into its slot, returning the piece it replaced.
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn get(&self, slot: Slot) -> Option<&Equipment> {
        match slot {
            Slot::Weapon => self.weapon.as_ref(),
            Slot::Armor => self.armor.as_ref(),
            Slot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Equipment> {
        match slot {
            Slot::Weapon => &mut self.weapon,
            Slot::Armor => &mut self.armor,
            Slot::Accessory => &mut self.accessory,
        }
    }

    /// Sum of all equipped pieces' bonuses.
    pub fn bonuses(&self) -> StatBonuses {
        Slot::ALL
            .iter()
            .filter_map(|slot| self.get(*slot))
            .map(Equipment::stats)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn rarity_multipliers_double() {
        let multipliers: Vec<i32> = Rarity::iter().map(Rarity::multiplier).collect();
        assert_eq!(multipliers, vec![1, 2, 4, 8, 16]);
        assert!(Rarity::Grau < Rarity::Lila);
        assert_eq!(Rarity::Gruen.to_string(), "GRUEN");
    }

    #[test]
    fn tier_is_clamped() {
        assert_eq!(Tier::new(0).get(), 1);
        assert_eq!(Tier::new(11).get(), 10);
        assert_eq!(Tier::for_enemy_level(1).get(), 1);
        assert_eq!(Tier::for_enemy_level(2).get(), 2);
        assert_eq!(Tier::for_enemy_level(7).get(), 4);
        assert_eq!(Tier::for_enemy_level(40).get(), 10);
    }

    #[test]
    fn weapon_stats_follow_formula() {
        let sword = Equipment::new(
            Slot::Weapon,
            EquipmentSet::Blutrausch,
            Rarity::Blau,
            Tier::new(3),
        );
        let stats = sword.stats();
        assert_eq!(stats.damage, 19);
        assert_eq!(stats.attack, 5);
        assert_eq!(stats.attributes.str, 4);
        assert_eq!(stats.armor_class, 0);
    }

    #[test]
    fn accessory_secondary_depends_on_set() {
        let ring = Equipment::new(
            Slot::Accessory,
            EquipmentSet::Lichtbringer,
            Rarity::Weiss,
            Tier::new(2),
        );
        assert_eq!(ring.stats().max_mana, 8);
        assert_eq!(ring.stats().attributes.cha, 2);

        let charm = Equipment::new(
            Slot::Accessory,
            EquipmentSet::Sturmfell,
            Rarity::Lila,
            Tier::new(10),
        );
        assert_eq!(charm.stats().initiative, 7);
        assert_eq!(charm.stats().attributes.dex, 16);
    }

    #[test]
    fn higher_rarity_never_weaker() {
        for set in EquipmentSet::iter() {
            for slot in Slot::iter() {
                let mut previous = None;
                for rarity in Rarity::iter() {
                    let stats = equipment_stats(set, slot, rarity.multiplier(), Tier::new(5));
                    let total = stats.damage + stats.armor_class + stats.max_hp + stats.max_mana;
                    if let Some(prev) = previous {
                        assert!(total >= prev);
                    }
                    previous = Some(total);
                }
            }
        }
    }

    #[test]
    fn gear_sums_pieces_and_replaces_slot() {
        let mut gear = EquippedGear::empty();
        let old = Equipment::new(Slot::Armor, EquipmentSet::Bollwerk, Rarity::Grau, Tier::new(1));
        let new = Equipment::new(Slot::Armor, EquipmentSet::Bollwerk, Rarity::Gruen, Tier::new(4));
        assert_eq!(gear.equip(old), None);
        assert_eq!(gear.equip(new), Some(old));
        let club = Equipment::new(Slot::Weapon, EquipmentSet::Bollwerk, Rarity::Grau, Tier::new(1));
        gear.equip(club);

        let total = gear.bonuses();
        assert_eq!(total.armor_class, new.stats().armor_class);
        assert_eq!(total.max_hp, new.stats().max_hp);
        assert_eq!(total.damage, 3);
    }
}
