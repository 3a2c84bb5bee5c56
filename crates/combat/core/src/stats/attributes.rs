//! The six-attribute stat block.
//!
//! Attribute scores are owned by the progression layer and read once when a
//! combat is built. Everything else a player brings into combat (armor class,
//! initiative, mana) is derived from these plus equipment.

/// One of the six character attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    #[strum(to_string = "STR")]
    Strength,
    #[strum(to_string = "DEX")]
    Dexterity,
    #[strum(to_string = "CON")]
    Constitution,
    #[strum(to_string = "INT")]
    Intelligence,
    #[strum(to_string = "WIS")]
    Wisdom,
    #[strum(to_string = "CHA")]
    Charisma,
}

/// Attribute scores (STR/DEX/CON/INT/WIS/CHA).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AttributeScores {
    pub const fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            str,
            dex,
            con,
            int,
            wis,
            cha,
        }
    }

    pub const fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.str,
            Attribute::Dexterity => self.dex,
            Attribute::Constitution => self.con,
            Attribute::Intelligence => self.int,
            Attribute::Wisdom => self.wis,
            Attribute::Charisma => self.cha,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.str,
            Attribute::Dexterity => &mut self.dex,
            Attribute::Constitution => &mut self.con,
            Attribute::Intelligence => &mut self.int,
            Attribute::Wisdom => &mut self.wis,
            Attribute::Charisma => &mut self.cha,
        }
    }

    /// Modifier for an attribute: `(score - 10) / 2`, rounded down.
    pub const fn modifier(&self, attribute: Attribute) -> i32 {
        modifier(self.get(attribute))
    }
}

impl Default for AttributeScores {
    /// All tens: an unremarkable adventurer.
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Modifier for a raw score, rounding toward negative infinity (8 → -1, 9 → -1).
pub const fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn modifiers_round_down() {
        assert_eq!(modifier(10), 0);
        assert_eq!(modifier(11), 0);
        assert_eq!(modifier(12), 1);
        assert_eq!(modifier(9), -1);
        assert_eq!(modifier(8), -1);
        assert_eq!(modifier(7), -2);
        assert_eq!(modifier(20), 5);
    }

    #[test]
    fn get_mut_targets_matching_field() {
        let mut scores = AttributeScores::default();
        for (offset, attribute) in Attribute::iter().enumerate() {
            *scores.get_mut(attribute) += offset as i32;
        }
        assert_eq!(scores, AttributeScores::new(10, 11, 12, 13, 14, 15));
        assert_eq!(Attribute::Charisma.to_string(), "CHA");
    }
}
