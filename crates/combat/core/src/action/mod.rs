//! Actions and their resolution.
//!
//! Callers describe intent with [`PlayerAction`] or [`EnemyAction`]. Target
//! indices are roster indices relative to the actor: hostile actions index
//! the opposing roster, friendly actions index the actor's own.

mod error;
pub(crate) mod resolve;

pub use error::ActionError;

use crate::catalog::{AbilityId, EffectKind, MonsterAbility, PassiveKind};
use crate::state::{CombatantRef, DamageOutcome};

/// Action requested by the player side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    /// Basic weapon attack against an enemy.
    Attack { target: usize },

    /// Equipped ability. `target` is required for single-enemy abilities;
    /// for ally abilities it defaults to the caster; otherwise ignored.
    Ability {
        ability: AbilityId,
        target: Option<usize>,
    },

    /// Passive pool use. `target` names an ally for ally passives and
    /// defaults to the user.
    Passive {
        passive: PassiveKind,
        target: Option<usize>,
    },
}

impl PlayerAction {
    pub const fn attack(target: usize) -> Self {
        PlayerAction::Attack { target }
    }

    pub const fn ability(ability: AbilityId, target: Option<usize>) -> Self {
        PlayerAction::Ability { ability, target }
    }

    pub const fn passive(passive: PassiveKind, target: Option<usize>) -> Self {
        PlayerAction::Passive { passive, target }
    }
}

/// Action chosen for an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    /// Basic attack against a player.
    Attack { target: usize },

    /// Monster ability; targeting follows [`PlayerAction::Ability`].
    Ability {
        ability: MonsterAbility,
        target: Option<usize>,
    },
}

/// d20 outcome of a basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRoll {
    Hit { roll: u32, total: i32 },
    Critical { roll: u32 },
    Miss { roll: u32, total: i32 },
}

/// Everything one resolution did to one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impact {
    pub target: CombatantRef,
    pub damage: DamageOutcome,
    pub healed: u32,
    pub temp_hp: u32,
    pub effect: Option<EffectKind>,
    pub cleansed: usize,
}

impl Impact {
    pub(crate) const fn on(target: CombatantRef) -> Self {
        Self {
            target,
            damage: DamageOutcome {
                absorbed: 0,
                hp_lost: 0,
                lethal: false,
            },
            healed: 0,
            temp_hp: 0,
            effect: None,
            cleansed: 0,
        }
    }
}

/// What the resolved action was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    Attack(AttackRoll),
    Ability(AbilityId),
    Passive(PassiveKind),
}

/// Result of a successfully resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: CombatantRef,
    pub resolution: Resolution,
    pub impacts: Vec<Impact>,
}

impl ActionOutcome {
    /// True if any combatant was brought to 0 HP.
    pub fn lethal(&self) -> bool {
        self.impacts.iter().any(|impact| impact.damage.lethal)
    }
}
