//! Player and enemy combatants.
//!
//! Both kinds live in indexed rosters on [`CombatState`](super::CombatState)
//! and are addressed by [`CombatantRef`]. The common capability set (name,
//! HP, initiative, liveness) is the [`Vital`] trait; [`Combatant`] is a
//! borrowed view over either kind.

use arrayvec::ArrayVec;

use crate::catalog::{
    AbilityId, AiStrategy, CharacterClass, EquippedGear, MonsterAbility, MonsterType, Rewards,
};
use crate::config::CombatConfig;
use crate::stats::{AttributeScores, DerivedStats, StatBonuses};

use super::loadout::{Loadout, LoadoutError};
use super::vitals::{ActiveEffects, ManaPool, Vitals};

/// Which party a combatant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Stable roster index of a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRef {
    pub side: Side,
    pub index: usize,
}

impl CombatantRef {
    pub const fn player(index: usize) -> Self {
        Self {
            side: Side::Player,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        Self {
            side: Side::Enemy,
            index,
        }
    }

    pub const fn is_player(self) -> bool {
        matches!(self.side, Side::Player)
    }

    /// Numeric id mixed into RNG seeds.
    pub const fn actor_id(self) -> u32 {
        match self.side {
            Side::Player => self.index as u32,
            Side::Enemy => 0x1000 + self.index as u32,
        }
    }
}

impl core::fmt::Display for CombatantRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

/// Capabilities shared by every combatant.
pub trait Vital {
    fn name(&self) -> &str;

    fn vitals(&self) -> &Vitals;

    fn effects(&self) -> &ActiveEffects;

    /// Turn order priority; higher acts first.
    fn initiative(&self) -> i32;

    fn level(&self) -> u32;

    /// Target number for attack rolls, including armor effects.
    fn armor_class(&self) -> i32;

    /// Added to the d20 on basic attacks.
    fn attack_bonus(&self) -> i32;

    /// Basic attack damage before effects.
    fn basic_damage(&self) -> u32;

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }

    fn hp(&self) -> u32 {
        self.vitals().hp()
    }

    fn max_hp(&self) -> u32 {
        self.vitals().max_hp()
    }
}

/// Read-only input describing a player at combat start.
///
/// Supplied by the progression layer; combat never writes back into it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub attributes: AttributeScores,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gear: EquippedGear,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ultimate: Option<AbilityId>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, class: CharacterClass, level: u32) -> Self {
        Self {
            name: name.into(),
            class,
            level: level.clamp(1, CombatConfig::MAX_LEVEL),
            attributes: AttributeScores::default(),
            gear: EquippedGear::empty(),
            abilities: Vec::new(),
            ultimate: None,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeScores) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        self.abilities = abilities.into_iter().collect();
        self
    }

    pub fn with_ultimate(mut self, ultimate: AbilityId) -> Self {
        self.ultimate = Some(ultimate);
        self
    }
}

/// A player in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCombatant {
    name: String,
    class: CharacterClass,
    level: u32,
    bonuses: StatBonuses,
    derived: DerivedStats,
    loadout: Loadout,
    pub(crate) vitals: Vitals,
    pub(crate) mana: ManaPool,
    pub(crate) effects: ActiveEffects,
}

impl PlayerCombatant {
    /// Builds a combatant at full HP and mana with full passive pools.
    pub fn from_profile(profile: &PlayerProfile) -> Result<Self, LoadoutError> {
        let level = profile.level.clamp(1, CombatConfig::MAX_LEVEL);
        let loadout = Loadout::build(profile.class, level, &profile.abilities, profile.ultimate)?;
        let bonuses = profile.gear.bonuses();
        let derived = DerivedStats::compute(profile.class, level, &profile.attributes, &bonuses);

        Ok(Self {
            name: profile.name.clone(),
            class: profile.class,
            level,
            bonuses,
            derived,
            loadout,
            vitals: Vitals::new(derived.max_hp),
            mana: ManaPool::new(derived.max_mana),
            effects: ActiveEffects::new(),
        })
    }

    /// Overrides the starting HP, clamped to max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.vitals = Vitals::with_hp(self.vitals.max_hp(), hp).with_temp_hp(self.vitals.temp_hp());
        self
    }

    pub fn with_temp_hp(mut self, temp_hp: u32) -> Self {
        self.vitals = self.vitals.with_temp_hp(temp_hp);
        self
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn bonuses(&self) -> &StatBonuses {
        &self.bonuses
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub(crate) fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    pub fn mana(&self) -> &ManaPool {
        &self.mana
    }
}

impl Vital for PlayerCombatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    fn initiative(&self) -> i32 {
        self.derived.initiative()
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn armor_class(&self) -> i32 {
        self.derived.armor_class + self.effects.armor_bonus()
    }

    fn attack_bonus(&self) -> i32 {
        self.derived.attack_bonus
    }

    fn basic_damage(&self) -> u32 {
        self.derived.basic_damage
    }
}

/// A monster ability with its own cooldown counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAbility {
    pub ability: MonsterAbility,
    pub cooldown: u32,
}

impl EnemyAbility {
    pub const fn id(&self) -> AbilityId {
        AbilityId::Monster(self.ability)
    }

    pub const fn is_ready(&self) -> bool {
        self.cooldown == 0
    }
}

/// An enemy in combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyCombatant {
    name: String,
    monster: MonsterType,
    level: u32,
    strategy: AiStrategy,
    armor: u32,
    base_damage: u32,
    initiative: i32,
    rewards: Rewards,
    pub(crate) abilities: ArrayVec<EnemyAbility, { CombatConfig::MAX_ENEMY_ABILITIES }>,
    pub(crate) vitals: Vitals,
    pub(crate) effects: ActiveEffects,
}

impl EnemyCombatant {
    /// Instantiates a monster template at a level.
    pub fn spawn(monster: MonsterType, level: u32) -> Self {
        let level = level.clamp(1, CombatConfig::MAX_LEVEL);
        let template = monster.template();
        let abilities = template
            .abilities
            .iter()
            .take(CombatConfig::MAX_ENEMY_ABILITIES)
            .map(|&ability| EnemyAbility {
                ability,
                cooldown: 0,
            })
            .collect();

        Self {
            name: template.name.to_owned(),
            monster,
            level,
            strategy: template.strategy,
            armor: template.armor,
            base_damage: template.damage(level),
            initiative: template.initiative,
            rewards: template.rewards(level),
            abilities,
            vitals: Vitals::new(template.max_hp(level)),
            effects: ActiveEffects::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Overrides the starting HP, clamped to max.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.vitals = Vitals::with_hp(self.vitals.max_hp(), hp);
        self
    }

    pub fn monster(&self) -> MonsterType {
        self.monster
    }

    /// Default strategy of this enemy, before escalation.
    pub fn strategy(&self) -> AiStrategy {
        self.strategy
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn abilities(&self) -> &[EnemyAbility] {
        &self.abilities
    }

    pub(crate) fn ability_mut(&mut self, ability: MonsterAbility) -> Option<&mut EnemyAbility> {
        self.abilities.iter_mut().find(|slot| slot.ability == ability)
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        for slot in self.abilities.iter_mut() {
            slot.cooldown = slot.cooldown.saturating_sub(1);
        }
    }
}

impl Vital for EnemyCombatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    fn initiative(&self) -> i32 {
        self.initiative
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn armor_class(&self) -> i32 {
        self.armor as i32 + self.effects.armor_bonus()
    }

    fn attack_bonus(&self) -> i32 {
        (self.level / 2 + 2) as i32
    }

    fn basic_damage(&self) -> u32 {
        self.base_damage
    }
}

/// Borrowed view of either combatant kind.
#[derive(Clone, Copy, Debug)]
pub enum Combatant<'a> {
    Player(&'a PlayerCombatant),
    Enemy(&'a EnemyCombatant),
}

impl Combatant<'_> {
    pub fn side(&self) -> Side {
        match self {
            Combatant::Player(_) => Side::Player,
            Combatant::Enemy(_) => Side::Enemy,
        }
    }

    fn as_vital(&self) -> &dyn Vital {
        match self {
            Combatant::Player(player) => *player,
            Combatant::Enemy(enemy) => *enemy,
        }
    }
}

impl Vital for Combatant<'_> {
    fn name(&self) -> &str {
        self.as_vital().name()
    }

    fn vitals(&self) -> &Vitals {
        self.as_vital().vitals()
    }

    fn effects(&self) -> &ActiveEffects {
        self.as_vital().effects()
    }

    fn initiative(&self) -> i32 {
        self.as_vital().initiative()
    }

    fn level(&self) -> u32 {
        self.as_vital().level()
    }

    fn armor_class(&self) -> i32 {
        self.as_vital().armor_class()
    }

    fn attack_bonus(&self) -> i32 {
        self.as_vital().attack_bonus()
    }

    fn basic_damage(&self) -> u32 {
        self.as_vital().basic_damage()
    }
}
