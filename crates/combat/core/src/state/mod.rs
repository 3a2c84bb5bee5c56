//! Authoritative combat state.
//!
//! [`CombatState`] owns both rosters, the turn pointer, the log and the
//! result. Presentation layers query it freely but mutate it only through
//! [`CombatEngine`](crate::engine::CombatEngine).

pub mod combatant;
pub mod error;
pub mod loadout;
pub mod log;
pub mod result;
pub mod vitals;

pub use combatant::{
    Combatant, CombatantRef, EnemyAbility, EnemyCombatant, PlayerCombatant, PlayerProfile, Side,
    Vital,
};
pub use error::SetupError;
pub use loadout::{Loadout, LoadoutError, PassivePool, normal_slot_count};
pub use log::{CombatLog, CombatLogEntry, LogKind};
pub use result::{CombatOutcome, CombatResult};
pub use vitals::{ActiveEffect, ActiveEffects, DamageOutcome, ManaPool, Vitals};

use crate::catalog::{AbilityCost, AbilityId};
use crate::env::compute_seed;

/// Kind of encounter. Fixed for the lifetime of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatKind {
    /// Scripted story stage.
    Story { stage: u32 },
    /// Repeatable randomized encounter; `counter` is the running encounter count.
    Auftrag { counter: u32 },
}

impl CombatKind {
    pub const fn auftrag_counter(&self) -> Option<u32> {
        match self {
            CombatKind::Auftrag { counter } => Some(*counter),
            CombatKind::Story { .. } => None,
        }
    }
}

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    NotStarted,
    InProgress,
    Ended(CombatOutcome),
}

/// Turn order computed once at combat start.
///
/// Dead combatants keep their slot and are skipped when the pointer moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    entries: Vec<CombatantRef>,
}

impl TurnOrder {
    pub(crate) fn new(entries: Vec<CombatantRef>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CombatantRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<CombatantRef> {
        self.entries.get(index).copied()
    }

    pub fn position(&self, combatant: CombatantRef) -> Option<usize> {
        self.entries.iter().position(|&entry| entry == combatant)
    }
}

/// Remaining cooldown of one equipped player ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCooldown {
    pub ability: AbilityId,
    pub remaining: u32,
}

/// Per-player cooldowns keyed by roster index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownTable {
    players: Vec<Vec<AbilityCooldown>>,
}

impl CooldownTable {
    fn for_players(players: &[PlayerCombatant]) -> Self {
        let players = players
            .iter()
            .map(|player| {
                player
                    .loadout()
                    .abilities()
                    .map(|ability| AbilityCooldown {
                        ability,
                        remaining: 0,
                    })
                    .collect()
            })
            .collect();
        Self { players }
    }

    /// Rounds until `ability` is usable again; 0 if ready or unknown.
    pub fn remaining(&self, player: usize, ability: AbilityId) -> u32 {
        self.players
            .get(player)
            .and_then(|slots| slots.iter().find(|slot| slot.ability == ability))
            .map_or(0, |slot| slot.remaining)
    }

    pub(crate) fn set(&mut self, player: usize, ability: AbilityId, rounds: u32) {
        let slots = &mut self.players[player];
        match slots.iter_mut().find(|slot| slot.ability == ability) {
            Some(slot) => slot.remaining = rounds,
            None => slots.push(AbilityCooldown {
                ability,
                remaining: rounds,
            }),
        }
    }

    pub(crate) fn tick(&mut self) {
        for slot in self.players.iter_mut().flatten() {
            slot.remaining = slot.remaining.saturating_sub(1);
        }
    }
}

/// Why an ability can or cannot be used right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Availability {
    Ready,
    Cooldown { remaining: u32 },
    MissingMana { required: u32, available: u32 },
}

impl Availability {
    pub const fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready)
    }
}

/// Availability of one equipped ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityStatus {
    pub ability: AbilityId,
    pub availability: Availability,
}

/// Canonical state of one combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    kind: CombatKind,
    tutorial: bool,

    /// Fixed at construction. Combined with `nonce` for every roll.
    seed: u64,

    pub(crate) players: Vec<PlayerCombatant>,
    pub(crate) enemies: Vec<EnemyCombatant>,

    pub(crate) round: u32,
    pub(crate) turn_order: TurnOrder,
    pub(crate) turn_index: usize,

    /// Incremented after every resolved action.
    pub(crate) nonce: u64,

    pub(crate) log: CombatLog,
    pub(crate) cooldowns: CooldownTable,
    pub(crate) phase: CombatPhase,
    pub(crate) result: Option<CombatResult>,
}

impl CombatState {
    /// Creates a combat that has not started yet.
    ///
    /// Both parties need at least one living member.
    pub fn new(
        kind: CombatKind,
        players: Vec<PlayerCombatant>,
        enemies: Vec<EnemyCombatant>,
    ) -> Result<Self, SetupError> {
        if !players.iter().any(Vital::is_alive) {
            return Err(SetupError::EmptyPlayerParty);
        }
        if !enemies.iter().any(Vital::is_alive) {
            return Err(SetupError::EmptyEnemyParty);
        }

        let cooldowns = CooldownTable::for_players(&players);
        Ok(Self {
            kind,
            tutorial: false,
            seed: 0,
            players,
            enemies,
            round: 0,
            turn_order: TurnOrder::default(),
            turn_index: 0,
            nonce: 0,
            log: CombatLog::new(),
            cooldowns,
            phase: CombatPhase::NotStarted,
            result: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Tutorial fights never escalate enemies to the smart strategy.
    pub fn with_tutorial(mut self, tutorial: bool) -> Self {
        self.tutorial = tutorial;
        self
    }

    pub fn kind(&self) -> CombatKind {
        self.kind
    }

    pub fn is_tutorial(&self) -> bool {
        self.tutorial
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn players(&self) -> &[PlayerCombatant] {
        &self.players
    }

    pub fn enemies(&self) -> &[EnemyCombatant] {
        &self.enemies
    }

    pub fn player(&self, index: usize) -> Option<&PlayerCombatant> {
        self.players.get(index)
    }

    pub fn enemy(&self, index: usize) -> Option<&EnemyCombatant> {
        self.enemies.get(index)
    }

    pub fn combatant(&self, target: CombatantRef) -> Option<Combatant<'_>> {
        match target.side {
            Side::Player => self.players.get(target.index).map(Combatant::Player),
            Side::Enemy => self.enemies.get(target.index).map(Combatant::Enemy),
        }
    }

    /// Roster refs of one side, alive or not.
    pub fn roster(&self, side: Side) -> impl Iterator<Item = CombatantRef> + '_ {
        let len = match side {
            Side::Player => self.players.len(),
            Side::Enemy => self.enemies.len(),
        };
        (0..len).map(move |index| CombatantRef { side, index })
    }

    /// Living roster refs of one side, in roster order.
    pub fn living(&self, side: Side) -> impl Iterator<Item = CombatantRef> + '_ {
        self.roster(side).filter(|&r| self.is_alive(r))
    }

    pub fn is_alive(&self, target: CombatantRef) -> bool {
        self.combatant(target).is_some_and(|c| c.is_alive())
    }

    pub fn side_defeated(&self, side: Side) -> bool {
        self.living(side).next().is_none()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_order(&self) -> &TurnOrder {
        &self.turn_order
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.phase, CombatPhase::NotStarted)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, CombatPhase::Ended(_))
    }

    /// Combatant whose turn it is, while the combat is in progress.
    pub fn current_actor(&self) -> Option<CombatantRef> {
        match self.phase {
            CombatPhase::InProgress => self.turn_order.get(self.turn_index),
            CombatPhase::NotStarted | CombatPhase::Ended(_) => None,
        }
    }

    pub fn is_player_turn(&self) -> bool {
        self.current_actor().is_some_and(CombatantRef::is_player)
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn result(&self) -> Option<&CombatResult> {
        self.result.as_ref()
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    /// Availability of every ability equipped by a player.
    pub fn ability_status(&self, player: usize) -> Vec<AbilityStatus> {
        let Some(combatant) = self.players.get(player) else {
            return Vec::new();
        };
        combatant
            .loadout()
            .abilities()
            .map(|ability| AbilityStatus {
                ability,
                availability: self.availability(player, ability),
            })
            .collect()
    }

    /// Availability of one ability for a player. Does not check the loadout.
    pub fn availability(&self, player: usize, ability: AbilityId) -> Availability {
        let remaining = self.cooldowns.remaining(player, ability);
        if remaining > 0 {
            return Availability::Cooldown { remaining };
        }
        match ability.definition().cost {
            AbilityCost::ManaCost(required) => {
                let available = self.players.get(player).map_or(0, |p| p.mana().current());
                if available < required {
                    Availability::MissingMana {
                        required,
                        available,
                    }
                } else {
                    Availability::Ready
                }
            }
            AbilityCost::CooldownRounds(_) => Availability::Ready,
        }
    }

    // ===== engine-internal mutation =====

    /// Seed for one roll of the current action.
    pub(crate) fn roll_seed(&self, actor: CombatantRef, context: u32) -> u64 {
        compute_seed(self.seed, self.nonce, actor.actor_id(), context)
    }

    /// # Panics
    ///
    /// Panics if `target` is not in the roster.
    pub(crate) fn vitals_mut(&mut self, target: CombatantRef) -> &mut Vitals {
        match target.side {
            Side::Player => &mut self.players[target.index].vitals,
            Side::Enemy => &mut self.enemies[target.index].vitals,
        }
    }

    /// # Panics
    ///
    /// Panics if `target` is not in the roster.
    pub(crate) fn effects_mut(&mut self, target: CombatantRef) -> &mut ActiveEffects {
        match target.side {
            Side::Player => &mut self.players[target.index].effects,
            Side::Enemy => &mut self.enemies[target.index].effects,
        }
    }

    pub(crate) fn push_log(
        &mut self,
        kind: LogKind,
        actor: Option<CombatantRef>,
        message: String,
        important: bool,
    ) {
        self.log.push(CombatLogEntry {
            round: self.round,
            kind,
            actor,
            message,
            important,
        });
    }

    /// Name for log messages.
    pub(crate) fn name_of(&self, target: CombatantRef) -> String {
        self.combatant(target)
            .map_or_else(|| target.to_string(), |c| c.name().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterClass, MonsterType, PaladinAbility};

    fn paladin() -> PlayerCombatant {
        let profile = PlayerProfile::new("Ada", CharacterClass::Paladin, 1).with_abilities([
            AbilityId::Paladin(PaladinAbility::DivineSmite),
            AbilityId::Paladin(PaladinAbility::HealingWord),
        ]);
        PlayerCombatant::from_profile(&profile).unwrap()
    }

    #[test]
    fn rejects_parties_without_living_members() {
        let goblin = EnemyCombatant::spawn(MonsterType::Goblin, 1);
        assert_eq!(
            CombatState::new(CombatKind::Story { stage: 1 }, vec![], vec![goblin.clone()]),
            Err(SetupError::EmptyPlayerParty)
        );
        assert_eq!(
            CombatState::new(
                CombatKind::Story { stage: 1 },
                vec![paladin()],
                vec![goblin.with_hp(0)]
            ),
            Err(SetupError::EmptyEnemyParty)
        );
    }

    #[test]
    fn fresh_state_is_not_started() {
        let state = CombatState::new(
            CombatKind::Auftrag { counter: 3 },
            vec![paladin()],
            vec![EnemyCombatant::spawn(MonsterType::Wolf, 1)],
        )
        .unwrap()
        .with_seed(7);

        assert_eq!(state.phase(), CombatPhase::NotStarted);
        assert!(state.current_actor().is_none());
        assert!(!state.is_player_turn());
        assert!(state.result().is_none());
        assert_eq!(state.kind().auftrag_counter(), Some(3));
        assert_eq!(state.seed(), 7);
    }

    #[test]
    fn availability_reports_cooldown_and_mana() {
        let mut state = CombatState::new(
            CombatKind::Story { stage: 1 },
            vec![paladin()],
            vec![EnemyCombatant::spawn(MonsterType::Goblin, 1)],
        )
        .unwrap();
        let smite = AbilityId::Paladin(PaladinAbility::DivineSmite);
        let word = AbilityId::Paladin(PaladinAbility::HealingWord);

        assert!(state.ability_status(0).iter().all(|s| s.availability.is_ready()));

        state.cooldowns.set(0, smite, 2);
        state.players[0].mana = ManaPool::new(5);
        assert_eq!(state.availability(0, smite), Availability::Cooldown { remaining: 2 });
        assert_eq!(
            state.availability(0, word),
            Availability::MissingMana {
                required: 8,
                available: 5,
            }
        );

        state.cooldowns.tick();
        state.cooldowns.tick();
        state.cooldowns.tick();
        assert_eq!(state.cooldowns().remaining(0, smite), 0);
    }
}
