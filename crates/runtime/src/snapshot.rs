//! Read-only presentation view of a combat.
//!
//! A snapshot is rebuilt from [`CombatState`] after every request. It holds
//! everything a UI needs to render: both rosters, the turn order and pointer,
//! the tail of the combat log, and which abilities the acting player can use.

use serde::{Deserialize, Serialize};

use combat_core::state::ActiveEffect;
use combat_core::{
    AbilityStatus, CombatConfig, CombatKind, CombatLogEntry, CombatPhase, CombatResult,
    CombatState, CombatantRef, Side, Vital,
};

use crate::api::{Result, RuntimeError};

/// One combatant as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantView {
    pub target: CombatantRef,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub temp_hp: u32,
    /// Player combatants only.
    pub mana: Option<(u32, u32)>,
    pub alive: bool,
    pub effects: Vec<ActiveEffect>,
}

impl CombatantView {
    fn from_vital(target: CombatantRef, combatant: &dyn Vital) -> Self {
        Self {
            target,
            name: combatant.name().to_owned(),
            level: combatant.level(),
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            temp_hp: combatant.vitals().temp_hp(),
            mana: None,
            alive: combatant.is_alive(),
            effects: combatant.effects().iter().copied().collect(),
        }
    }
}

/// Serializable state of one combat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub kind: CombatKind,
    pub phase: CombatPhase,
    pub round: u32,
    pub players: Vec<CombatantView>,
    pub enemies: Vec<CombatantView>,
    pub turn_order: Vec<CombatantRef>,
    pub current: Option<CombatantRef>,
    /// Last [`CombatConfig::LOG_TAIL`] log entries.
    pub log: Vec<CombatLogEntry>,
    /// Equipped abilities of the acting player; empty on enemy turns.
    pub abilities: Vec<AbilityStatus>,
    pub result: Option<CombatResult>,
}

impl CombatSnapshot {
    pub fn capture(state: &CombatState) -> Self {
        let players = state
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| CombatantView {
                mana: Some((player.mana().current(), player.mana().max())),
                ..CombatantView::from_vital(CombatantRef::player(index), player)
            })
            .collect();
        let enemies = state
            .enemies()
            .iter()
            .enumerate()
            .map(|(index, enemy)| CombatantView::from_vital(CombatantRef::enemy(index), enemy))
            .collect();

        let current = state.current_actor().filter(|_| !state.is_ended());
        let abilities = match current {
            Some(actor) if actor.side == Side::Player => state.ability_status(actor.index),
            _ => Vec::new(),
        };

        Self {
            kind: state.kind(),
            phase: state.phase(),
            round: state.round(),
            players,
            enemies,
            turn_order: state.turn_order().entries().to_vec(),
            current,
            log: state.log().tail(CombatConfig::LOG_TAIL).to_vec(),
            abilities,
            result: state.result().cloned(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(RuntimeError::Snapshot)
    }

    pub fn view(&self, target: CombatantRef) -> Option<&CombatantView> {
        match target.side {
            Side::Player => self.players.get(target.index),
            Side::Enemy => self.enemies.get(target.index),
        }
    }
}
