//! Tactical policy.
//!
//! Every option (each ready ability and the basic attack) gets a [`Score`].
//! Options are ranked by priority tier first, then by expected value:
//!
//! 1. healing, when the enemy is below the heal threshold
//! 2. damage abilities, by total expected damage
//! 3. basic attack
//!
//! Abilities that neither damage nor heal are never chosen.
//!
//! Single targets are always the living player with the lowest current HP,
//! ties going to the earlier roster index.

use crate::action::EnemyAction;
use crate::catalog::{Healing, TargetType};
use crate::env::CombatEnv;
use crate::state::{CombatState, CombatantRef, EnemyCombatant, Side, Vital};

use super::AiPolicy;

/// Utility score of one option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    /// Can this option be executed right now?
    pub is_possible: bool,
    /// Tier; higher tiers always win.
    pub priority: u32,
    /// Expected damage or healing within the tier.
    pub expected: u32,
}

impl Score {
    pub const HEAL: u32 = 3;
    pub const DAMAGE: u32 = 2;
    pub const ATTACK: u32 = 0;

    pub const fn new(priority: u32, expected: u32) -> Self {
        Self {
            is_possible: true,
            priority,
            expected,
        }
    }

    pub const fn impossible() -> Self {
        Self {
            is_possible: false,
            priority: 0,
            expected: 0,
        }
    }

    /// Ordering key; impossible options never win.
    pub const fn key(&self) -> Option<(u32, u32)> {
        if self.is_possible {
            Some((self.priority, self.expected))
        } else {
            None
        }
    }
}

/// Lowest-HP targeting with ability preference.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmartPolicy;

impl SmartPolicy {
    /// Living player with the lowest current HP; first in roster order on ties.
    pub fn weakest_player(state: &CombatState) -> Option<CombatantRef> {
        state
            .living(Side::Player)
            .min_by_key(|&player| {
                let hp = state.combatant(player).map_or(u32::MAX, |c| c.hp());
                (hp, player.index)
            })
    }

    fn score_ability(
        state: &CombatState,
        enemy: &EnemyCombatant,
        heal_threshold: u32,
        slot_index: usize,
    ) -> Score {
        let slot = enemy.abilities()[slot_index];
        if !slot.is_ready() {
            return Score::impossible();
        }
        let def = slot.id().definition();
        let level = enemy.level();

        if def.target.is_hostile() && def.base_damage > 0 {
            let hits = match def.target {
                TargetType::AllEnemies => state.living(Side::Player).count() as u32,
                _ => 1,
            };
            let per_target = enemy.effects().scale_damage(def.scaled_damage(level));
            return Score::new(Score::DAMAGE, per_target * hits);
        }

        if !def.target.is_hostile() && def.heals() {
            let missing = enemy.vitals().missing_hp();
            let expected = match def.scaled_healing(level) {
                Healing::Amount(amount) => amount.min(missing),
                Healing::Full => missing,
                Healing::None => 0,
            };
            if enemy.vitals().hp_percent() < heal_threshold {
                return Score::new(Score::HEAL, expected);
            }
        }

        Score::impossible()
    }
}

impl AiPolicy for SmartPolicy {
    fn decide(&self, state: &CombatState, env: &CombatEnv<'_>, enemy: usize) -> EnemyAction {
        let target = Self::weakest_player(state)
            .unwrap_or_else(|| panic!("enemy {enemy} asked to act with no living players"));
        let combatant = state
            .enemy(enemy)
            .unwrap_or_else(|| panic!("enemy {enemy} is not in the roster"));

        let attack = EnemyAction::Attack {
            target: target.index,
        };
        let mut best = (attack, Score::new(Score::ATTACK, combatant.basic_damage()));

        for (slot_index, slot) in combatant.abilities().iter().enumerate() {
            let score = Self::score_ability(
                state,
                combatant,
                env.config().smart_heal_threshold_percent,
                slot_index,
            );
            tracing::debug!(
                enemy,
                ability = slot.id().name(),
                possible = score.is_possible,
                priority = score.priority,
                expected = score.expected,
                "smart option"
            );
            if score.key() > best.1.key() {
                let target = match slot.id().definition().target {
                    TargetType::SingleEnemy => Some(target.index),
                    TargetType::Ally => Some(enemy),
                    TargetType::AllEnemies | TargetType::OnSelf | TargetType::AllAllies => None,
                };
                best = (
                    EnemyAction::Ability {
                        ability: slot.ability,
                        target,
                    },
                    score,
                );
            }
        }

        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterClass, MonsterAbility, MonsterType};
    use crate::config::CombatConfig;
    use crate::env::PcgRng;
    use crate::state::{CombatKind, PlayerCombatant, PlayerProfile};

    fn player(hp: u32) -> PlayerCombatant {
        let profile = PlayerProfile::new("P", CharacterClass::Barbar, 5);
        let player = PlayerCombatant::from_profile(&profile).unwrap();
        let max = player.max_hp();
        player.with_hp(max * hp / 100)
    }

    fn combat(players: Vec<PlayerCombatant>, enemy: EnemyCombatant) -> CombatState {
        CombatState::new(CombatKind::Story { stage: 1 }, players, vec![enemy]).unwrap()
    }

    #[test]
    fn targets_lowest_hp_player() {
        let state = combat(
            vec![player(80), player(20)],
            EnemyCombatant::spawn(MonsterType::Orc, 1),
        );
        assert_eq!(SmartPolicy::weakest_player(&state), Some(CombatantRef::player(1)));
    }

    #[test]
    fn ties_go_to_first_in_roster() {
        let state = combat(
            vec![player(50), player(50)],
            EnemyCombatant::spawn(MonsterType::Orc, 1),
        );
        assert_eq!(SmartPolicy::weakest_player(&state), Some(CombatantRef::player(0)));
    }

    #[test]
    fn prefers_ready_damage_ability() {
        let state = combat(
            vec![player(80), player(20)],
            EnemyCombatant::spawn(MonsterType::Orc, 1),
        );
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(
            SmartPolicy.decide(&state, &env, 0),
            EnemyAction::Ability {
                ability: MonsterAbility::Cleave,
                target: Some(1),
            }
        );
    }

    #[test]
    fn falls_back_to_attack_when_abilities_cool_down() {
        let mut orc = EnemyCombatant::spawn(MonsterType::Orc, 1);
        orc.abilities[0].cooldown = 2;
        let state = combat(vec![player(80), player(20)], orc);
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(SmartPolicy.decide(&state, &env, 0), EnemyAction::Attack { target: 1 });
    }

    #[test]
    fn heals_when_below_threshold() {
        let troll = EnemyCombatant::spawn(MonsterType::Troll, 1).with_hp(10);
        let state = combat(vec![player(100)], troll);
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(
            SmartPolicy.decide(&state, &env, 0),
            EnemyAction::Ability {
                ability: MonsterAbility::Regenerate,
                target: None,
            }
        );
    }

    #[test]
    fn buff_only_monsters_attack() {
        let state = combat(vec![player(100)], EnemyCombatant::spawn(MonsterType::Skeleton, 1));
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(SmartPolicy.decide(&state, &env, 0), EnemyAction::Attack { target: 0 });
    }

    #[test]
    fn wolf_attacks_while_bite_cools_down() {
        let mut wolf = EnemyCombatant::spawn(MonsterType::Wolf, 1);
        wolf.abilities[0].cooldown = 1;
        let state = combat(vec![player(100)], wolf);
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(SmartPolicy.decide(&state, &env, 0), EnemyAction::Attack { target: 0 });
    }

    #[test]
    fn healthy_troll_cleaves() {
        let state = combat(vec![player(100)], EnemyCombatant::spawn(MonsterType::Troll, 1));
        let config = CombatConfig::default();
        let env = CombatEnv::new(&config, &PcgRng);

        assert_eq!(
            SmartPolicy.decide(&state, &env, 0),
            EnemyAction::Ability {
                ability: MonsterAbility::Cleave,
                target: Some(0),
            }
        );
    }
}
