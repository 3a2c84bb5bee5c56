//! Scripted player decisions for unattended runs.
//!
//! Priorities, first match wins:
//! 1. Below [`HEAL_THRESHOLD_PERCENT`] HP: a ready healing ability, else a
//!    healing passive with charges left.
//! 2. The ready damaging ability with the highest expected total damage.
//! 3. A basic attack on the enemy with the least HP.

use std::cmp::Reverse;

use combat_core::{
    CombatState, PassiveKind, PlayerAction, PlayerCombatant, Side, TargetType, Vital,
};

pub const HEAL_THRESHOLD_PERCENT: u32 = 40;

/// Picks an action for `player`, or `None` if the player is missing or no
/// enemy is left standing.
pub fn choose_action(state: &CombatState, player: usize) -> Option<PlayerAction> {
    let me = state.player(player)?;
    let weakest = weakest_enemy(state)?;

    if me.vitals().hp_percent() < HEAL_THRESHOLD_PERCENT {
        if let Some(action) = heal(state, player, me) {
            return Some(action);
        }
    }

    Some(strongest_attack(state, player, me, weakest).unwrap_or(PlayerAction::attack(weakest)))
}

fn weakest_enemy(state: &CombatState) -> Option<usize> {
    state
        .living(Side::Enemy)
        .filter_map(|target| state.enemy(target.index).map(|enemy| (target.index, enemy.hp())))
        .min_by_key(|&(index, hp)| (hp, index))
        .map(|(index, _)| index)
}

fn heal(state: &CombatState, player: usize, me: &PlayerCombatant) -> Option<PlayerAction> {
    let ability = state
        .ability_status(player)
        .into_iter()
        .filter(|status| status.availability.is_ready())
        .map(|status| status.ability)
        .find(|ability| {
            let def = ability.definition();
            def.heals() && !def.target.is_hostile()
        });

    if let Some(ability) = ability {
        let target = ability.definition().target.needs_target().then_some(player);
        return Some(PlayerAction::ability(ability, target));
    }

    me.loadout()
        .passives()
        .iter()
        .filter(|pool| pool.remaining > 0)
        .find(|pool| matches!(pool.kind, PassiveKind::LayOnHands | PassiveKind::SecondWind))
        .map(|pool| PlayerAction::passive(pool.kind, pool.kind.targets_ally().then_some(player)))
}

fn strongest_attack(
    state: &CombatState,
    player: usize,
    me: &PlayerCombatant,
    weakest: usize,
) -> Option<PlayerAction> {
    let living = state.living(Side::Enemy).count() as u32;

    state
        .ability_status(player)
        .into_iter()
        .filter(|status| status.availability.is_ready())
        .map(|status| status.ability)
        .filter_map(|ability| {
            let def = ability.definition();
            let damage = def.scaled_damage(me.level());
            let expected = match def.target {
                TargetType::SingleEnemy => damage,
                TargetType::AllEnemies => damage * living,
                _ => 0,
            };
            (expected > 0).then_some((ability, expected))
        })
        // earliest loadout slot wins ties
        .min_by_key(|&(_, expected)| Reverse(expected))
        .map(|(ability, _)| {
            let target = ability.definition().target.needs_target().then_some(weakest);
            PlayerAction::ability(ability, target)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        AbilityId, BarbarAbility, CharacterClass, CombatKind, EnemyCombatant, MonsterType,
        PaladinAbility, PlayerProfile,
    };

    const SMITE: AbilityId = AbilityId::Paladin(PaladinAbility::DivineSmite);
    const HEALING_WORD: AbilityId = AbilityId::Paladin(PaladinAbility::HealingWord);
    const CONSECRATION: AbilityId = AbilityId::Paladin(PaladinAbility::Consecration);

    fn paladin(abilities: &[AbilityId]) -> PlayerCombatant {
        let profile = PlayerProfile::new("Ada", CharacterClass::Paladin, 5)
            .with_abilities(abilities.iter().copied());
        PlayerCombatant::from_profile(&profile).unwrap()
    }

    fn state(player: PlayerCombatant, enemies: &[MonsterType]) -> CombatState {
        let enemies = enemies
            .iter()
            .map(|&monster| EnemyCombatant::spawn(monster, 1))
            .collect();
        CombatState::new(CombatKind::Story { stage: 1 }, vec![player], enemies).unwrap()
    }

    #[test]
    fn area_damage_wins_against_a_group() {
        let state = state(
            paladin(&[SMITE, HEALING_WORD, CONSECRATION]),
            &[MonsterType::Goblin, MonsterType::Goblin],
        );
        assert_eq!(
            choose_action(&state, 0),
            Some(PlayerAction::ability(CONSECRATION, None))
        );
    }

    #[test]
    fn single_target_damage_wins_against_one_enemy() {
        let state = state(paladin(&[CONSECRATION, SMITE]), &[MonsterType::Goblin]);
        assert_eq!(
            choose_action(&state, 0),
            Some(PlayerAction::ability(SMITE, Some(0)))
        );
    }

    #[test]
    fn low_health_heals_first() {
        let player = paladin(&[SMITE, HEALING_WORD]).with_hp(5);
        let state = state(player, &[MonsterType::Goblin]);
        assert_eq!(
            choose_action(&state, 0),
            Some(PlayerAction::ability(HEALING_WORD, Some(0)))
        );
    }

    #[test]
    fn low_health_falls_back_to_a_passive() {
        let profile = PlayerProfile::new("Brakka", CharacterClass::Barbar, 1)
            .with_abilities([AbilityId::Barbar(BarbarAbility::RecklessStrike)]);
        let player = PlayerCombatant::from_profile(&profile).unwrap().with_hp(1);
        let state = state(player, &[MonsterType::Goblin]);
        assert_eq!(
            choose_action(&state, 0),
            Some(PlayerAction::passive(PassiveKind::SecondWind, None))
        );
    }

    #[test]
    fn basic_attack_hits_the_weakest_enemy() {
        let state = state(paladin(&[]), &[MonsterType::Skeleton, MonsterType::Goblin]);
        assert_eq!(choose_action(&state, 0), Some(PlayerAction::attack(1)));
        assert_eq!(choose_action(&state, 3), None);
    }
}
