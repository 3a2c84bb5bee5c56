//! Validation and application of actions.
//!
//! `plan_*` validates a request against the current state without mutating
//! anything, so a rejected request leaves the combat untouched. `apply`
//! executes a validated plan and appends exactly one log entry.

use core::fmt::Write as _;

use crate::catalog::{AbilityCost, AbilityDef, AbilityId, Healing, PassiveKind, TargetType};
use crate::env::{CombatEnv, context};
use crate::state::{
    Availability, CombatState, Combatant, CombatantRef, LogKind, Side, Vital, Vitals,
};

use super::{
    ActionError, ActionOutcome, AttackRoll, EnemyAction, Impact, PlayerAction, Resolution,
};

/// A validated action with concrete targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    Attack {
        target: CombatantRef,
    },
    Ability {
        ability: AbilityId,
        targets: Vec<CombatantRef>,
    },
    Passive {
        passive: PassiveKind,
        target: CombatantRef,
    },
}

fn view(state: &CombatState, combatant: CombatantRef) -> Combatant<'_> {
    state
        .combatant(combatant)
        .unwrap_or_else(|| panic!("{combatant} is not in the roster"))
}

fn check_target(state: &CombatState, target: CombatantRef) -> Result<CombatantRef, ActionError> {
    let combatant = state.combatant(target).ok_or(ActionError::TargetNotFound)?;
    if !combatant.is_alive() {
        return Err(ActionError::TargetDead);
    }
    Ok(target)
}

/// Expands a target type into concrete living targets.
fn resolve_targets(
    state: &CombatState,
    actor: CombatantRef,
    target_type: TargetType,
    target: Option<usize>,
) -> Result<Vec<CombatantRef>, ActionError> {
    let opposing = actor.side.opposite();
    let targets = match target_type {
        TargetType::SingleEnemy => {
            let index = target.ok_or(ActionError::InvalidTarget)?;
            vec![check_target(state, CombatantRef { side: opposing, index })?]
        }
        TargetType::AllEnemies => state.living(opposing).collect(),
        TargetType::OnSelf => vec![actor],
        TargetType::Ally => {
            let index = target.unwrap_or(actor.index);
            vec![check_target(state, CombatantRef { side: actor.side, index })?]
        }
        TargetType::AllAllies => state.living(actor.side).collect(),
    };
    Ok(targets)
}

pub(crate) fn plan_player(
    state: &CombatState,
    player: usize,
    action: PlayerAction,
) -> Result<Plan, ActionError> {
    let actor = CombatantRef::player(player);
    let combatant = state
        .player(player)
        .unwrap_or_else(|| panic!("{actor} is not in the roster"));
    if !combatant.is_alive() {
        return Err(ActionError::ActorDead);
    }

    match action {
        PlayerAction::Attack { target } => Ok(Plan::Attack {
            target: check_target(state, CombatantRef::enemy(target))?,
        }),

        PlayerAction::Ability { ability, target } => {
            if !combatant.loadout().contains(ability) {
                return Err(ActionError::AbilityNotEquipped);
            }
            let def = ability.definition();
            if combatant.level() < def.level_requirement {
                return Err(ActionError::LevelTooLow {
                    required: def.level_requirement,
                    level: combatant.level(),
                });
            }
            match state.availability(player, ability) {
                Availability::Ready => {}
                Availability::Cooldown { remaining } => {
                    return Err(ActionError::OnCooldown { remaining });
                }
                Availability::MissingMana {
                    required,
                    available,
                } => {
                    return Err(ActionError::InsufficientMana {
                        required,
                        available,
                    });
                }
            }
            let targets = resolve_targets(state, actor, def.target, target)?;
            Ok(Plan::Ability { ability, targets })
        }

        PlayerAction::Passive { passive, target } => {
            let pool = combatant
                .loadout()
                .passive(passive)
                .ok_or(ActionError::AbilityNotEquipped)?;
            if pool.remaining == 0 {
                return Err(ActionError::PassiveExhausted);
            }

            let target = match (passive.targets_ally(), target) {
                (true, target) => {
                    check_target(state, CombatantRef::player(target.unwrap_or(player)))?
                }
                (false, Some(index)) if index != player => return Err(ActionError::InvalidTarget),
                (false, _) => actor,
            };
            if passive == PassiveKind::CleansingTouch
                && !view(state, target).effects().has_harmful()
            {
                return Err(ActionError::NothingToCleanse);
            }
            Ok(Plan::Passive { passive, target })
        }
    }
}

pub(crate) fn plan_enemy(
    state: &CombatState,
    enemy: usize,
    action: EnemyAction,
) -> Result<Plan, ActionError> {
    let actor = CombatantRef::enemy(enemy);
    let combatant = state
        .enemy(enemy)
        .unwrap_or_else(|| panic!("{actor} is not in the roster"));
    if !combatant.is_alive() {
        return Err(ActionError::ActorDead);
    }

    match action {
        EnemyAction::Attack { target } => Ok(Plan::Attack {
            target: check_target(state, CombatantRef::player(target))?,
        }),
        EnemyAction::Ability { ability, target } => {
            let slot = combatant
                .abilities()
                .iter()
                .find(|slot| slot.ability == ability)
                .ok_or(ActionError::AbilityNotEquipped)?;
            if !slot.is_ready() {
                return Err(ActionError::OnCooldown {
                    remaining: slot.cooldown,
                });
            }
            let id = slot.id();
            let targets = resolve_targets(state, actor, id.definition().target, target)?;
            Ok(Plan::Ability {
                ability: id,
                targets,
            })
        }
    }
}

/// Executes a validated plan and logs it.
///
/// # Panics
///
/// Panics if the combat has already ended.
pub(crate) fn apply(
    state: &mut CombatState,
    env: &CombatEnv<'_>,
    actor: CombatantRef,
    plan: Plan,
) -> ActionOutcome {
    assert!(!state.is_ended(), "resolving {plan:?} after the combat ended");

    let outcome = match plan {
        Plan::Attack { target } => apply_attack(state, env, actor, target),
        Plan::Ability { ability, targets } => apply_ability(state, actor, ability, &targets),
        Plan::Passive { passive, target } => apply_passive(state, actor, passive, target),
    };

    let important = outcome.lethal()
        || state.side_defeated(Side::Player)
        || state.side_defeated(Side::Enemy);
    let message = describe(state, &outcome);
    state.push_log(LogKind::Action, Some(actor), message, important);

    outcome
}

fn apply_attack(
    state: &mut CombatState,
    env: &CombatEnv<'_>,
    actor: CombatantRef,
    target: CombatantRef,
) -> ActionOutcome {
    let attacker = view(state, actor);
    let bonus = attacker.attack_bonus();
    let damage = attacker.effects().scale_damage(attacker.basic_damage());
    let armor_class = view(state, target).armor_class();

    let roll = env
        .rng()
        .roll_die(state.roll_seed(actor, context::ATTACK_ROLL), 20);
    let total = roll as i32 + bonus;

    let attack = if roll == 1 {
        AttackRoll::Miss { roll, total }
    } else if roll >= env.config().critical_roll {
        AttackRoll::Critical { roll }
    } else if total >= armor_class {
        AttackRoll::Hit { roll, total }
    } else {
        AttackRoll::Miss { roll, total }
    };

    let mut impact = Impact::on(target);
    match attack {
        AttackRoll::Critical { .. } => {
            impact.damage = state.vitals_mut(target).apply_damage(damage * 2);
        }
        AttackRoll::Hit { .. } => {
            impact.damage = state.vitals_mut(target).apply_damage(damage);
        }
        AttackRoll::Miss { .. } => {}
    }

    ActionOutcome {
        actor,
        resolution: Resolution::Attack(attack),
        impacts: vec![impact],
    }
}

fn pay_cost(state: &mut CombatState, actor: CombatantRef, ability: AbilityId, def: &AbilityDef) {
    match (actor.side, def.cost) {
        (Side::Player, AbilityCost::ManaCost(cost)) => {
            let paid = state.players[actor.index].mana.spend(cost);
            assert!(paid, "{actor} cannot afford {} after validation", def.name);
        }
        (Side::Player, AbilityCost::CooldownRounds(rounds)) => {
            state.cooldowns.set(actor.index, ability, rounds);
        }
        (Side::Enemy, _) => {
            if let AbilityId::Monster(monster_ability) = ability {
                if let Some(slot) = state.enemies[actor.index].ability_mut(monster_ability) {
                    slot.cooldown = def.cooldown();
                }
            }
        }
    }
}

fn heal(vitals: &mut Vitals, healing: Healing) -> u32 {
    match healing {
        Healing::None => 0,
        Healing::Amount(amount) => vitals.heal(amount),
        Healing::Full => vitals.heal_full(),
    }
}

fn apply_ability(
    state: &mut CombatState,
    actor: CombatantRef,
    ability: AbilityId,
    targets: &[CombatantRef],
) -> ActionOutcome {
    let def = ability.definition();
    let caster = view(state, actor);
    let level = caster.level();
    let damage = caster.effects().scale_damage(def.scaled_damage(level));
    let healing = def.scaled_healing(level);
    let temp_hp = def.scaled_temp_hp(level);
    let duration = def.scaled_duration(level);
    let effect = ability.effect(level).filter(|_| duration > 0);

    pay_cost(state, actor, ability, &def);

    let mut impacts = Vec::with_capacity(targets.len() + 1);
    if def.target.is_hostile() {
        for &target in targets {
            let mut impact = Impact::on(target);
            if damage > 0 {
                impact.damage = state.vitals_mut(target).apply_damage(damage);
            }
            if let Some(kind) = effect {
                if state.is_alive(target) {
                    state.effects_mut(target).apply(kind, duration);
                    impact.effect = Some(kind);
                }
            }
            impacts.push(impact);
        }
        // Drain: healing on a hostile ability restores the caster.
        if healing != Healing::None {
            let mut impact = Impact::on(actor);
            impact.healed = heal(state.vitals_mut(actor), healing);
            impacts.push(impact);
        }
    } else {
        for &target in targets {
            let mut impact = Impact::on(target);
            impact.healed = heal(state.vitals_mut(target), healing);
            if temp_hp > 0 {
                impact.temp_hp = state.vitals_mut(target).grant_temp_hp(temp_hp);
            }
            if let Some(kind) = effect {
                state.effects_mut(target).apply(kind, duration);
                impact.effect = Some(kind);
            }
            impacts.push(impact);
        }
    }

    ActionOutcome {
        actor,
        resolution: Resolution::Ability(ability),
        impacts,
    }
}

fn apply_passive(
    state: &mut CombatState,
    actor: CombatantRef,
    passive: PassiveKind,
    target: CombatantRef,
) -> ActionOutcome {
    let player = &state.players[actor.index];
    let level = player.level();
    let pool = player.loadout().passive(passive).map_or(0, |pool| pool.remaining);

    let mut impact = Impact::on(target);
    let spent = match passive {
        PassiveKind::LayOnHands => {
            let vitals = state.vitals_mut(target);
            let amount = pool.min(vitals.missing_hp());
            impact.healed = vitals.heal(amount);
            impact.healed
        }
        PassiveKind::CleansingTouch => {
            impact.cleansed = state.effects_mut(target).cleanse();
            1
        }
        PassiveKind::SecondWind => {
            impact.healed = state.vitals_mut(target).heal(5 + level);
            1
        }
    };

    if let Some(pool) = state.players[actor.index].loadout_mut().passive_mut(passive) {
        pool.remaining = pool.remaining.saturating_sub(spent);
    }

    ActionOutcome {
        actor,
        resolution: Resolution::Passive(passive),
        impacts: vec![impact],
    }
}

fn describe(state: &CombatState, outcome: &ActionOutcome) -> String {
    let actor = state.name_of(outcome.actor);
    let mut message = match outcome.resolution {
        Resolution::Attack(attack) => {
            let impact = &outcome.impacts[0];
            let target = state.name_of(impact.target);
            let dealt = impact.damage.total();
            match attack {
                AttackRoll::Hit { .. } => format!("{actor} hits {target} for {dealt} damage"),
                AttackRoll::Critical { .. } => {
                    format!("{actor} lands a critical hit on {target} for {dealt} damage")
                }
                AttackRoll::Miss { roll, total } => {
                    format!("{actor} misses {target} (rolled {roll}, total {total})")
                }
            }
        }
        Resolution::Ability(ability) => format!("{actor} uses {}", ability.name()),
        Resolution::Passive(passive) => format!("{actor} uses {}", passive.name()),
    };

    if !matches!(outcome.resolution, Resolution::Attack(_)) {
        for impact in &outcome.impacts {
            let target = state.name_of(impact.target);
            if impact.damage.total() > 0 {
                let _ = write!(message, "; {target} takes {} damage", impact.damage.total());
            }
            if impact.healed > 0 {
                let _ = write!(message, "; {target} recovers {} HP", impact.healed);
            }
            if impact.temp_hp > 0 {
                let _ = write!(message, "; {target} gains {} temp HP", impact.temp_hp);
            }
            if let Some(effect) = impact.effect {
                let _ = write!(message, "; {target} is affected by {effect:?}");
            }
            if impact.cleansed > 0 {
                let _ = write!(message, "; {target} is cleansed");
            }
        }
    }

    for impact in outcome.impacts.iter().filter(|impact| impact.damage.lethal) {
        let _ = write!(message, "; {} is defeated", state.name_of(impact.target));
    }

    message
}
