use crate::action::EnemyAction;
use crate::env::{CombatEnv, context};
use crate::state::{CombatState, CombatantRef, Side};

use super::AiPolicy;

/// Uniformly random living target, basic attack only.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimplePolicy;

impl AiPolicy for SimplePolicy {
    fn decide(&self, state: &CombatState, env: &CombatEnv<'_>, enemy: usize) -> EnemyAction {
        let targets: Vec<CombatantRef> = state.living(Side::Player).collect();
        let seed = state.roll_seed(CombatantRef::enemy(enemy), context::AI_TARGET);
        let pick = env
            .rng()
            .pick_index(seed, targets.len())
            .unwrap_or_else(|| panic!("enemy {enemy} asked to act with no living players"));

        EnemyAction::Attack {
            target: targets[pick].index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CharacterClass, MonsterType};
    use crate::config::CombatConfig;
    use crate::env::RngOracle;
    use crate::state::{CombatKind, EnemyCombatant, PlayerCombatant, PlayerProfile};

    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn picks_among_living_players_only() {
        let player = |name: &str| {
            let profile = PlayerProfile::new(name, CharacterClass::Paladin, 1);
            PlayerCombatant::from_profile(&profile).unwrap()
        };
        let state = CombatState::new(
            CombatKind::Story { stage: 1 },
            vec![player("A").with_hp(0), player("B"), player("C")],
            vec![EnemyCombatant::spawn(MonsterType::Goblin, 1)],
        )
        .unwrap();
        let config = CombatConfig::default();

        let rng = FixedRng(0);
        let env = CombatEnv::new(&config, &rng);
        assert_eq!(SimplePolicy.decide(&state, &env, 0), EnemyAction::Attack { target: 1 });

        let rng = FixedRng(3);
        let env = CombatEnv::new(&config, &rng);
        assert_eq!(SimplePolicy.decide(&state, &env, 0), EnemyAction::Attack { target: 2 });
    }
}
