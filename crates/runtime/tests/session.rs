use combat_content::{AuftragTable, StoryStage};
use combat_core::{
    AbilityId, ActionError, AttributeScores, CharacterClass, CombatError, CombatKind, CombatPhase,
    ErrorSeverity, MonsterType, PaladinAbility, PlayerAction, PlayerProfile, Rewards, RngOracle,
    Side,
};
use runtime::{CombatSession, CombatSnapshot, InMemoryProgression, ProgressionService, RuntimeError};

struct FixedRng(u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

const SMITE: AbilityId = AbilityId::Paladin(PaladinAbility::DivineSmite);

fn paladin(level: u32) -> InMemoryProgression {
    let profile = PlayerProfile::new("Ada", CharacterClass::Paladin, level)
        .with_attributes(AttributeScores::new(14, 20, 14, 10, 10, 14))
        .with_abilities([SMITE]);
    InMemoryProgression::new(profile)
}

fn goblin_camp() -> StoryStage {
    StoryStage {
        id: 1,
        name: "Goblin Camp".into(),
        tutorial: true,
        enemies: vec![(MonsterType::Goblin, 1)],
    }
}

#[test]
fn story_session_commits_rewards_once() {
    let mut progression = paladin(16);
    let mut session = CombatSession::builder()
        .seed(5)
        // d100 = 100: no loot
        .rng(FixedRng(99))
        .story(&goblin_camp(), &progression)
        .unwrap();

    assert!(session.state().is_tutorial());
    assert!(matches!(
        session.finish(&mut progression),
        Err(RuntimeError::CombatInProgress)
    ));

    session
        .submit_player_action(PlayerAction::ability(SMITE, Some(0)))
        .unwrap();
    assert!(session.is_ended());

    let expected = MonsterType::Goblin.template().rewards(1);
    let result = session.finish(&mut progression).unwrap();
    assert!(result.victory());
    assert_eq!(result.rewards(), expected);
    assert!(session.is_committed());

    assert!(matches!(
        session.finish(&mut progression),
        Err(RuntimeError::AlreadyCommitted)
    ));
    assert_eq!(progression.totals(), expected);
    assert_eq!(progression.victories(), 1);
    assert!(progression.inventory().is_empty());
}

#[test]
fn auftrag_session_advances_the_counter() {
    let mut progression = paladin(4).with_auftrag_counter(9);
    let table = AuftragTable {
        pool: vec![MonsterType::Goblin],
        min_enemies: 1,
        max_enemies: 2,
        level_spread: 0,
        elite_interval: 10,
    };

    let session = CombatSession::builder()
        .seed(11)
        .rng(FixedRng(0))
        .auftrag(&table, &mut progression)
        .unwrap();

    assert_eq!(progression.auftrag_counter(), 10);
    assert_eq!(session.state().kind(), CombatKind::Auftrag { counter: 10 });
    assert_eq!(session.state().seed(), 11);
    // one rolled goblin plus the elite
    assert_eq!(session.state().enemies().len(), 2);

    // abandoning the session leaves progression untouched
    drop(session);
    assert_eq!(progression.totals(), Rewards::default());
}

#[test]
fn invalid_table_is_rejected_before_counting() {
    let mut progression = paladin(1);
    let table = AuftragTable {
        pool: vec![],
        ..AuftragTable::default()
    };

    let err = CombatSession::builder()
        .auftrag(&table, &mut progression)
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Encounter(_)));
    assert_eq!(progression.auftrag_counter(), 0);
}

#[test]
fn rejected_actions_are_recoverable_errors() {
    let progression = paladin(1);
    let stage = StoryStage {
        enemies: vec![(MonsterType::Troll, 1)],
        ..goblin_camp()
    };
    let mut session = CombatSession::builder()
        .rng(FixedRng(0))
        .story(&stage, &progression)
        .unwrap();

    session
        .submit_player_action(PlayerAction::ability(SMITE, Some(0)))
        .unwrap();
    session.advance_enemy_turn().unwrap();
    let err = session
        .submit_player_action(PlayerAction::ability(SMITE, Some(0)))
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Action(ActionError::OnCooldown { remaining: 1 })
    ));
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    assert_eq!(err.error_code(), "ACTION_ON_COOLDOWN");
}

#[test]
fn snapshot_describes_the_acting_player() {
    let progression = paladin(3);
    let session = CombatSession::builder()
        .seed(2)
        .story(&goblin_camp(), &progression)
        .unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, CombatPhase::InProgress);
    assert_eq!(snapshot.round, 1);
    assert_eq!(snapshot.turn_order.len(), 2);
    assert_eq!(snapshot.current.map(|actor| actor.side), Some(Side::Player));
    assert_eq!(snapshot.abilities.len(), 1);
    assert!(snapshot.abilities[0].availability.is_ready());
    assert_eq!(snapshot.log.len(), 1);

    let player = &snapshot.players[0];
    assert!(player.mana.is_some());
    assert_eq!(player.hp, player.max_hp);
    assert!(snapshot.enemies[0].mana.is_none());

    let json = snapshot.to_json().unwrap();
    let decoded: CombatSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn snapshot_log_is_capped() {
    let progression = paladin(10);
    let stage = StoryStage {
        enemies: vec![(MonsterType::Dragon, 20)],
        ..goblin_camp()
    };
    let mut session = CombatSession::builder()
        .seed(3)
        .story(&stage, &progression)
        .unwrap();

    for _ in 0..60 {
        if session.is_ended() {
            break;
        }
        if session.is_player_turn() {
            session.submit_player_action(PlayerAction::attack(0)).unwrap();
        } else {
            session.advance_enemy_turn().unwrap();
        }
    }

    let snapshot = session.snapshot();
    let total = session.state().log().len();
    assert_eq!(snapshot.log.len(), total.min(combat_core::CombatConfig::LOG_TAIL));
    assert_eq!(snapshot.log.last(), session.state().log().last());
}

#[test]
fn full_auftrag_run_reaches_a_result() {
    let mut progression = paladin(6);
    let table = AuftragTable::default();

    for _ in 0..5 {
        let mut session = CombatSession::builder()
            .auftrag(&table, &mut progression)
            .unwrap();

        let mut steps = 0;
        while !session.is_ended() {
            assert!(steps < 1_000, "combat did not finish");
            if session.is_player_turn() {
                let target = session
                    .state()
                    .living(Side::Enemy)
                    .next()
                    .map(|enemy| enemy.index)
                    .unwrap();
                session.submit_player_action(PlayerAction::attack(target)).unwrap();
            } else {
                session.advance_enemy_turn().unwrap();
            }
            steps += 1;
        }
        session.finish(&mut progression).unwrap();
    }

    assert_eq!(progression.auftrag_counter(), 5);
    assert_eq!(progression.victories() + progression.defeats(), 5);
}
