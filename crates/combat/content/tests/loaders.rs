use std::fs;

use combat_content::{AuftragLoader, ConfigLoader, ContentFactory, StoryLoader};
use combat_core::{CombatConfig, MonsterType};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "drop_chance_percent = 55\n");

    let config = ConfigLoader::load(&path).unwrap();
    assert_eq!(config.drop_chance_percent, 55);
    assert_eq!(
        config.smart_escalation_interval,
        CombatConfig::DEFAULT_SMART_ESCALATION_INTERVAL
    );
}

#[test]
fn out_of_range_config_is_rejected() {
    assert!(ConfigLoader::parse("drop_chance_percent = 101").is_err());
    assert!(ConfigLoader::parse("critical_roll = 0").is_err());
    assert!(ConfigLoader::parse("critical_roll = 19").is_ok());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
}

#[test]
fn story_round_trips_from_ron() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "story.ron",
        r#"[
            (id: 1, name: "Camp", tutorial: true, enemies: [(Goblin, 1)]),
            (id: 2, name: "Den", enemies: [(Wolf, 2), (Orc, 3)]),
        ]"#,
    );

    let stages = StoryLoader::load(&path).unwrap();
    assert_eq!(stages.len(), 2);
    assert!(stages[0].tutorial);
    assert!(!stages[1].tutorial);
    assert_eq!(stages[1].enemies, vec![(MonsterType::Wolf, 2), (MonsterType::Orc, 3)]);
}

#[test]
fn invalid_story_is_rejected() {
    let dir = TempDir::new().unwrap();
    let duplicate = write(
        &dir,
        "dup.ron",
        r#"[
            (id: 1, name: "A", enemies: [(Goblin, 1)]),
            (id: 1, name: "B", enemies: [(Goblin, 1)]),
        ]"#,
    );
    let err = StoryLoader::load(&duplicate).unwrap_err();
    assert!(err.to_string().contains("duplicate"), "{err}");

    let unknown = write(&dir, "unknown.ron", r#"[(id: 1, name: "A", enemies: [(Lich, 1)])]"#);
    assert!(StoryLoader::load(&unknown).is_err());

    assert!(StoryLoader::load(&dir.path().join("missing.ron")).is_err());
}

#[test]
fn auftrag_table_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "auftrag.toml",
        r#"
pool = ["Goblin", "Troll"]
min_enemies = 2
max_enemies = 2
"#,
    );

    let table = AuftragLoader::load(&path).unwrap();
    assert_eq!(table.pool, vec![MonsterType::Goblin, MonsterType::Troll]);
    assert_eq!(table.level_spread, 0);
    assert_eq!(table.elite_interval, 10);

    let bad = write(&dir, "bad.toml", "pool = []\nmin_enemies = 1\nmax_enemies = 1\n");
    assert!(AuftragLoader::load(&bad).is_err());
}
