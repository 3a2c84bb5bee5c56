use combat_client::{SimConfig, Simulator};

fn seeded(stage: Option<u32>, encounters: u32) -> SimConfig {
    SimConfig {
        seed: Some(7),
        stage,
        encounters,
        ..SimConfig::default()
    }
}

fn run(config: SimConfig) -> (combat_client::RunSummary, String) {
    let simulator = Simulator::builder().config(config).build().unwrap();
    let mut out = Vec::new();
    let summary = simulator.run(&mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn run_fights_the_stage_and_every_auftrag() {
    let (summary, output) = run(seeded(Some(1), 2));

    assert_eq!(summary.victories + summary.defeats, 3);
    assert_eq!(summary.auftrag_counter, 2);
    assert!(output.contains("== Story stage 1: The Goblin Camp =="), "{output}");
    assert!(output.contains("== Auftrag #1 =="), "{output}");
    assert!(output.contains("== Auftrag #2 =="), "{output}");
    assert!(output.matches("-> ").count() >= 3, "{output}");
}

#[test]
fn fixed_seed_replays_the_same_run() {
    let (first, first_log) = run(seeded(None, 3));
    let (second, second_log) = run(seeded(None, 3));

    assert_eq!(first, second);
    assert_eq!(first_log, second_log);
}

#[test]
fn missing_content_fails_to_build() {
    let config = SimConfig {
        data_dir: Some("/nonexistent/combat-content".into()),
        ..SimConfig::default()
    };
    assert!(Simulator::builder().config(config).build().is_err());

    let unknown_stage = seeded(Some(999), 0);
    assert!(Simulator::builder().config(unknown_stage).build().is_err());
    assert!(Simulator::builder().build().is_err());
}
