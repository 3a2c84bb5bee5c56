//! Combat simulator binary.
//!
//! Fights an optional story stage and a series of Auftrag encounters with
//! a scripted player, printing every combat log to stdout.
//!
//! ```bash
//! COMBAT_CLASS=Barbar COMBAT_LEVEL=8 COMBAT_SEED=7 cargo run -p combat-client
//! ```

use anyhow::Result;
use combat_client::{SimConfig, Simulator};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        class = %config.class,
        level = config.level,
        encounters = config.encounters,
        seed = ?config.seed,
        "starting simulator"
    );

    let simulator = Simulator::builder().config(config).build()?;
    let mut stdout = std::io::stdout().lock();
    let summary = simulator.run(&mut stdout)?;

    println!();
    println!(
        "{} victories, {} defeats over {} Auftrag encounters",
        summary.victories, summary.defeats, summary.auftrag_counter
    );
    println!(
        "earned {} xp, {} gold, {} essence, {} items",
        summary.rewards.experience,
        summary.rewards.currency,
        summary.rewards.essence,
        summary.loot.len()
    );
    Ok(())
}
