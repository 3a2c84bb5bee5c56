//! Command-line combat simulator.
//!
//! ```text
//! combat-sim (composition root)
//!   ├─→ SimConfig (environment)
//!   ├─→ ContentFactory (config, story stages, Auftrag table)
//!   ├─→ CombatSession (runtime) driven by the autopilot
//!   └─→ InMemoryProgression (rewards and loot across the run)
//! ```
pub mod autopilot;
pub mod config;
mod simulator;

pub use config::SimConfig;
pub use simulator::{RunSummary, Simulator, SimulatorBuilder, starter_profile};
