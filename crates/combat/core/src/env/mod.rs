//! Read-only collaborators injected into the engine.
//!
//! The [`CombatEnv`] bundles the tunable configuration and the RNG oracle so
//! the engine, the AI policy, and the loot generator never reach for ambient
//! global state.
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::config::CombatConfig;

/// Aggregates read-only collaborators required by the engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    config: &'a CombatConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
