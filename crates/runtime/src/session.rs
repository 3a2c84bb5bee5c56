//! Session orchestration for one combat.
//!
//! A [`CombatSession`] owns the combat state together with its config and
//! RNG oracle, and exposes the request/response surface a presentation layer
//! drives: submit a player action, step an enemy turn, read a snapshot.
//! Dropping a session abandons the combat without touching progression.

use combat_content::{AuftragTable, StoryStage, auftrag_combat};
use combat_core::{
    ActionOutcome, CombatConfig, CombatEngine, CombatEnv, CombatResult, CombatState, PcgRng,
    PlayerAction, PlayerCombatant, RngOracle, ai,
};

use crate::api::{Result, RuntimeError};
use crate::progression::ProgressionService;
use crate::snapshot::CombatSnapshot;

/// A running combat and the collaborators it needs.
pub struct CombatSession {
    state: CombatState,
    config: CombatConfig,
    rng: Box<dyn RngOracle + Send + Sync>,
    committed: bool,
}

impl CombatSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Starts a prepared combat.
    pub fn start(
        mut state: CombatState,
        config: CombatConfig,
        rng: Box<dyn RngOracle + Send + Sync>,
    ) -> Result<Self> {
        CombatEngine::new(&mut state, CombatEnv::new(&config, &*rng)).start()?;
        Ok(Self {
            state,
            config,
            rng,
            committed: false,
        })
    }

    fn engine(&mut self) -> CombatEngine<'_> {
        CombatEngine::new(&mut self.state, CombatEnv::new(&self.config, &*self.rng))
    }

    pub fn submit_player_action(&mut self, action: PlayerAction) -> Result<ActionOutcome> {
        let outcome = self.engine().submit_player_action(action)?;
        Ok(outcome)
    }

    pub fn advance_enemy_turn(&mut self) -> Result<ActionOutcome> {
        let outcome = self.engine().advance_enemy_turn()?;
        Ok(outcome)
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot::capture(&self.state)
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn is_player_turn(&self) -> bool {
        self.state.is_player_turn()
    }

    pub fn result(&self) -> Option<&CombatResult> {
        self.state.result()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Writes the result into the progression service.
    ///
    /// Fails while the combat is running and on a second call.
    pub fn finish(&mut self, progression: &mut impl ProgressionService) -> Result<CombatResult> {
        let result = self
            .state
            .result()
            .cloned()
            .ok_or(RuntimeError::CombatInProgress)?;
        if self.committed {
            return Err(RuntimeError::AlreadyCommitted);
        }

        progression.commit_rewards(&result)?;
        self.committed = true;
        Ok(result)
    }
}

impl std::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatSession")
            .field("kind", &self.state.kind())
            .field("phase", &self.state.phase())
            .field("round", &self.state.round())
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CombatSession`].
pub struct SessionBuilder {
    config: CombatConfig,
    seed: Option<u64>,
    rng: Option<Box<dyn RngOracle + Send + Sync>>,
    party: Vec<PlayerCombatant>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: CombatConfig::default(),
            seed: None,
            rng: None,
            party: Vec::new(),
        }
    }

    /// Override combat configuration.
    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the combat seed. A random seed is drawn otherwise.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the RNG oracle. Defaults to [`PcgRng`].
    pub fn rng(mut self, rng: impl RngOracle + Send + Sync + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Add party members fighting next to the progression player.
    pub fn companion(mut self, companion: PlayerCombatant) -> Self {
        self.party.push(companion);
        self
    }

    fn players(&self, progression: &impl ProgressionService) -> Result<Vec<PlayerCombatant>> {
        let lead = PlayerCombatant::from_profile(&progression.player_profile())?;
        Ok(std::iter::once(lead).chain(self.party.iter().cloned()).collect())
    }

    fn into_parts(self) -> (CombatConfig, u64, Box<dyn RngOracle + Send + Sync>) {
        let seed = self.seed.unwrap_or_else(rand::random);
        let rng = self.rng.unwrap_or_else(|| Box::new(PcgRng));
        (self.config, seed, rng)
    }

    /// Starts a scripted story stage.
    pub fn story(
        self,
        stage: &StoryStage,
        progression: &impl ProgressionService,
    ) -> Result<CombatSession> {
        let players = self.players(progression)?;
        let (config, seed, rng) = self.into_parts();
        let state = stage.combat(players, seed)?;

        tracing::info!(stage = stage.id, name = %stage.name, seed, "story combat prepared");
        CombatSession::start(state, config, rng)
    }

    /// Registers and starts the next Auftrag encounter.
    pub fn auftrag(
        self,
        table: &AuftragTable,
        progression: &mut impl ProgressionService,
    ) -> Result<CombatSession> {
        table.validate()?;
        let players = self.players(progression)?;
        let counter = progression.next_auftrag();
        let (config, seed, rng) = self.into_parts();
        let state = auftrag_combat(table, players, counter, &*rng, seed)?;

        if ai::escalates(counter, config.smart_escalation_interval) {
            tracing::info!(counter, "auftrag escalated: enemies fight smart");
        }
        tracing::info!(counter, seed, enemies = state.enemies().len(), "auftrag combat prepared");
        CombatSession::start(state, config, rng)
    }
}
