//! Encounter definitions.
//!
//! Story stages are scripted: a fixed enemy list per stage. Auftrag
//! encounters are rolled from an [`AuftragTable`] with the combat's RNG
//! oracle, so the same seed and counter always produce the same enemies.

use combat_core::env::context;
use combat_core::{
    CombatConfig, CombatError, CombatKind, CombatState, EnemyCombatant, ErrorSeverity, MonsterType,
    PlayerCombatant, RngOracle, SetupError, Vital, compute_seed,
};

/// Levels an elite enemy gets on top of its rolled level.
pub const ELITE_LEVEL_BONUS: u32 = 2;

/// A scripted story encounter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoryStage {
    pub id: u32,
    pub name: String,
    /// Tutorial stages never escalate enemy AI.
    #[serde(default)]
    pub tutorial: bool,
    pub enemies: Vec<(MonsterType, u32)>,
}

impl StoryStage {
    pub fn spawn_enemies(&self) -> Vec<EnemyCombatant> {
        self.enemies
            .iter()
            .map(|&(monster, level)| EnemyCombatant::spawn(monster, level))
            .collect()
    }

    /// Builds a not-yet-started combat for this stage.
    pub fn combat(
        &self,
        players: Vec<PlayerCombatant>,
        seed: u64,
    ) -> Result<CombatState, SetupError> {
        let state = CombatState::new(
            CombatKind::Story { stage: self.id },
            players,
            self.spawn_enemies(),
        )?;
        Ok(state.with_seed(seed).with_tutorial(self.tutorial))
    }
}

/// Errors in encounter table data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("auftrag pool is empty")]
    EmptyPool,

    #[error("invalid enemy count range {min}..={max}")]
    InvalidSize { min: u32, max: u32 },

    #[error("level spread {spread} exceeds {max}")]
    InvalidSpread { spread: u32, max: u32 },

    #[error("story stage {0} has no enemies")]
    EmptyStage(u32),

    #[error("story stage {stage}: enemy level must be at least 1")]
    ZeroLevel { stage: u32 },

    #[error("duplicate story stage id {0}")]
    DuplicateStage(u32),
}

impl CombatError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            EncounterError::EmptyPool => "ENCOUNTER_EMPTY_POOL",
            EncounterError::InvalidSize { .. } => "ENCOUNTER_INVALID_SIZE",
            EncounterError::InvalidSpread { .. } => "ENCOUNTER_INVALID_SPREAD",
            EncounterError::EmptyStage(_) => "ENCOUNTER_EMPTY_STAGE",
            EncounterError::ZeroLevel { .. } => "ENCOUNTER_ZERO_LEVEL",
            EncounterError::DuplicateStage(_) => "ENCOUNTER_DUPLICATE_STAGE",
        }
    }
}

/// Checks a list of story stages.
pub fn validate_stages(stages: &[StoryStage]) -> Result<(), EncounterError> {
    let mut seen = Vec::with_capacity(stages.len());
    for stage in stages {
        if seen.contains(&stage.id) {
            return Err(EncounterError::DuplicateStage(stage.id));
        }
        seen.push(stage.id);

        if stage.enemies.is_empty() {
            return Err(EncounterError::EmptyStage(stage.id));
        }
        if stage.enemies.iter().any(|&(_, level)| level == 0) {
            return Err(EncounterError::ZeroLevel { stage: stage.id });
        }
    }
    Ok(())
}

fn default_elite_interval() -> u32 {
    10
}

/// Monster pool and size rules for randomized Auftrag encounters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuftragTable {
    pub pool: Vec<MonsterType>,
    pub min_enemies: u32,
    pub max_enemies: u32,
    /// Enemy levels range over `player_level ..= player_level + level_spread`.
    #[serde(default)]
    pub level_spread: u32,
    /// Every N-th encounter adds an elite enemy. Zero disables elites.
    #[serde(default = "default_elite_interval")]
    pub elite_interval: u32,
}

impl AuftragTable {
    pub fn validate(&self) -> Result<(), EncounterError> {
        if self.pool.is_empty() {
            return Err(EncounterError::EmptyPool);
        }
        if self.min_enemies == 0 || self.min_enemies > self.max_enemies {
            return Err(EncounterError::InvalidSize {
                min: self.min_enemies,
                max: self.max_enemies,
            });
        }
        if self.level_spread > CombatConfig::MAX_LEVEL {
            return Err(EncounterError::InvalidSpread {
                spread: self.level_spread,
                max: CombatConfig::MAX_LEVEL,
            });
        }
        Ok(())
    }

    pub fn has_elite(&self, counter: u32) -> bool {
        self.elite_interval > 0 && counter > 0 && counter % self.elite_interval == 0
    }
}

impl Default for AuftragTable {
    fn default() -> Self {
        Self {
            pool: vec![
                MonsterType::Goblin,
                MonsterType::Wolf,
                MonsterType::Skeleton,
                MonsterType::Bandit,
            ],
            min_enemies: 1,
            max_enemies: 3,
            level_spread: 2,
            elite_interval: default_elite_interval(),
        }
    }
}

/// Rolls the enemy roster of an Auftrag encounter.
///
/// Returns an empty list only for an empty pool.
pub fn build_auftrag(
    table: &AuftragTable,
    player_level: u32,
    counter: u32,
    rng: &dyn RngOracle,
    seed: u64,
) -> Vec<EnemyCombatant> {
    let roll = |ctx: u32, member: u32| compute_seed(seed, u64::from(counter), member, ctx);
    let base_level = player_level.clamp(1, CombatConfig::MAX_LEVEL);

    let pick = |member: u32| -> Option<(MonsterType, u32)> {
        let index = rng.pick_index(roll(context::ENCOUNTER_MEMBER, member), table.pool.len())?;
        let spread = rng.range(roll(context::ENCOUNTER_LEVEL, member), 0, table.level_spread);
        Some((table.pool[index], base_level.saturating_add(spread)))
    };

    let count = rng.range(
        roll(context::ENCOUNTER_SIZE, 0),
        table.min_enemies,
        table.max_enemies.max(table.min_enemies),
    );

    let mut enemies: Vec<EnemyCombatant> = (0..count)
        .filter_map(&pick)
        .map(|(monster, level)| EnemyCombatant::spawn(monster, level))
        .collect();

    if table.has_elite(counter) {
        if let Some((monster, level)) = pick(count) {
            let elite = EnemyCombatant::spawn(monster, level.saturating_add(ELITE_LEVEL_BONUS));
            let name = format!("Elite {}", elite.name());
            enemies.push(elite.with_name(name));
        }
    }

    tracing::debug!(
        counter,
        player_level,
        enemies = enemies.len(),
        elite = table.has_elite(counter),
        "auftrag encounter rolled"
    );
    enemies
}

/// Builds a not-yet-started Auftrag combat.
pub fn auftrag_combat(
    table: &AuftragTable,
    players: Vec<PlayerCombatant>,
    counter: u32,
    rng: &dyn RngOracle,
    seed: u64,
) -> Result<CombatState, SetupError> {
    let level = players.iter().map(|p| p.level()).max().unwrap_or(1);
    let enemies = build_auftrag(table, level, counter, rng, seed);
    let state = CombatState::new(CombatKind::Auftrag { counter }, players, enemies)?;
    Ok(state.with_seed(seed))
}
