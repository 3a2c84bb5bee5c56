//! Unattended combat runs driven by the autopilot.

use std::io::Write;

use anyhow::{Context, Result, bail};
use combat_content::{AuftragTable, ContentFactory, StoryStage};
use combat_core::{
    AbilityCategory, AttributeScores, CharacterClass, CombatConfig, CombatResult, Equipment,
    Loadout, PlayerProfile, Rewards,
};
use runtime::{CombatSession, InMemoryProgression, ProgressionService};

use crate::autopilot::choose_action;
use crate::config::SimConfig;

/// Upper bound on requests per combat before the run is aborted.
const MAX_STEPS: usize = 10_000;

/// Totals of one simulator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub victories: u32,
    pub defeats: u32,
    pub rewards: Rewards,
    pub loot: Vec<Equipment>,
    pub auftrag_counter: u32,
}

/// Fights a story stage and a series of Auftrag encounters.
pub struct Simulator {
    config: SimConfig,
    combat: CombatConfig,
    table: AuftragTable,
    stage: Option<StoryStage>,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs every configured combat, writing the combat logs to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<RunSummary> {
        let mut progression = InMemoryProgression::new(starter_profile(&self.config));
        let mut index = 0;

        if let Some(stage) = &self.stage {
            writeln!(out, "== Story stage {}: {} ==", stage.id, stage.name)?;
            let mut session = self.session(index).story(stage, &progression)?;
            self.fight(&mut session, &mut progression, out)?;
            index += 1;
        }

        for _ in 0..self.config.encounters {
            let mut session = self.session(index).auftrag(&self.table, &mut progression)?;
            writeln!(out, "== Auftrag #{} ==", progression.auftrag_counter())?;
            self.fight(&mut session, &mut progression, out)?;
            index += 1;
        }

        let summary = RunSummary {
            victories: progression.victories(),
            defeats: progression.defeats(),
            rewards: progression.totals(),
            loot: progression.inventory().to_vec(),
            auftrag_counter: progression.auftrag_counter(),
        };
        tracing::info!(
            victories = summary.victories,
            defeats = summary.defeats,
            experience = summary.rewards.experience,
            "run finished"
        );
        Ok(summary)
    }

    fn session(&self, index: u32) -> runtime::SessionBuilder {
        let builder = CombatSession::builder().config(self.combat.clone());
        match self.config.encounter_seed(index) {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }

    fn fight(
        &self,
        session: &mut CombatSession,
        progression: &mut InMemoryProgression,
        out: &mut impl Write,
    ) -> Result<CombatResult> {
        let mut printed = 0;

        for _ in 0..MAX_STEPS {
            printed = print_log(session, printed, out)?;
            if session.is_ended() {
                let result = session.finish(progression)?;
                write_result(&result, out)?;
                return Ok(result);
            }

            if session.is_player_turn() {
                let actor = session
                    .state()
                    .current_actor()
                    .context("player turn without an actor")?;
                let action = choose_action(session.state(), actor.index)
                    .context("autopilot found no action")?;
                tracing::debug!(?action, "autopilot action");
                session.submit_player_action(action)?;
            } else {
                session.advance_enemy_turn()?;
            }
        }

        bail!("combat did not end within {MAX_STEPS} steps: {session:?}")
    }
}

fn print_log(session: &CombatSession, printed: usize, out: &mut impl Write) -> Result<usize> {
    let entries = session.state().log().entries();
    for entry in &entries[printed.min(entries.len())..] {
        let marker = if entry.important { "!" } else { " " };
        writeln!(out, "{marker}[round {:>2}] {}", entry.round, entry.message)?;
    }
    Ok(entries.len())
}

fn write_result(result: &CombatResult, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "-> {} after {} rounds: {} xp, {} gold, {} essence",
        result.outcome(),
        result.rounds_survived(),
        result.experience(),
        result.currency(),
        result.essence(),
    )?;
    if let Some(item) = result.loot() {
        writeln!(
            out,
            "-> loot: {} {} {} (tier {})",
            item.rarity,
            item.set,
            item.slot,
            item.tier.get()
        )?;
    }
    Ok(())
}

/// A fresh character for the configured class and level.
///
/// Equips the class abilities in catalog order until the normal slots are
/// full, plus the ultimate once it is unlocked.
pub fn starter_profile(config: &SimConfig) -> PlayerProfile {
    let class = config.class;
    let level = config.level.max(1);
    let capacity = Loadout::new(class, level).capacity();

    let learnable = class
        .abilities()
        .iter()
        .copied()
        .filter(|ability| ability.definition().level_requirement <= level);
    let normal: Vec<_> = learnable
        .clone()
        .filter(|ability| ability.definition().category == AbilityCategory::Normal)
        .take(capacity)
        .collect();
    let ultimate = learnable
        .filter(|ability| ability.definition().category == AbilityCategory::Ultimate)
        .find(|_| level >= CombatConfig::ULTIMATE_UNLOCK_LEVEL);

    let attributes = match class {
        CharacterClass::Paladin => AttributeScores::new(16, 10, 14, 8, 10, 14),
        CharacterClass::Barbar => AttributeScores::new(16, 12, 16, 8, 12, 8),
    };

    let profile = PlayerProfile::new(config.name.clone(), class, level)
        .with_attributes(attributes)
        .with_abilities(normal);
    match ultimate {
        Some(ultimate) => profile.with_ultimate(ultimate),
        None => profile,
    }
}

/// Builder for [`Simulator`].
#[derive(Default)]
pub struct SimulatorBuilder {
    config: Option<SimConfig>,
    content: Option<ContentFactory>,
}

impl SimulatorBuilder {
    /// Set the run configuration (required).
    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the content source. Defaults to `data_dir` from the config, or
    /// the bundled data.
    pub fn content(mut self, content: ContentFactory) -> Self {
        self.content = Some(content);
        self
    }

    /// Loads content and builds the simulator.
    pub fn build(self) -> Result<Simulator> {
        let config = self
            .config
            .context("Config is required. Use .config() to set it.")?;
        let content = match (self.content, &config.data_dir) {
            (Some(content), _) => content,
            (None, Some(dir)) => ContentFactory::new(dir),
            (None, None) => ContentFactory::bundled(),
        };
        tracing::info!(data_dir = %content.data_dir().display(), "loading content");

        let combat = content.load_config()?;
        let table = content.load_auftrag_table()?;
        let stage = config
            .stage
            .map(|id| content.load_stage(id))
            .transpose()?;

        Ok(Simulator {
            config,
            combat,
            table,
            stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AbilityId, BarbarAbility, PaladinAbility, PlayerCombatant};

    #[test]
    fn starter_profile_fills_unlocked_slots() {
        let config = SimConfig {
            level: 5,
            ..SimConfig::default()
        };
        let profile = starter_profile(&config);
        assert_eq!(
            profile.abilities,
            vec![
                AbilityId::Paladin(PaladinAbility::DivineSmite),
                AbilityId::Paladin(PaladinAbility::HealingWord),
                AbilityId::Paladin(PaladinAbility::ShieldOfFaith),
            ]
        );
        assert_eq!(profile.ultimate, None);
        assert!(PlayerCombatant::from_profile(&profile).is_ok());
    }

    #[test]
    fn ultimate_is_equipped_once_unlocked() {
        let config = SimConfig {
            class: CharacterClass::Barbar,
            level: 10,
            ..SimConfig::default()
        };
        let profile = starter_profile(&config);
        assert_eq!(
            profile.ultimate,
            Some(AbilityId::Barbar(BarbarAbility::Berserk))
        );
        assert!(PlayerCombatant::from_profile(&profile).is_ok());
    }
}
