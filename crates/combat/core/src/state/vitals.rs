//! Mutable vital state shared by players and enemies: HP with a temp-HP
//! buffer, mana, and timed effects.
//!
//! All mutators clamp: HP stays in `[0, max_hp]` and mana in `[0, max]`.

use arrayvec::ArrayVec;

use crate::catalog::EffectKind;
use crate::config::CombatConfig;

/// Breakdown of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage soaked by temp HP.
    pub absorbed: u32,
    /// Damage taken from base HP.
    pub hp_lost: u32,
    /// True if this application brought HP to 0.
    pub lethal: bool,
}

impl DamageOutcome {
    pub const fn total(&self) -> u32 {
        self.absorbed + self.hp_lost
    }
}

/// Hit points with a temporary buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    hp: u32,
    max_hp: u32,
    temp_hp: u32,
}

impl Vitals {
    /// Full health.
    pub const fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            temp_hp: 0,
        }
    }

    /// Starts at `hp`, clamped to `max_hp`.
    pub const fn with_hp(max_hp: u32, hp: u32) -> Self {
        Self {
            hp: if hp > max_hp { max_hp } else { hp },
            max_hp,
            temp_hp: 0,
        }
    }

    pub const fn with_temp_hp(mut self, temp_hp: u32) -> Self {
        self.temp_hp = temp_hp;
        self
    }

    pub const fn hp(&self) -> u32 {
        self.hp
    }

    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub const fn temp_hp(&self) -> u32 {
        self.temp_hp
    }

    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub const fn missing_hp(&self) -> u32 {
        self.max_hp - self.hp
    }

    /// Current HP as a percentage of max (0-100).
    pub const fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.hp as u64 * 100) / self.max_hp as u64) as u32
    }

    /// Temp HP absorbs first; the overflow is taken from HP, floored at 0.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let was_alive = self.is_alive();

        let absorbed = amount.min(self.temp_hp);
        self.temp_hp -= absorbed;

        let overflow = amount - absorbed;
        let hp_lost = overflow.min(self.hp);
        self.hp -= hp_lost;

        DamageOutcome {
            absorbed,
            hp_lost,
            lethal: was_alive && !self.is_alive(),
        }
    }

    /// Heals up to max HP. Dead combatants are not revived. Returns HP restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.min(self.missing_hp());
        self.hp += healed;
        healed
    }

    pub fn heal_full(&mut self) -> u32 {
        self.heal(self.missing_hp())
    }

    /// Temp HP does not stack: the larger buffer wins. Returns the gain.
    pub fn grant_temp_hp(&mut self, amount: u32) -> u32 {
        if !self.is_alive() || amount <= self.temp_hp {
            return 0;
        }
        let gained = amount - self.temp_hp;
        self.temp_hp = amount;
        gained
    }
}

/// Mana pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaPool {
    current: u32,
    max: u32,
}

impl ManaPool {
    pub const fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Deducts `cost` if affordable. Returns false and leaves the pool
    /// untouched otherwise.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        true
    }
}

/// A timed effect on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub rounds_remaining: u32,
}

/// Effects currently on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Applies an effect. An effect of the same variant is refreshed in
    /// place; when full, the effect closest to expiring is replaced.
    pub fn apply(&mut self, kind: EffectKind, rounds: u32) {
        if rounds == 0 {
            return;
        }
        let effect = ActiveEffect {
            kind,
            rounds_remaining: rounds,
        };

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind.same_variant(kind)) {
            *existing = effect;
            return;
        }

        if let Err(overflow) = self.effects.try_push(effect) {
            if let Some(weakest) = self.effects.iter_mut().min_by_key(|e| e.rounds_remaining) {
                *weakest = overflow.element();
            }
        }
    }

    /// Removes harmful effects. Returns how many were removed.
    pub fn cleanse(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_harmful());
        before - self.effects.len()
    }

    pub fn has_harmful(&self) -> bool {
        self.effects.iter().any(|e| e.kind.is_harmful())
    }

    /// Round-end tick: decrement durations and drop expired effects.
    pub fn tick(&mut self) {
        for effect in self.effects.iter_mut() {
            effect.rounds_remaining = effect.rounds_remaining.saturating_sub(1);
        }
        self.effects.retain(|e| e.rounds_remaining > 0);
    }

    /// Net outgoing damage percentage: 100 + boosts − weakness, floored at 0.
    pub fn damage_percent(&self) -> u32 {
        let mut percent: i64 = 100;
        for effect in &self.effects {
            match effect.kind {
                EffectKind::DamageBoost(p) => percent += p as i64,
                EffectKind::Weakened(p) => percent -= p as i64,
                EffectKind::ArmorBoost(_) => {}
            }
        }
        percent.max(0) as u32
    }

    pub fn armor_bonus(&self) -> i32 {
        self.effects
            .iter()
            .map(|e| match e.kind {
                EffectKind::ArmorBoost(n) => n as i32,
                EffectKind::DamageBoost(_) | EffectKind::Weakened(_) => 0,
            })
            .sum()
    }

    /// Scales outgoing damage by [`Self::damage_percent`].
    pub fn scale_damage(&self, base: u32) -> u32 {
        ((base as u64 * self.damage_percent() as u64) / 100) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_exceeding_hp_floors_at_zero() {
        let mut vitals = Vitals::new(30);
        let outcome = vitals.apply_damage(50);
        assert_eq!(vitals.hp(), 0);
        assert!(!vitals.is_alive());
        assert_eq!(outcome.hp_lost, 30);
        assert!(outcome.lethal);
    }

    #[test]
    fn temp_hp_absorbs_first_and_overflow_spills() {
        let mut vitals = Vitals::new(20).with_temp_hp(10);
        let outcome = vitals.apply_damage(15);
        assert_eq!(outcome.absorbed, 10);
        assert_eq!(outcome.hp_lost, 5);
        assert_eq!(vitals.temp_hp(), 0);
        assert_eq!(vitals.hp(), 15);
        assert!(!outcome.lethal);
    }

    #[test]
    fn temp_hp_fully_absorbs_small_hits() {
        let mut vitals = Vitals::new(20).with_temp_hp(10);
        vitals.apply_damage(4);
        assert_eq!(vitals.temp_hp(), 6);
        assert_eq!(vitals.hp(), 20);
    }

    #[test]
    fn second_hit_on_dead_target_is_not_lethal() {
        let mut vitals = Vitals::with_hp(20, 0);
        let outcome = vitals.apply_damage(5);
        assert!(!outcome.lethal);
        assert_eq!(outcome.hp_lost, 0);
    }

    #[test]
    fn healing_clamps_to_max_and_skips_dead() {
        let mut vitals = Vitals::with_hp(20, 15);
        assert_eq!(vitals.heal(10), 5);
        assert_eq!(vitals.hp(), 20);

        let mut dead = Vitals::with_hp(20, 0);
        assert_eq!(dead.heal(10), 0);
        assert_eq!(dead.heal_full(), 0);
        assert!(!dead.is_alive());
    }

    #[test]
    fn temp_hp_takes_larger_buffer() {
        let mut vitals = Vitals::new(20).with_temp_hp(6);
        assert_eq!(vitals.grant_temp_hp(4), 0);
        assert_eq!(vitals.temp_hp(), 6);
        assert_eq!(vitals.grant_temp_hp(9), 3);
        assert_eq!(vitals.temp_hp(), 9);
    }

    #[test]
    fn mana_spend_is_all_or_nothing() {
        let mut mana = ManaPool::new(10);
        assert!(mana.spend(7));
        assert!(!mana.spend(4));
        assert_eq!(mana.current(), 3);
    }

    #[test]
    fn effects_refresh_tick_and_scale() {
        let mut effects = ActiveEffects::new();
        effects.apply(EffectKind::DamageBoost(25), 2);
        effects.apply(EffectKind::DamageBoost(40), 3);
        effects.apply(EffectKind::Weakened(10), 1);

        assert_eq!(effects.iter().count(), 2);
        assert_eq!(effects.damage_percent(), 130);
        assert_eq!(effects.scale_damage(10), 13);

        effects.tick();
        assert_eq!(effects.damage_percent(), 140);
        effects.tick();
        effects.tick();
        assert!(effects.is_empty());
    }

    #[test]
    fn weakness_never_goes_negative() {
        let mut effects = ActiveEffects::new();
        effects.apply(EffectKind::Weakened(150), 2);
        assert_eq!(effects.scale_damage(40), 0);
        assert!(effects.has_harmful());
        assert_eq!(effects.cleanse(), 1);
        assert_eq!(effects.scale_damage(40), 40);
    }
}
