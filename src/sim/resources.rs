//! Mana, souls, cooldowns and scroll speed

use serde::{Deserialize, Serialize};

use crate::tuning::{SpeedTuning, Tuning};

/// Coil range tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoilRange {
    Close,
    Medium,
    Far,
}

impl CoilRange {
    pub const ALL: [CoilRange; 3] = [CoilRange::Close, CoilRange::Medium, CoilRange::Far];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoilRange::Close => "close",
            CoilRange::Medium => "medium",
            CoilRange::Far => "far",
        }
    }
}

/// Independent per-range cooldown counters (ticks remaining)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    pub close: u32,
    pub medium: u32,
    pub far: u32,
}

impl Cooldowns {
    pub fn get(&self, range: CoilRange) -> u32 {
        match range {
            CoilRange::Close => self.close,
            CoilRange::Medium => self.medium,
            CoilRange::Far => self.far,
        }
    }

    pub fn arm(&mut self, range: CoilRange, ticks: u32) {
        match range {
            CoilRange::Close => self.close = ticks,
            CoilRange::Medium => self.medium = ticks,
            CoilRange::Far => self.far = ticks,
        }
    }

    /// Count every cooldown down by one, stopping at zero
    pub fn tick(&mut self) {
        self.close = self.close.saturating_sub(1);
        self.medium = self.medium.saturating_sub(1);
        self.far = self.far.saturating_sub(1);
    }
}

/// Player resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub mana: f32,
    pub max_mana: f32,
    pub souls: u32,
    pub cooldowns: Cooldowns,
}

impl Resources {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            mana: tuning.mana.start.clamp(0.0, tuning.mana.max),
            max_mana: tuning.mana.max,
            souls: 0,
            cooldowns: Cooldowns::default(),
        }
    }

    /// Passive regeneration and cooldown countdown for one tick
    pub fn tick(&mut self, regen: f32) {
        self.cooldowns.tick();
        if self.mana < self.max_mana {
            self.mana = (self.mana + regen).min(self.max_mana);
        }
    }

    /// Whether `range` can be cast at `cost` right now
    pub fn can_cast(&self, range: CoilRange, cost: f32) -> bool {
        self.cooldowns.get(range) == 0 && self.mana >= cost
    }

    /// Spend mana and arm the range's cooldown. Returns false (and changes
    /// nothing) if the cast isn't affordable.
    pub fn spend_for_cast(&mut self, range: CoilRange, cost: f32, cooldown: u32) -> bool {
        if !self.can_cast(range, cost) {
            return false;
        }
        self.mana = (self.mana - cost).max(0.0);
        self.cooldowns.arm(range, cooldown);
        true
    }

    /// Fraction of the ultimate charged, for the HUD meter
    pub fn ultimate_progress(&self, souls_required: u32) -> f32 {
        if souls_required == 0 {
            return 1.0;
        }
        (self.souls as f32 / souls_required as f32).min(1.0)
    }
}

/// Current scroll speed: base plus cumulative ramp, scaled down while any
/// slow rune is in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollSpeed {
    pub base: f32,
    /// Sum of all periodic increases so far
    pub ramp: f32,
    /// Overlapping slow debuffs still pending restoration
    pub slow_stacks: u32,
    slow_factor: f32,
}

impl ScrollSpeed {
    pub fn new(tuning: &SpeedTuning) -> Self {
        Self {
            base: tuning.base,
            ramp: 0.0,
            slow_stacks: 0,
            slow_factor: tuning.slow_factor,
        }
    }

    pub fn current(&self) -> f32 {
        let speed = self.base + self.ramp;
        if self.slow_stacks > 0 {
            speed * self.slow_factor
        } else {
            speed
        }
    }

    pub fn increase(&mut self, step: f32) {
        self.ramp += step;
    }

    pub fn push_slow(&mut self) {
        self.slow_stacks += 1;
    }

    /// Restore one slow debuff. Speed only returns to normal once every
    /// overlapping debuff has expired.
    pub fn pop_slow(&mut self) {
        self.slow_stacks = self.slow_stacks.saturating_sub(1);
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_stacks > 0
    }
}
