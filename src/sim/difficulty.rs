//! Time-based difficulty scaling
//!
//! Everything here is a pure function of elapsed round time.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Difficulty curve coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    pub level_seconds: f32,
    pub speed_step: f32,
    pub bomb_base: f32,
    pub bomb_step: f32,
    /// Lower clamp on bomb probability. Sits above `bomb_base`, so level 0
    /// already plays at `bomb_min`.
    pub bomb_min: f32,
    pub bomb_max: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_decay: f32,
    pub spawn_interval_min: f32,
    pub fall_speed_base: f32,
    pub fall_speed_spread: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            level_seconds: LEVEL_SECONDS,
            speed_step: SPEED_STEP,
            bomb_base: BOMB_BASE,
            bomb_step: BOMB_STEP,
            bomb_min: BOMB_MIN,
            bomb_max: BOMB_MAX,
            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            fall_speed_base: FALL_SPEED_BASE,
            fall_speed_spread: FALL_SPEED_SPREAD,
        }
    }
}

/// Difficulty parameters sampled at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: u32,
    pub speed_multiplier: f32,
    pub bomb_probability: f32,
    pub spawn_interval: f32,
}

impl Difficulty {
    /// Fall speed range `[min, max)` for items spawned at this difficulty
    pub fn fall_speed_range(&self, curve: &DifficultyCurve) -> (f32, f32) {
        let base = curve.fall_speed_base * self.speed_multiplier;
        (base, base + curve.fall_speed_spread * self.speed_multiplier)
    }
}

impl DifficultyCurve {
    /// Discrete level, one step every `level_seconds`
    pub fn level(&self, elapsed: f32) -> u32 {
        if elapsed <= 0.0 || self.level_seconds <= 0.0 {
            return 0;
        }
        (elapsed / self.level_seconds).floor() as u32
    }

    pub fn speed_multiplier(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.speed_step
    }

    /// Bernoulli weight for a spawn being a bomb
    pub fn bomb_probability(&self, level: u32) -> f32 {
        // max/min rather than clamp: clamp panics if a bad config inverts the bounds
        (self.bomb_base + level as f32 * self.bomb_step)
            .max(self.bomb_min)
            .min(self.bomb_max)
    }

    /// Seconds between spawns, shrinking linearly down to a floor
    pub fn spawn_interval(&self, elapsed: f32) -> f32 {
        let elapsed = elapsed.max(0.0);
        (self.spawn_interval_start - elapsed * self.spawn_interval_decay)
            .max(self.spawn_interval_min)
    }

    /// Sample every derived quantity at `elapsed`
    pub fn at(&self, elapsed: f32) -> Difficulty {
        let level = self.level(elapsed);
        Difficulty {
            level,
            speed_multiplier: self.speed_multiplier(level),
            bomb_probability: self.bomb_probability(level),
            spawn_interval: self.spawn_interval(elapsed),
        }
    }
}
