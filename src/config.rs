use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Upper bound for every stat.
pub const MAX_STAT_VALUE: f32 = 100.0;

// Points per second.
const HUNGER_DECAY_RATE: f32 = 0.05;
const HAPPINESS_DECAY_RATE: f32 = 0.05;
const HAPPINESS_INCREASE_RATE: f32 = 15.0;
const ENERGY_DECAY_RATE: f32 = 0.1;
const ENERGY_REPLENISH_RATE: f32 = 2.0;

// Points per action.
const FOOD_HUNGER_REPLENISH: f32 = 25.0;
const WAKE_UP_PENALTY: f32 = 10.0;

/// Walk speed in pixels/second.
const MOVEMENT_SPEED: f32 = 100.0;
/// Closer than this to the target and the cat snaps onto it.
const ARRIVAL_EPSILON: f32 = 2.0;

/// Right clicks needed to wake a sleeping cat.
const POKES_TO_WAKE: u32 = 2;

/// Seconds per animation frame.
const FRAME_DURATION: f32 = 0.1;
/// Sprite scale applied after compositing.
const SPRITE_SCALE: f32 = 0.5;

/// Stat decay/replenish tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatRates {
    pub max: f32,
    pub hunger_decay: f32,
    pub happiness_decay: f32,
    pub happiness_increase: f32,
    pub energy_decay: f32,
    pub energy_replenish: f32,
    pub food_replenish: f32,
    pub wake_up_penalty: f32,
}

impl Default for StatRates {
    fn default() -> Self {
        Self {
            max: MAX_STAT_VALUE,
            hunger_decay: HUNGER_DECAY_RATE,
            happiness_decay: HAPPINESS_DECAY_RATE,
            happiness_increase: HAPPINESS_INCREASE_RATE,
            energy_decay: ENERGY_DECAY_RATE,
            energy_replenish: ENERGY_REPLENISH_RATE,
            food_replenish: FOOD_HUNGER_REPLENISH,
            wake_up_penalty: WAKE_UP_PENALTY,
        }
    }
}

/// Ranges (seconds) for the autonomous idle and blink timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerRanges {
    pub idle: (f32, f32),
    pub first_blink: (f32, f32),
    pub next_blink: (f32, f32),
    pub blink_duration: f32,
}

impl Default for TimerRanges {
    fn default() -> Self {
        Self {
            idle: (2.0, 7.0),
            first_blink: (2.2, 7.4),
            next_blink: (1.0, 5.0),
            blink_duration: 0.20,
        }
    }
}

/// Every tunable the cat reads. Missing JSON fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatConfig {
    pub stats: StatRates,
    pub timers: TimerRanges,
    pub movement_speed: f32,
    pub arrival_epsilon: f32,
    pub pokes_to_wake: u32,
    pub frame_duration: f32,
    pub scale: f32,
}

impl Default for CatConfig {
    fn default() -> Self {
        Self {
            stats: StatRates::default(),
            timers: TimerRanges::default(),
            movement_speed: MOVEMENT_SPEED,
            arrival_epsilon: ARRIVAL_EPSILON,
            pokes_to_wake: POKES_TO_WAKE,
            frame_duration: FRAME_DURATION,
            scale: SPRITE_SCALE,
        }
    }
}

impl CatConfig {
    /// Read a JSON config. Unreadable or malformed files fall back to the
    /// defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("config {} unreadable ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str::<CatConfig>(&text) {
            Ok(cfg) => cfg.sanitized(),
            Err(e) => {
                log::warn!("config {} malformed ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace values that would break the tick loop (zero frame time,
    /// non-positive scale or max) with the defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.frame_duration.is_nan() || self.frame_duration <= 0.0 {
            log::warn!("frame_duration must be > 0, got {}", self.frame_duration);
            self.frame_duration = defaults.frame_duration;
        }
        if self.scale.is_nan() || self.scale <= 0.0 {
            log::warn!("scale must be > 0, got {}", self.scale);
            self.scale = defaults.scale;
        }
        if self.stats.max.is_nan() || self.stats.max <= 0.0 {
            log::warn!("stats.max must be > 0, got {}", self.stats.max);
            self.stats.max = defaults.stats.max;
        }
        if self.pokes_to_wake == 0 {
            self.pokes_to_wake = 1;
        }
        self
    }
}
