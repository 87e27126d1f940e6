//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`]. A JSON document
//! only needs to name the fields it wants to change.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::DifficultyCurve;

/// Catcher handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatcherTuning {
    /// Horizontal speed under keyboard control (units/s)
    pub speed: f32,
    /// Gap to the viewport edges and bottom
    pub margin: f32,
    /// Upper bound on the catcher edge length
    pub max_size: f32,
    /// Edge length as a fraction of the viewport width
    pub width_fraction: f32,
}

impl Default for CatcherTuning {
    fn default() -> Self {
        Self {
            speed: CATCHER_SPEED,
            margin: CATCHER_MARGIN,
            max_size: CATCHER_MAX_SIZE,
            width_fraction: CATCHER_WIDTH_FRACTION,
        }
    }
}

impl CatcherTuning {
    /// Catcher edge length for a viewport of the given width
    pub fn size_for_width(&self, viewport_width: f32) -> f32 {
        self.max_size.min(viewport_width * self.width_fraction).max(0.0)
    }
}

/// Falling item geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    pub reward_size: f32,
    pub bomb_size: f32,
    /// Vertical spawn position (negative = above the viewport)
    pub spawn_y: f32,
    /// How far below the viewport an item may fall before removal
    pub offscreen_margin: f32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            reward_size: REWARD_SIZE,
            bomb_size: BOMB_SIZE,
            spawn_y: SPAWN_Y,
            offscreen_margin: OFFSCREEN_MARGIN,
        }
    }
}

/// All balance parameters for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Round length in seconds
    pub round_duration: f32,
    /// Frame delta ceiling in seconds
    pub max_dt: f32,
    pub catcher: CatcherTuning,
    pub items: ItemTuning,
    pub difficulty: DifficultyCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION,
            max_dt: MAX_DT,
            catcher: CatcherTuning::default(),
            items: ItemTuning::default(),
            difficulty: DifficultyCurve::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        log::debug!("Loaded tuning overrides: {:?}", tuning);
        Ok(tuning)
    }

    /// Serialize the full tuning table (handy as a starting point for edits)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
