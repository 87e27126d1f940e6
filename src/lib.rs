//! Turkey Catch - A falling-items catch arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, round state)
//! - `platform`: Frame clock and input reduction
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `highscores`: Persisted best score
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Length of one round in seconds
    pub const ROUND_DURATION: f32 = 40.0;
    /// Largest frame delta the simulation accepts (seconds)
    pub const MAX_DT: f32 = 0.033;

    /// Catcher horizontal speed under keyboard control (units/s)
    pub const CATCHER_SPEED: f32 = 760.0;
    /// Gap kept between the catcher and the viewport edges
    pub const CATCHER_MARGIN: f32 = 10.0;
    /// Catcher edge length cap (keeps it sane on laptops)
    pub const CATCHER_MAX_SIZE: f32 = 140.0;
    /// Catcher edge length as a fraction of viewport width (phones)
    pub const CATCHER_WIDTH_FRACTION: f32 = 0.32;

    /// Item sizes (edge length of the square collision box)
    pub const REWARD_SIZE: f32 = 55.0;
    pub const BOMB_SIZE: f32 = 50.0;
    /// Items spawn just above the visible area
    pub const SPAWN_Y: f32 = -60.0;
    /// Items this far below the viewport bottom are discarded
    pub const OFFSCREEN_MARGIN: f32 = 80.0;

    /// A new difficulty level every this many seconds
    pub const LEVEL_SECONDS: f32 = 5.0;
    /// Fall speed multiplier gained per level
    pub const SPEED_STEP: f32 = 0.35;
    /// Bomb probability curve
    pub const BOMB_BASE: f32 = 0.12;
    pub const BOMB_STEP: f32 = 0.05;
    pub const BOMB_MIN: f32 = 0.15;
    pub const BOMB_MAX: f32 = 0.38;
    /// Spawn interval curve (seconds)
    pub const SPAWN_INTERVAL_START: f32 = 0.85;
    pub const SPAWN_INTERVAL_DECAY: f32 = 0.025;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.23;
    /// Fall speed = base * mult + uniform(0, spread * mult)
    pub const FALL_SPEED_BASE: f32 = 220.0;
    pub const FALL_SPEED_SPREAD: f32 = 160.0;
}

/// Clamp a raw frame delta into `[0, max_dt]`.
///
/// NaN collapses to zero so a bad timestamp can never poison positions.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, max_dt.max(0.0))
}
