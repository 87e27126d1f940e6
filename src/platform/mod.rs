//! Platform abstraction layer
//!
//! Reduces browser/native details to what the simulation consumes:
//! - Frame timing (clamped delta-time)
//! - Input intents (held keys, pointer drag)

pub mod input;
pub mod time;

pub use input::Controls;
pub use time::FrameClock;
