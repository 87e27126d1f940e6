//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped variable timestep supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::{Difficulty, DifficultyCurve};
pub use state::{
    Catcher, EndReason, FallingItem, FrameSnapshot, GameEvent, GamePhase, GameSession, ItemKind,
    ItemView, PhaseSnapshot, Viewport,
};
pub use tick::{TickInput, tick};
