//! Per-frame simulation tick
//!
//! Order within a tick: clock, timeout check, spawn, catcher, items,
//! collisions. Collisions always see post-move positions.

use super::state::{EndReason, GamePhase, GameSession, Viewport};
use super::{collision, physics, spawn};
use crate::clamp_dt;

/// Held-direction intents for a single tick
///
/// Pointer drags do not go through here: they set the catcher target with
/// [`GameSession::set_catcher_target`], which persists until cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Move-left held
    pub move_left: bool,
    /// Move-right held
    pub move_right: bool,
}

impl TickInput {
    /// -1, 0 or 1
    pub fn direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_left {
            dir -= 1.0;
        }
        if self.move_right {
            dir += 1.0;
        }
        dir
    }
}

/// Advance the session by one frame
///
/// `dt` is clamped again here so a caller that skips the frame clock still
/// cannot make the catcher or items jump.
pub fn tick(session: &mut GameSession, input: &TickInput, viewport: &Viewport, dt: f32) {
    if session.phase != GamePhase::Running {
        return;
    }

    let dt = clamp_dt(dt, session.tuning.max_dt);
    session.viewport = *viewport;

    session.advance_clock(dt);
    if session.time_remaining <= 0.0 {
        session.end(EndReason::Time);
        return;
    }

    spawn::update(session, dt);
    physics::step(session, input, dt);
    collision::resolve(session);
}
