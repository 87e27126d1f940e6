//! Catcher movement and item integration

use super::state::{GamePhase, GameSession};
use super::tick::TickInput;

/// Move the catcher from the current intents
///
/// A held direction integrates at catcher speed. Otherwise a drag target is
/// followed instantly. Either way the result is clamped inside the margins,
/// and the vertical position is re-derived from the viewport.
pub fn step_catcher(session: &mut GameSession, input: &TickInput, dt: f32) {
    let viewport = session.viewport;
    let tuning = session.tuning.catcher;
    let catcher = &mut session.catcher;

    let direction = input.direction();
    let desired_x = if direction != 0.0 {
        catcher.pos.x + direction * tuning.speed * dt
    } else if let Some(target) = catcher.control_target {
        target
    } else {
        catcher.pos.x
    };

    catcher.pos.x = catcher.clamp_x(desired_x, viewport.width, tuning.margin);
    catcher.pos.y = catcher.resting_y(&viewport, tuning.margin);
}

/// Let items fall and drop the ones that left the viewport
///
/// Items past the bottom carry no penalty, whatever their kind.
pub fn step_items(session: &mut GameSession, dt: f32) {
    let limit = session.viewport.height + session.tuning.items.offscreen_margin;
    for item in &mut session.items {
        item.pos.y += item.fall_speed * dt;
    }
    session.items.retain(|item| item.pos.y <= limit);
}

/// Full physics step for a running round
pub fn step(session: &mut GameSession, input: &TickInput, dt: f32) {
    if session.phase != GamePhase::Running {
        return;
    }
    step_catcher(session, input, dt);
    step_items(session, dt);
}
