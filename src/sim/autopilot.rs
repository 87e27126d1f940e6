//! Idle/demo mode steering
//!
//! Produces keyboard-style intents so the demo plays by the same rules as a
//! human: chase the lowest reward still above the catcher, sidestep bombs
//! that would land on it soon.

use super::state::{GameSession, ItemKind};
use super::tick::TickInput;

/// Ignore offsets smaller than this to avoid jitter
const DEADBAND: f32 = 6.0;
/// How far ahead (seconds of fall) a bomb counts as a threat
const THREAT_HORIZON: f32 = 0.6;
/// Extra horizontal clearance kept from threatening bombs
const DODGE_PADDING: f32 = 12.0;

/// Decide this tick's movement for the demo player
pub fn steer(session: &GameSession) -> TickInput {
    let catcher = &session.catcher;
    let half_width = catcher.size.x / 2.0;
    let catcher_top = catcher.pos.y - catcher.size.y / 2.0;
    let margin = session.tuning.catcher.margin;
    let width = session.viewport.width;

    let threat = session
        .items
        .iter()
        .filter(|item| item.kind == ItemKind::Bomb)
        .filter(|bomb| {
            let gap = catcher_top - (bomb.pos.y + bomb.size / 2.0);
            let horizontal = (bomb.pos.x - catcher.pos.x).abs();
            gap > -bomb.size
                && gap < bomb.fall_speed * THREAT_HORIZON
                && horizontal < half_width + bomb.size / 2.0 + DODGE_PADDING
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let desired_x = if let Some(bomb) = threat {
        // Step fully clear of the bomb, preferring the roomier side
        let clearance = half_width + bomb.size / 2.0 + DODGE_PADDING;
        let (lo, hi) = catcher.x_bounds(width, margin);
        let left = bomb.pos.x - clearance;
        let right = bomb.pos.x + clearance;
        if left >= lo && (right > hi || bomb.pos.x >= catcher.pos.x) {
            left
        } else {
            right
        }
    } else {
        session
            .items
            .iter()
            .filter(|item| item.kind == ItemKind::Reward && item.pos.y < catcher.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|reward| reward.pos.x)
            .unwrap_or(catcher.pos.x)
    };

    let dx = catcher.clamp_x(desired_x, width, margin) - catcher.pos.x;
    TickInput {
        move_left: dx < -DEADBAND,
        move_right: dx > DEADBAND,
    }
}
