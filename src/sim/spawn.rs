//! Item spawning driven by the difficulty curve

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, GameSession, ItemKind};

/// Count down to the next spawn and spawn when it elapses
///
/// The interval is sampled after the clock has advanced, so the first tick
/// of a round always spawns.
pub fn update(session: &mut GameSession, dt: f32) {
    session.spawn_countdown -= dt;
    if session.spawn_countdown <= 0.0 {
        spawn_item(session);
        session.spawn_countdown = session.tuning.difficulty.spawn_interval(session.elapsed);
    }
}

/// Spawn one item above the viewport using the current difficulty
pub fn spawn_item(session: &mut GameSession) -> u32 {
    let curve = session.tuning.difficulty;
    let difficulty = curve.at(session.elapsed);

    let kind = if session.rng.random::<f32>() < difficulty.bomb_probability {
        ItemKind::Bomb
    } else {
        ItemKind::Reward
    };
    let size = match kind {
        ItemKind::Bomb => session.tuning.items.bomb_size,
        ItemKind::Reward => session.tuning.items.reward_size,
    };

    // Uniform x in [size/2, width - size/2]
    let span = (session.viewport.width - size).max(0.0);
    let x = size / 2.0 + session.rng.random::<f32>() * span;

    let (min_speed, max_speed) = difficulty.fall_speed_range(&curve);
    let fall_speed = min_speed + session.rng.random::<f32>() * (max_speed - min_speed);

    let id = session.next_entity_id();
    session.items.push(FallingItem {
        id,
        kind,
        pos: Vec2::new(x, session.tuning.items.spawn_y),
        size,
        fall_speed,
    });
    log::trace!(
        "Spawned {:?} #{} at x={:.1} (level {}, v={:.0})",
        kind,
        id,
        x,
        difficulty.level,
        fall_speed
    );
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;

    fn running_session(seed: u64) -> GameSession {
        let mut s = GameSession::new(
            seed,
            Viewport::new(800.0, 600.0, 0.0),
            Tuning::default(),
            HighScore::in_memory(),
        );
        s.start();
        s
    }

    #[test]
    fn test_first_update_spawns_immediately() {
        let mut s = running_session(3);
        update(&mut s, 0.016);
        assert_eq!(s.items.len(), 1);
        assert!((s.spawn_countdown - 0.85).abs() < 1e-6);

        // Countdown not yet elapsed
        update(&mut s, 0.016);
        assert_eq!(s.items.len(), 1);
    }

    #[test]
    fn test_countdown_resets_to_current_interval() {
        let mut s = running_session(3);
        s.elapsed = 20.0;
        s.spawn_countdown = 0.01;
        update(&mut s, 0.02);
        assert_eq!(s.items.len(), 1);
        assert!((s.spawn_countdown - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_spawned_items_respect_bounds() {
        let mut s = running_session(42);
        for step in 0..500 {
            s.elapsed = step as f32 * 0.1;
            spawn_item(&mut s);
        }
        let curve = s.tuning.difficulty;
        for item in &s.items {
            let half = item.size / 2.0;
            assert!(item.pos.x >= half && item.pos.x <= 800.0 - half);
            assert_eq!(item.pos.y, -60.0);
            match item.kind {
                ItemKind::Bomb => assert_eq!(item.size, 50.0),
                ItemKind::Reward => assert_eq!(item.size, 55.0),
            }
        }
        // Level 0 items fall no faster than the level 0 ceiling
        let (lo, hi) = curve.at(0.0).fall_speed_range(&curve);
        assert!(s.items[0].fall_speed >= lo && s.items[0].fall_speed <= hi);
    }

    #[test]
    fn test_bomb_share_tracks_probability() {
        let mut s = running_session(2024);
        s.elapsed = 40.0; // probability capped at 0.38
        for _ in 0..4000 {
            spawn_item(&mut s);
        }
        let bombs = s.items.iter().filter(|i| i.kind == ItemKind::Bomb).count();
        let share = bombs as f32 / s.items.len() as f32;
        assert!((0.33..0.43).contains(&share), "bomb share {share}");
    }

    #[test]
    fn test_same_seed_same_items() {
        let mut a = running_session(99);
        let mut b = running_session(99);
        for _ in 0..20 {
            spawn_item(&mut a);
            spawn_item(&mut b);
        }
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut s = running_session(5);
        let first = spawn_item(&mut s);
        let second = spawn_item(&mut s);
        assert_ne!(first, second);
    }
}
