//! Collision detection and resolution
//!
//! Catcher and items are both axis-aligned boxes, so overlap is a pair of
//! interval tests. Touching edges do not count.

use glam::Vec2;

use super::state::{EndReason, GamePhase, GameSession, ItemKind};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Resolve catcher/item overlaps for this tick
///
/// Walks items back to front so removal never skips an entry. A bomb ends
/// the round on the spot and nothing after it is processed.
pub fn resolve(session: &mut GameSession) {
    if session.phase != GamePhase::Running {
        return;
    }

    let catcher = session.catcher.bounds();

    for i in (0..session.items.len()).rev() {
        if !catcher.overlaps(&session.items[i].bounds()) {
            continue;
        }

        let item = session.items.remove(i);
        match item.kind {
            ItemKind::Bomb => {
                session.end(EndReason::Bomb);
                return;
            }
            ItemKind::Reward => session.collect_reward(item.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::state::{FallingItem, Viewport};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_session() -> GameSession {
        let mut s = GameSession::new(
            1,
            Viewport::new(800.0, 600.0, 0.0),
            Tuning::default(),
            HighScore::in_memory(),
        );
        s.start();
        s
    }

    fn push_item(s: &mut GameSession, kind: ItemKind, pos: Vec2, size: f32) -> u32 {
        let id = s.next_entity_id();
        s.items.push(FallingItem {
            id,
            kind,
            pos,
            size,
            fall_speed: 300.0,
        });
        id
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let right = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let below = Aabb::from_center(Vec2::new(0.0, 10.0), Vec2::splat(10.0));
        let corner = Aabb::from_center(Vec2::new(10.0, 10.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&corner));

        let nudged = Aabb::from_center(Vec2::new(9.5, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&nudged));
    }

    #[test]
    fn test_reward_overlap_scores_and_removes() {
        // Catcher centered just below and just above the reward
        for catcher_y in [305.0, 295.0] {
            let mut s = running_session();
            s.catcher.pos = Vec2::new(100.0, catcher_y);
            let id = push_item(&mut s, ItemKind::Reward, Vec2::new(100.0, 300.0), 55.0);
            push_item(&mut s, ItemKind::Reward, Vec2::new(600.0, 300.0), 55.0);

            resolve(&mut s);

            assert_eq!(s.score, 1, "catcher at y={catcher_y}");
            assert_eq!(s.items.len(), 1);
            assert!(s.items.iter().all(|item| item.id != id));
            assert_eq!(s.phase, GamePhase::Running);
        }
    }

    #[test]
    fn test_bomb_ends_round_even_at_start() {
        let mut s = running_session();
        assert_eq!(s.elapsed, 0.0);
        let pos = s.catcher.pos;
        push_item(&mut s, ItemKind::Bomb, pos, 50.0);

        resolve(&mut s);

        assert_eq!(s.phase, GamePhase::Ended);
        assert_eq!(s.end_reason, Some(EndReason::Bomb));
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_bomb_stops_processing_remaining_items() {
        let mut s = running_session();
        let pos = s.catcher.pos;
        // Iteration runs back to front: the bomb (last) is hit first
        push_item(&mut s, ItemKind::Reward, pos, 55.0);
        push_item(&mut s, ItemKind::Bomb, pos, 50.0);

        resolve(&mut s);

        assert_eq!(s.end_reason, Some(EndReason::Bomb));
        assert_eq!(s.score, 0);
        assert_eq!(s.items.len(), 1);
        assert_eq!(s.items[0].kind, ItemKind::Reward);
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut s = running_session();
        let pos = s.catcher.pos;
        for _ in 0..4 {
            push_item(&mut s, ItemKind::Reward, pos, 55.0);
        }
        resolve(&mut s);
        assert_eq!(s.score, 4);
        assert!(s.items.is_empty());
    }

    #[test]
    fn test_ended_round_is_frozen() {
        let mut s = running_session();
        let pos = s.catcher.pos;
        s.end(EndReason::Time);
        push_item(&mut s, ItemKind::Reward, pos, 55.0);
        resolve(&mut s);
        assert_eq!(s.score, 0);
        assert_eq!(s.items.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_edge_contact_never_collides(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 1.0f32..200.0,
            h in 1.0f32..200.0,
            offset in -300.0f32..300.0,
        ) {
            // Boxes built from explicit edges so contact is exact
            let a = Aabb { min: Vec2::new(x, y), max: Vec2::new(x + w, y + h) };
            let right = Aabb { min: Vec2::new(a.max.x, y + offset), max: Vec2::new(a.max.x + w, y + offset + h) };
            let below = Aabb { min: Vec2::new(x + offset, a.max.y), max: Vec2::new(x + offset + w, a.max.y + h) };
            prop_assert!(!a.overlaps(&right));
            prop_assert!(!right.overlaps(&a));
            prop_assert!(!a.overlaps(&below));
            prop_assert!(!below.overlaps(&a));
        }
    }
}
