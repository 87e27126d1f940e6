//! Game session and core simulation types
//!
//! `GameSession` is the aggregate root: it owns the catcher, the falling
//! items, the round clock and the score, and it is the only place the round
//! phase changes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::highscores::HighScore;
use crate::tuning::{CatcherTuning, Tuning};

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Round in progress
    Running,
    /// Round over, waiting for an explicit reset
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Time,
    Bomb,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Time => "time",
            EndReason::Bomb => "bomb",
        }
    }
}

/// Drawable area reported by the environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Bottom area hidden by an on-screen keyboard or notch
    pub safe_bottom: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, safe_bottom: f32) -> Self {
        Self {
            width,
            height,
            safe_bottom: safe_bottom.max(0.0),
        }
    }
}

/// The player's catcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    /// Center position
    pub pos: Vec2,
    /// Width/height, fixed for the session
    pub size: Vec2,
    /// Latest absolute horizontal target (pointer drag), if any
    pub control_target: Option<f32>,
}

impl Catcher {
    /// Size the catcher for the viewport and park it at the bottom center
    pub fn for_viewport(viewport: &Viewport, tuning: &CatcherTuning) -> Self {
        let edge = tuning.size_for_width(viewport.width);
        let mut catcher = Self {
            pos: Vec2::ZERO,
            size: Vec2::splat(edge),
            control_target: None,
        };
        catcher.recenter(viewport, tuning.margin);
        catcher
    }

    /// Allowed range for the center x
    ///
    /// Collapses to the viewport center when the viewport is too narrow to
    /// fit the catcher and both margins.
    pub fn x_bounds(&self, viewport_width: f32, margin: f32) -> (f32, f32) {
        let lo = self.size.x / 2.0 + margin;
        let hi = viewport_width - self.size.x / 2.0 - margin;
        if lo > hi {
            let mid = viewport_width / 2.0;
            (mid, mid)
        } else {
            (lo, hi)
        }
    }

    /// Clamp a desired center x into the allowed range
    pub fn clamp_x(&self, x: f32, viewport_width: f32, margin: f32) -> f32 {
        let (lo, hi) = self.x_bounds(viewport_width, margin);
        x.max(lo).min(hi)
    }

    /// Vertical position derived from the viewport bottom
    pub fn resting_y(&self, viewport: &Viewport, margin: f32) -> f32 {
        viewport.height - self.size.y / 2.0 - viewport.safe_bottom - margin
    }

    pub fn recenter(&mut self, viewport: &Viewport, margin: f32) {
        self.pos.x = self.clamp_x(viewport.width / 2.0, viewport.width, margin);
        self.pos.y = self.resting_y(viewport, margin);
        self.control_target = None;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Falling item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Reward,
    Bomb,
}

/// A falling item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingItem {
    pub id: u32,
    pub kind: ItemKind,
    /// Center position
    pub pos: Vec2,
    /// Edge length of the square collision box
    pub size: f32,
    /// Vertical velocity (units/s), fixed at spawn
    pub fall_speed: f32,
}

impl FallingItem {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// Emitted on every phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub reason: Option<EndReason>,
}

/// Notifications for presentation, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(PhaseSnapshot),
    RewardCaught { item_id: u32, score: u64 },
    NewHighScore(u64),
}

/// Item as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: f32,
}

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub catcher_pos: Vec2,
    pub catcher_size: Vec2,
    pub items: Vec<ItemView>,
    pub score: u64,
    pub high_score: u64,
    /// Whole seconds left, rounded up
    pub countdown: u32,
    pub end_reason: Option<EndReason>,
}

/// One player's game: the current round plus the persisted best
#[derive(Debug)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Seconds since round start
    pub elapsed: f32,
    /// `max(0, round_duration - elapsed)`
    pub time_remaining: f32,
    pub score: u64,
    /// Seconds until the next spawn
    pub spawn_countdown: f32,
    pub catcher: Catcher,
    /// Active items in spawn order
    pub items: Vec<FallingItem>,
    /// Set when the round ends
    pub end_reason: Option<EndReason>,
    /// Last viewport reported by the environment
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    high_score: HighScore,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create an idle session. The catcher is sized once from `viewport`.
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning, high_score: HighScore) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            elapsed: 0.0,
            time_remaining: tuning.round_duration,
            score: 0,
            spawn_countdown: 0.0,
            catcher: Catcher::for_viewport(&viewport, &tuning.catcher),
            items: Vec::new(),
            end_reason: None,
            viewport,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            high_score,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn high_scores(&self) -> &HighScore {
        &self.high_score
    }

    /// Start the first round. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.reset();
        true
    }

    /// Discard the current round and start a fresh one
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.time_remaining = self.tuning.round_duration;
        self.score = 0;
        self.spawn_countdown = 0.0;
        self.items.clear();
        self.end_reason = None;
        let viewport = self.viewport;
        self.catcher.recenter(&viewport, self.tuning.catcher.margin);
        self.phase = GamePhase::Running;
        log::info!("Round started (seed {})", self.seed);
        self.emit_phase_change();
    }

    /// End the running round. Idempotent: returns false unless a round is
    /// running, so a second trigger in the same tick (or a call before the
    /// first start) changes nothing.
    pub fn end(&mut self, reason: EndReason) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);

        // Persist before anything reads the best back for display
        if self.high_score.submit(self.score) {
            self.events.push(GameEvent::NewHighScore(self.score));
        }

        log::info!(
            "Round ended ({}): score {}, high score {}",
            reason.as_str(),
            self.score,
            self.high_score.best()
        );
        self.emit_phase_change();
        true
    }

    /// Advance the round clock
    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt;
        self.time_remaining = (self.tuning.round_duration - self.elapsed).max(0.0);
    }

    /// Credit one caught reward
    pub fn collect_reward(&mut self, item_id: u32) {
        self.score += 1;
        self.events.push(GameEvent::RewardCaught {
            item_id,
            score: self.score,
        });
    }

    /// Set or clear the absolute horizontal target (pointer drag)
    pub fn set_catcher_target(&mut self, x: Option<f32>) {
        self.catcher.control_target = x;
    }

    /// Countdown shown to the player, whole seconds rounded up
    pub fn countdown_display(&self) -> u32 {
        self.time_remaining.ceil() as u32
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Plain view of the current frame for presentation
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            catcher_pos: self.catcher.pos,
            catcher_size: self.catcher.size,
            items: self
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id,
                    kind: item.kind,
                    pos: item.pos,
                    size: item.size,
                })
                .collect(),
            score: self.score,
            high_score: self.high_score.best(),
            countdown: self.countdown_display(),
            end_reason: self.end_reason,
        }
    }

    fn emit_phase_change(&mut self) {
        self.events.push(GameEvent::PhaseChanged(PhaseSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score.best(),
            reason: self.end_reason,
        }));
    }
}
