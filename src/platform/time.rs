//! Frame timing

use crate::clamp_dt;

/// Converts frame timestamps (milliseconds) into clamped deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seed the clock without producing a delta (page load)
    pub fn start(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Delta since the previous frame in seconds, at most `max_dt`
    ///
    /// Zero on the first frame and when time goes backwards.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt, self.max_dt)
    }
}
