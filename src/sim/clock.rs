//! Frame timing
//!
//! Converts wall-clock millisecond timestamps into the per-frame delta that
//! scales every timer in the simulation.

/// Tracks the previous frame's timestamp and hands out deltas.
///
/// The first sample after construction or [`reset`](FrameClock::reset) yields
/// a delta of zero, so a long-idle timestamp cannot produce a giant catch-up
/// movement or shot burst on frame one.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the baseline; the next delta will be zero.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Delta in milliseconds since the previous sample. Timestamps that run
    /// backwards yield zero, never a negative delta.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) if now_ms >= prev => (now_ms - prev) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
