//! Timed enemy creation and power-up drops
//!
//! Spawn cadence accelerates over a run: every spawn shaves a fixed step off
//! the interval until it hits a floor. The ramp is the game's difficulty
//! curve, not a bug.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, PowerUpKind};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Spawner {
    timer: f32,
    interval: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            timer: 0.0,
            interval: SPAWN_INTERVAL_START,
        }
    }

    /// Current milliseconds between spawns.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.interval = SPAWN_INTERVAL_START;
    }

    /// Called once per Playing frame. Emits at most one enemy; the timer
    /// accumulates on frames that don't spawn.
    pub fn poll(&mut self, dt: f32, viewport: Vec2, rng: &mut Pcg32) -> Option<Enemy> {
        if self.timer > self.interval {
            self.timer = 0.0;
            if self.interval > SPAWN_INTERVAL_FLOOR {
                self.interval = (self.interval - SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_FLOOR);
                if self.interval <= SPAWN_INTERVAL_FLOOR {
                    log::info!("spawn cadence reached its floor of {SPAWN_INTERVAL_FLOOR}ms");
                }
            }
            Some(Enemy::spawn(viewport, rng))
        } else {
            self.timer += dt;
            None
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Roll the 50% drop chance for a destroyed enemy.
pub fn roll_drop(rng: &mut Pcg32) -> Option<PowerUpKind> {
    if rng.random_bool(DROP_CHANCE) {
        Some(drop_kind(rng.random_range(0.0..1.0)))
    } else {
        None
    }
}

/// Map one uniform [0, 1) draw onto the drop table:
/// Rapid 30%, Spread 30%, Wingman 20%, Health 20%.
pub fn drop_kind(roll: f32) -> PowerUpKind {
    if roll < 0.3 {
        PowerUpKind::Rapid
    } else if roll < 0.6 {
        PowerUpKind::Spread
    } else if roll < 0.8 {
        PowerUpKind::Wingman
    } else {
        PowerUpKind::Health
    }
}
