//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas come in through [`clock::FrameClock`] only
//! - Seeded RNG only
//! - Stable iteration order within every pool
//! - No rendering or terminal dependencies

pub mod aabb;
pub mod clock;
pub mod collision;
pub mod context;
pub mod player;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use clock::FrameClock;
pub use context::{AudioSink, Context, InputSnapshot, Muted, SoundCue, UiSink};
pub use player::{Ship, WeaponMode};
pub use pool::{Entity, Pool};
pub use spawn::Spawner;
pub use state::{
    Enemy, FloatingText, GamePhase, GameState, Particle, PowerUp, PowerUpKind, Projectile,
};
pub use tick::{frame, reset_to_idle, restart, start};
