//! Neon Strike - a neon-soaked vertical space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Translation of settled state into abstract draw requests
//! - `settings`: Player preferences
//! - `highscores`: Score leaderboard

pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Ship bounding box (square, pixels)
    pub const SHIP_SIZE: f32 = 60.0;
    /// Ship displacement per held axis per frame
    pub const SHIP_SPEED: f32 = 8.0;
    pub const SHIP_MAX_HP: i32 = 100;
    /// Vertical distance between the ship's spawn point and the viewport bottom
    pub const SHIP_SPAWN_LIFT: f32 = 100.0;

    /// Milliseconds between volleys per weapon
    pub const SHOOT_INTERVAL_NORMAL: f32 = 200.0;
    pub const SHOOT_INTERVAL_RAPID: f32 = 80.0;
    pub const SHOOT_INTERVAL_SPREAD: f32 = 250.0;
    /// Angular offset of the outer spread shots (radians)
    pub const SPREAD_ANGLE: f32 = 0.2;

    /// Hull damage taken when an enemy rams the ship
    pub const RAM_DAMAGE: i32 = 20;
    /// Hit points restored by a Health power-up
    pub const HEAL_AMOUNT: i32 = 30;

    /// Enemy bounding box (square, pixels)
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_LIVES: i32 = 2;
    pub const ENEMY_SCORE: u32 = 10;

    /// Milliseconds between enemy spawns at the start of a run
    pub const SPAWN_INTERVAL_START: f32 = 1000.0;
    /// Interval shrink applied after every spawn
    pub const SPAWN_INTERVAL_STEP: f32 = 10.0;
    /// Fastest the spawn cadence ever gets
    pub const SPAWN_INTERVAL_FLOOR: f32 = 400.0;

    /// Projectile bounding box
    pub const BOLT_WIDTH: f32 = 4.0;
    pub const BOLT_HEIGHT: f32 = 15.0;
    /// Projectile travel per frame along its firing angle
    pub const BOLT_SPEED: f32 = 15.0;

    /// Power-up bounding box (square, pixels)
    pub const POWER_UP_SIZE: f32 = 30.0;
    /// Power-up descent per frame
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;
    /// Chance that a destroyed enemy drops a power-up
    pub const DROP_CHANCE: f64 = 0.5;

    /// Frames before an explosion particle expires
    pub const PARTICLE_MAX_AGE: u32 = 50;
    /// Particles below this size expire early
    pub const PARTICLE_MIN_SIZE: f32 = 0.2;
    /// Live + pending particle budget; bursts stop queuing past this
    pub const MAX_PARTICLES: usize = 256;
    /// Particle count for a non-lethal hit flash
    pub const HIT_BURST: usize = 5;
    /// Particle count for a kill explosion
    pub const KILL_BURST: usize = 10;

    /// Frames before a floating text expires
    pub const TEXT_MAX_AGE: u32 = 100;

    /// Background stars
    pub const STAR_COUNT: usize = 150;
}

/// Packed 0xRRGGBB colors shared by draw requests
pub mod palette {
    pub const SHIP: u32 = 0x00f3ff;
    pub const ENEMY_RED: u32 = 0xff0055;
    pub const ENEMY_ORANGE: u32 = 0xff9900;
    pub const BOLT: u32 = 0xccff00;
    pub const HIT_FLASH: u32 = 0xffff00;
    pub const RAPID: u32 = 0xffff00;
    pub const SPREAD: u32 = 0xaa00ff;
    pub const WINGMAN: u32 = 0x00f3ff;
    pub const HEALTH: u32 = 0x00ff88;
    pub const STAR: u32 = 0xffffff;
}
