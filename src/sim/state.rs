//! Game state and core entity types
//!
//! Entity motion constants are per-frame values, matching the fixed-step feel
//! of the gameplay; only the spawn and shoot timers consume real frame
//! deltas.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::clock::FrameClock;
use super::player::Ship;
use super::pool::{Entity, Pool};
use super::spawn::Spawner;
use crate::consts::*;
use crate::palette;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for a start signal; no entities exist
    Idle,
    /// Simulation advances every frame
    Playing,
    /// Run ended; scene frozen until an explicit restart or reset
    GameOver,
}

/// A descending hostile. Spins as it falls and bounces off the side walls.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub lives: i32,
    pub score_value: u32,
    pub color: u32,
    pub angle: f32,
    pub spin: f32,
    pub dead: bool,
}

impl Enemy {
    /// Randomized spawn just above the viewport top.
    pub fn spawn(viewport: Vec2, rng: &mut Pcg32) -> Self {
        let size = Vec2::splat(ENEMY_SIZE);
        let max_x = (viewport.x - size.x).max(1.0);
        Self {
            pos: Vec2::new(rng.random_range(0.0..max_x), -size.y),
            size,
            vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(1.0..3.0)),
            lives: ENEMY_LIVES,
            score_value: ENEMY_SCORE,
            color: if rng.random_bool(0.5) {
                palette::ENEMY_RED
            } else {
                palette::ENEMY_ORANGE
            },
            angle: 0.0,
            spin: rng.random_range(-0.05..0.05),
            dead: false,
        }
    }

    pub fn drift(&mut self, viewport: Vec2) {
        self.pos += self.vel;
        self.angle += self.spin;

        // Bounce off side walls
        if self.pos.x < 0.0 || self.pos.x > viewport.x - self.size.x {
            self.vel.x = -self.vel.x;
        }

        // Slipping past the bottom is an escape, not a kill
        if self.pos.y > viewport.y {
            self.dead = true;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Enemy {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// A ship-fired bolt travelling upward along its firing angle.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            size: Vec2::new(BOLT_WIDTH, BOLT_HEIGHT),
            angle,
            dead: false,
        }
    }

    pub fn fly(&mut self, viewport: Vec2) {
        self.pos.y -= BOLT_SPEED * self.angle.cos();
        self.pos.x += BOLT_SPEED * self.angle.sin();
        if self.pos.y < 0.0 || self.pos.x < 0.0 || self.pos.x > viewport.x {
            self.dead = true;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Projectile {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// A shrinking explosion fleck.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    pub age: u32,
    pub dead: bool,
}

impl Particle {
    /// One fleck of a burst: random size and scatter velocity.
    pub fn burst_at(pos: Vec2, color: u32, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
            size: rng.random_range(2.0..7.0),
            color,
            age: 0,
            dead: false,
        }
    }

    pub fn fade(&mut self) {
        self.pos += self.vel;
        self.size *= 0.95;
        self.age += 1;
        if self.age > PARTICLE_MAX_AGE || self.size < PARTICLE_MIN_SIZE {
            self.dead = true;
        }
    }

    pub fn opacity(&self) -> f32 {
        (1.0 - self.age as f32 / PARTICLE_MAX_AGE as f32).max(0.0)
    }
}

impl Entity for Particle {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Rapid,
    Spread,
    Wingman,
    Health,
}

impl PowerUpKind {
    /// Pickup feedback text floated over the ship.
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Rapid => "RAPID FIRE!",
            PowerUpKind::Spread => "SPREAD SHOT!",
            PowerUpKind::Wingman => "WINGMAN EQUIPPED!",
            PowerUpKind::Health => "+30 HP",
        }
    }

    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::Rapid => palette::RAPID,
            PowerUpKind::Spread => palette::SPREAD,
            PowerUpKind::Wingman => palette::WINGMAN,
            PowerUpKind::Health => palette::HEALTH,
        }
    }

    /// Single-character badge drawn inside the capsule.
    pub fn glyph(self) -> char {
        match self {
            PowerUpKind::Rapid => 'R',
            PowerUpKind::Spread => 'S',
            PowerUpKind::Wingman => 'W',
            PowerUpKind::Health => '+',
        }
    }
}

/// A capsule drifting down from a destroyed enemy.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    pub dead: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(POWER_UP_SIZE),
            kind,
            dead: false,
        }
    }

    pub fn fall(&mut self, viewport: Vec2) {
        self.pos.y += POWER_UP_FALL_SPEED;
        if self.pos.y > viewport.y {
            self.dead = true;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for PowerUp {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Rising pickup-feedback text.
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub value: String,
    pub color: u32,
    pub age: u32,
    pub dead: bool,
}

impl FloatingText {
    pub fn new(value: impl Into<String>, pos: Vec2, color: u32) -> Self {
        Self {
            pos,
            value: value.into(),
            color,
            age: 0,
            dead: false,
        }
    }

    pub fn rise(&mut self) {
        self.pos.y -= 1.0;
        self.age += 1;
        if self.age > TEXT_MAX_AGE {
            self.dead = true;
        }
    }

    pub fn opacity(&self) -> f32 {
        (1.0 - self.age as f32 / TEXT_MAX_AGE as f32).max(0.0)
    }
}

impl Entity for FloatingText {
    fn is_dead(&self) -> bool {
        self.dead
    }
}

/// Complete session state: the ship, every entity pool, and the machinery
/// that drives them. Owned for the whole session; a restart resets fields in
/// place rather than rebuilding the world.
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    pub viewport: Vec2,
    pub ship: Ship,
    pub enemies: Pool<Enemy>,
    pub projectiles: Pool<Projectile>,
    pub power_ups: Pool<PowerUp>,
    pub particles: Pool<Particle>,
    pub texts: Pool<FloatingText>,
    pub spawner: Spawner,
    pub clock: FrameClock,
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            viewport,
            ship: Ship::new(viewport),
            enemies: Pool::new(),
            projectiles: Pool::new(),
            power_ups: Pool::new(),
            particles: Pool::new(),
            texts: Pool::new(),
            spawner: Spawner::new(),
            clock: FrameClock::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The viewport may change between frames; every boundary clamp reads the
    /// current value.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Clamped health percentage for external display.
    pub fn hp_percent(&self) -> f32 {
        self.ship.hp_percent()
    }

    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.texts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_enemy_spawns_above_viewport_within_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let e = Enemy::spawn(VIEW, &mut rng);
            assert_eq!(e.pos.y, -ENEMY_SIZE);
            assert!(e.pos.x >= 0.0 && e.pos.x < VIEW.x - ENEMY_SIZE);
            assert!(e.vel.y >= 1.0 && e.vel.y < 3.0);
            assert!(e.vel.x >= -1.0 && e.vel.x < 1.0);
            assert!(e.spin >= -0.05 && e.spin < 0.05);
            assert_eq!(e.lives, ENEMY_LIVES);
        }
    }

    #[test]
    fn test_enemy_bounces_off_side_walls() {
        let mut e = Enemy::spawn(VIEW, &mut rng());
        e.pos = Vec2::new(1.0, 100.0);
        e.vel = Vec2::new(-2.0, 1.0);
        e.drift(VIEW);
        assert!(e.vel.x > 0.0);

        e.pos.x = VIEW.x - e.size.x + 1.0;
        e.drift(VIEW);
        assert!(e.vel.x < 0.0);
    }

    #[test]
    fn test_enemy_expires_past_bottom() {
        let mut e = Enemy::spawn(VIEW, &mut rng());
        e.pos = Vec2::new(100.0, VIEW.y + 1.0);
        e.vel = Vec2::new(0.0, 1.0);
        e.drift(VIEW);
        assert!(e.is_dead());
    }

    #[test]
    fn test_projectile_flies_straight_at_angle_zero() {
        let mut p = Projectile::new(Vec2::new(100.0, 300.0), 0.0);
        p.fly(VIEW);
        assert_eq!(p.pos, Vec2::new(100.0, 300.0 - BOLT_SPEED));
        assert!(!p.is_dead());
    }

    #[test]
    fn test_projectile_angles_curve_sideways() {
        let mut left = Projectile::new(Vec2::new(100.0, 300.0), -0.2);
        let mut right = Projectile::new(Vec2::new(100.0, 300.0), 0.2);
        left.fly(VIEW);
        right.fly(VIEW);
        assert!(left.pos.x < 100.0);
        assert!(right.pos.x > 100.0);
        // Both still travel mostly upward
        assert!(left.pos.y < 300.0 && right.pos.y < 300.0);
    }

    #[test]
    fn test_projectile_expires_off_screen() {
        let mut p = Projectile::new(Vec2::new(100.0, 5.0), 0.0);
        p.fly(VIEW);
        assert!(p.is_dead());
    }

    #[test]
    fn test_particle_lifetime() {
        let mut p = Particle::burst_at(Vec2::ZERO, palette::HIT_FLASH, &mut rng());
        let start_size = p.size;
        p.fade();
        assert!(p.size < start_size);
        for _ in 0..PARTICLE_MAX_AGE + 1 {
            p.fade();
        }
        assert!(p.is_dead());
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_power_up_falls_and_expires() {
        let mut p = PowerUp::new(Vec2::new(50.0, VIEW.y - 1.0), PowerUpKind::Health);
        p.fall(VIEW);
        assert!(p.is_dead());
    }

    #[test]
    fn test_floating_text_rises_then_expires() {
        let mut t = FloatingText::new("+30 HP", Vec2::new(10.0, 50.0), palette::HEALTH);
        t.rise();
        assert_eq!(t.pos.y, 49.0);
        for _ in 0..TEXT_MAX_AGE {
            t.rise();
        }
        assert!(t.is_dead());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut state = GameState::new(1, VIEW);
        state.resize(1024.0, 768.0);
        assert_eq!(state.viewport, Vec2::new(1024.0, 768.0));
    }
}
