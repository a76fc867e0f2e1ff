//! The player's ship
//!
//! Movement, weapon state, shooting cadence, and hull integrity. The ship is
//! built once per session and reset in place between runs.

use glam::Vec2;

use super::aabb::Aabb;
use super::context::{AudioSink, InputSnapshot, SoundCue};
use super::pool::Pool;
use super::state::{PowerUpKind, Projectile};
use crate::consts::*;

/// Firing-pattern variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponMode {
    #[default]
    Normal,
    Rapid,
    Spread,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub weapon: WeaponMode,
    pub has_wingman: bool,
    /// Milliseconds between volleys for the current weapon
    pub shoot_interval: f32,
    /// Time accrued since the last volley
    pub cooldown: f32,
}

impl Ship {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Self::spawn_point(viewport),
            size: Vec2::splat(SHIP_SIZE),
            hp: SHIP_MAX_HP,
            max_hp: SHIP_MAX_HP,
            weapon: WeaponMode::Normal,
            has_wingman: false,
            shoot_interval: SHOOT_INTERVAL_NORMAL,
            cooldown: 0.0,
        }
    }

    fn spawn_point(viewport: Vec2) -> Vec2 {
        Vec2::new(
            viewport.x * 0.5 - SHIP_SIZE * 0.5,
            viewport.y - SHIP_SPAWN_LIFT,
        )
    }

    /// Restore default stats and position. Idempotent.
    pub fn reset(&mut self, viewport: Vec2) {
        self.pos = Self::spawn_point(viewport);
        self.hp = self.max_hp;
        self.weapon = WeaponMode::Normal;
        self.shoot_interval = SHOOT_INTERVAL_NORMAL;
        self.has_wingman = false;
        self.cooldown = 0.0;
    }

    /// Apply held movement axes, then clamp into the current viewport.
    ///
    /// Opposing axes cancel by summation; diagonals run at full speed on both
    /// axes. Both are deliberate.
    pub fn steer(&mut self, input: &InputSnapshot, viewport: Vec2) {
        if input.left {
            self.pos.x -= SHIP_SPEED;
        }
        if input.right {
            self.pos.x += SHIP_SPEED;
        }
        if input.up {
            self.pos.y -= SHIP_SPEED;
        }
        if input.down {
            self.pos.y += SHIP_SPEED;
        }

        let limit = (viewport - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, limit);
    }

    /// Accrue cooldown and fire a volley once the fire action is held and the
    /// interval has elapsed.
    pub fn try_shoot(
        &mut self,
        input: &InputSnapshot,
        dt: f32,
        projectiles: &mut Pool<Projectile>,
        audio: &mut dyn AudioSink,
    ) {
        self.cooldown += dt;
        if !input.fire || self.cooldown <= self.shoot_interval {
            return;
        }
        self.cooldown = 0.0;
        self.fire_volley(projectiles);
        audio.play(SoundCue::Shoot);
    }

    fn fire_volley(&self, projectiles: &mut Pool<Projectile>) {
        match self.weapon {
            WeaponMode::Spread => {
                // Three shots fan out from the nose
                let muzzle = Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y);
                projectiles.push(Projectile::new(muzzle, 0.0));
                projectiles.push(Projectile::new(muzzle, SPREAD_ANGLE));
                projectiles.push(Projectile::new(muzzle, -SPREAD_ANGLE));
            }
            WeaponMode::Normal | WeaponMode::Rapid => {
                // Twin guns just inside each wingtip
                projectiles.push(Projectile::new(
                    Vec2::new(self.pos.x + 5.0, self.pos.y),
                    0.0,
                ));
                projectiles.push(Projectile::new(
                    Vec2::new(self.pos.x + self.size.x - 5.0, self.pos.y),
                    0.0,
                ));
            }
        }

        if self.has_wingman {
            projectiles.push(Projectile::new(
                Vec2::new(self.pos.x - 20.0, self.pos.y + 20.0),
                0.0,
            ));
            projectiles.push(Projectile::new(
                Vec2::new(self.pos.x + self.size.x + 20.0, self.pos.y + 20.0),
                0.0,
            ));
        }
    }

    /// Apply a collected power-up. Picking the same kind twice is a no-op
    /// beyond the field assignment; weapon kinds overwrite each other.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.hp = (self.hp + HEAL_AMOUNT).min(self.max_hp);
            }
            PowerUpKind::Rapid => {
                self.weapon = WeaponMode::Rapid;
                self.shoot_interval = SHOOT_INTERVAL_RAPID;
            }
            PowerUpKind::Spread => {
                self.weapon = WeaponMode::Spread;
                self.shoot_interval = SHOOT_INTERVAL_SPREAD;
            }
            PowerUpKind::Wingman => {
                self.has_wingman = true;
            }
        }
    }

    /// Percentage in [0, 100]; hull damage can drive `hp` below zero but the
    /// displayed value never shows it.
    pub fn hp_percent(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp as f32) * 100.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
