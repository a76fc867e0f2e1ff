//! Draw-request emission
//!
//! The simulation never draws; it describes. Once a frame has fully settled
//! (post-compaction), [`draw`] walks the state in paint order and hands
//! abstract requests to whatever surface the frontend provides.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::palette;
use crate::sim::{GamePhase, GameState, PowerUpKind};

/// What to paint. Concrete geometry is the render surface's business.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Background fleck
    Star,
    /// Power-up capsule with its badge character
    Capsule(PowerUpKind),
    /// Ship projectile
    Bolt,
    /// Enemy body
    Hull,
    /// Explosion fleck
    Spark,
    /// Rising feedback text
    Text(String),
    /// The player's ship
    Ship,
    /// Wingman escort pod
    Pod,
}

/// One paint instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub shape: Shape,
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
    /// 1.0 opaque, 0.0 invisible
    pub opacity: f32,
}

impl DrawRequest {
    fn solid(shape: Shape, pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            shape,
            pos,
            size,
            rotation: 0.0,
            color,
            opacity: 1.0,
        }
    }
}

/// Accepts draw requests in paint order.
pub trait RenderSink {
    fn submit(&mut self, request: DrawRequest);
}

impl RenderSink for Vec<DrawRequest> {
    fn submit(&mut self, request: DrawRequest) {
        self.push(request);
    }
}

/// Emit the settled frame in paint order: power-ups, projectiles, enemies,
/// particles, texts, ship. The caller paints its background (starfield)
/// before calling. Idle frames emit nothing; a GameOver frame re-emits the
/// frozen scene.
pub fn draw(state: &GameState, sink: &mut dyn RenderSink) {
    if state.phase == GamePhase::Idle {
        return;
    }

    for power_up in state.power_ups.iter() {
        sink.submit(DrawRequest::solid(
            Shape::Capsule(power_up.kind),
            power_up.pos,
            power_up.size,
            power_up.kind.color(),
        ));
    }

    for bolt in state.projectiles.iter() {
        sink.submit(DrawRequest {
            shape: Shape::Bolt,
            pos: bolt.pos,
            size: bolt.size,
            rotation: bolt.angle,
            color: palette::BOLT,
            opacity: 1.0,
        });
    }

    for enemy in state.enemies.iter() {
        sink.submit(DrawRequest {
            shape: Shape::Hull,
            pos: enemy.pos,
            size: enemy.size,
            rotation: enemy.angle,
            color: enemy.color,
            opacity: 1.0,
        });
    }

    for particle in state.particles.iter() {
        sink.submit(DrawRequest {
            shape: Shape::Spark,
            pos: particle.pos,
            size: Vec2::splat(particle.size),
            rotation: 0.0,
            color: particle.color,
            opacity: particle.opacity(),
        });
    }

    for text in state.texts.iter() {
        sink.submit(DrawRequest {
            shape: Shape::Text(text.value.clone()),
            pos: text.pos,
            size: Vec2::ZERO,
            rotation: 0.0,
            color: text.color,
            opacity: text.opacity(),
        });
    }

    // Ship paints last, over everything
    let ship = &state.ship;
    sink.submit(DrawRequest::solid(
        Shape::Ship,
        ship.pos,
        ship.size,
        palette::SHIP,
    ));
    if ship.has_wingman {
        // Escort pods off each wingtip
        let center = ship.bounds().center();
        for dx in [-40.0, 40.0] {
            sink.submit(DrawRequest::solid(
                Shape::Pod,
                center + Vec2::new(dx, 0.0),
                Vec2::splat(10.0),
                palette::WINGMAN,
            ));
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Star {
    pos: Vec2,
    size: f32,
    speed: f32,
}

/// Scrolling background starfield. Purely cosmetic: it lives outside the
/// simulation and keeps drifting on the idle screen.
#[derive(Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    rng: Pcg32,
}

impl Starfield {
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..viewport.x.max(1.0)),
                    rng.random_range(0.0..viewport.y.max(1.0)),
                ),
                size: rng.random_range(0.0..2.0),
                speed: rng.random_range(0.1..0.6),
            })
            .collect();
        Self { stars, rng }
    }

    /// Drift every star down; ones past the bottom re-enter at the top in a
    /// fresh column.
    pub fn scroll(&mut self, viewport: Vec2) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > viewport.y {
                star.pos.y = 0.0;
                star.pos.x = self.rng.random_range(0.0..viewport.x.max(1.0));
            }
        }
    }

    pub fn emit(&self, sink: &mut dyn RenderSink) {
        for star in &self.stars {
            sink.submit(DrawRequest::solid(
                Shape::Star,
                star.pos,
                Vec2::splat(star.size),
                palette::STAR,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Context, Muted, PowerUp, Projectile};

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    fn layer(shape: &Shape) -> u8 {
        match shape {
            Shape::Star => 0,
            Shape::Capsule(_) => 1,
            Shape::Bolt => 2,
            Shape::Hull => 3,
            Shape::Spark => 4,
            Shape::Text(_) => 5,
            Shape::Ship => 6,
            Shape::Pod => 7,
        }
    }

    #[test]
    fn test_idle_emits_nothing() {
        let state = GameState::new(1, VIEW);
        let mut out: Vec<DrawRequest> = Vec::new();
        draw(&state, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_playing_emits_in_paint_order() {
        let mut state = GameState::new(1, VIEW);
        let (mut audio, mut ui) = (Muted, Muted);
        let mut ctx = Context {
            audio: &mut audio,
            ui: &mut ui,
        };
        crate::sim::start(&mut state, &mut ctx);

        state
            .power_ups
            .push(PowerUp::new(Vec2::new(10.0, 10.0), PowerUpKind::Rapid));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(20.0, 20.0), 0.0));

        let mut out: Vec<DrawRequest> = Vec::new();
        draw(&state, &mut out);

        let layers: Vec<u8> = out.iter().map(|r| layer(&r.shape)).collect();
        let mut sorted = layers.clone();
        sorted.sort_unstable();
        assert_eq!(layers, sorted);
        assert_eq!(out.last().unwrap().shape, Shape::Ship);
    }

    #[test]
    fn test_wingman_pods_follow_the_ship() {
        let mut state = GameState::new(1, VIEW);
        state.phase = GamePhase::Playing;
        state.ship.has_wingman = true;

        let mut out: Vec<DrawRequest> = Vec::new();
        draw(&state, &mut out);

        let pods: Vec<&DrawRequest> = out.iter().filter(|r| r.shape == Shape::Pod).collect();
        assert_eq!(pods.len(), 2);
    }

    #[test]
    fn test_starfield_wraps_to_top() {
        let mut field = Starfield::new(VIEW, 3);
        for _ in 0..5000 {
            field.scroll(VIEW);
        }
        let mut out: Vec<DrawRequest> = Vec::new();
        field.emit(&mut out);
        assert_eq!(out.len(), STAR_COUNT);
        assert!(
            out.iter()
                .all(|r| r.pos.y >= 0.0 && r.pos.y <= VIEW.y + 1.0 && r.pos.x >= 0.0)
        );
    }
}
