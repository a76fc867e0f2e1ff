//! Collision resolution
//!
//! Three policies run in a fixed order every Playing frame: ship vs enemies,
//! enemies vs projectiles, ship vs power-ups. Everything destroyed here is
//! only flagged; the owning pool removes it at compaction, so no policy ever
//! observes a partially-removed group.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::context::{Context, SoundCue};
use super::pool::Pool;
use super::spawn;
use super::state::{FloatingText, GamePhase, GameState, Particle, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::palette;

/// Queue a particle burst, respecting the global particle budget.
fn burst(
    particles: &mut Pool<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
) {
    for _ in 0..count {
        if particles.total() >= MAX_PARTICLES {
            break;
        }
        particles.queue(Particle::burst_at(pos, color, rng));
    }
}

/// Resolve all collisions for the current frame.
pub fn resolve(state: &mut GameState, ctx: &mut Context<'_>) {
    let GameState {
        phase,
        score,
        ship,
        enemies,
        projectiles,
        power_ups,
        particles,
        texts,
        rng,
        ..
    } = state;

    let ship_box = ship.bounds();
    let mut fatal = false;

    // 1. Ramming: an enemy that reaches the ship dies on impact and costs hull
    for enemy in enemies.iter_mut() {
        if enemy.dead || !ship_box.overlaps(&enemy.bounds()) {
            continue;
        }
        enemy.dead = true;
        burst(particles, rng, enemy.pos, enemy.color, HIT_BURST);
        ship.hp -= RAM_DAMAGE;
        ctx.ui.health_changed(ship.hp_percent());
        if ship.hp <= 0 {
            fatal = true;
        }
    }

    // 2. Gunfire: each bolt lands at most one hit; the kill transition fires
    //    its effects exactly once
    for enemy in enemies.iter_mut() {
        if enemy.dead {
            continue;
        }
        for bolt in projectiles.iter_mut() {
            if bolt.dead || enemy.dead {
                continue;
            }
            if !enemy.bounds().overlaps(&bolt.bounds()) {
                continue;
            }

            bolt.dead = true;
            enemy.lives -= 1;
            burst(particles, rng, bolt.pos, palette::HIT_FLASH, HIT_BURST);

            if enemy.lives <= 0 {
                enemy.dead = true;
                burst(particles, rng, enemy.pos, enemy.color, KILL_BURST);
                *score += enemy.score_value;
                ctx.ui.score_changed(*score);
                ctx.audio.play(SoundCue::Explosion);
                if let Some(kind) = spawn::roll_drop(rng) {
                    power_ups.queue(PowerUp::new(enemy.pos, kind));
                }
            }
        }
    }

    // 3. Pickups
    for power_up in power_ups.iter_mut() {
        if power_up.dead || !ship_box.overlaps(&power_up.bounds()) {
            continue;
        }
        power_up.dead = true;
        ship.apply_power_up(power_up.kind);
        if power_up.kind == PowerUpKind::Health {
            ctx.ui.health_changed(ship.hp_percent());
        }
        ctx.audio.play(SoundCue::PowerUp);
        texts.queue(FloatingText::new(
            power_up.kind.label(),
            ship.pos,
            power_up.kind.color(),
        ));
        log::debug!("collected {:?}", power_up.kind);
    }

    // Terminal transition. Guarded on the phase so overlapping hits in one
    // frame (or a later stray frame) cannot signal game over twice.
    if fatal && *phase == GamePhase::Playing {
        *phase = GamePhase::GameOver;
        ctx.audio.play(SoundCue::GameOver);
        log::info!("run ended at score {score}");
    }
}
