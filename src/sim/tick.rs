//! Session state machine and the per-frame drive
//!
//! Exactly one phase is active at a time. Idle and GameOver frames leave the
//! world untouched; Playing frames run the full cycle: ship, spawner, pool
//! steps, collision, compaction.

use super::collision;
use super::context::{Context, InputSnapshot};
use super::state::{GamePhase, GameState};

/// Begin a run. Valid from Idle or GameOver; score, ship, pools, spawn
/// cadence, and the clock baseline all return to their starting values.
pub fn start(state: &mut GameState, ctx: &mut Context<'_>) {
    state.phase = GamePhase::Playing;
    state.score = 0;
    ctx.ui.score_changed(0);
    state.ship.reset(state.viewport);
    ctx.ui.health_changed(state.ship.hp_percent());
    state.clear_entities();
    state.spawner.reset();
    state.clock.reset();
    log::info!("run started");
}

/// Identical effects to [`start`]; named for the session-control signal that
/// follows a finished run.
pub fn restart(state: &mut GameState, ctx: &mut Context<'_>) {
    start(state, ctx);
}

/// Return to the idle screen without starting a run.
pub fn reset_to_idle(state: &mut GameState, ctx: &mut Context<'_>) {
    state.phase = GamePhase::Idle;
    state.score = 0;
    ctx.ui.score_changed(0);
    state.ship.reset(state.viewport);
    ctx.ui.health_changed(state.ship.hp_percent());
    state.clear_entities();
    state.spawner.reset();
    log::info!("returned to idle");
}

/// Advance one frame. `now_ms` is the environment's refresh timestamp; only
/// Playing frames consume the resulting delta.
pub fn frame(state: &mut GameState, now_ms: f64, input: &InputSnapshot, ctx: &mut Context<'_>) {
    let dt = state.clock.delta(now_ms);
    if state.phase != GamePhase::Playing {
        return;
    }
    advance(state, dt, input, ctx);
}

fn advance(state: &mut GameState, dt: f32, input: &InputSnapshot, ctx: &mut Context<'_>) {
    let viewport = state.viewport;

    // Ship first, so fresh bolts travel this frame
    state.ship.steer(input, viewport);
    {
        let GameState {
            ship, projectiles, ..
        } = state;
        ship.try_shoot(input, dt, projectiles, ctx.audio);
    }

    // Spawner may add one enemy; it drifts this frame too
    {
        let GameState {
            spawner,
            enemies,
            rng,
            ..
        } = state;
        if let Some(enemy) = spawner.poll(dt, viewport, rng) {
            enemies.push(enemy);
        }
    }

    // Step every pool
    state.projectiles.step(|b| b.fly(viewport));
    state.enemies.step(|e| e.drift(viewport));
    state.power_ups.step(|p| p.fall(viewport));
    state.particles.step(|p| p.fade());
    state.texts.step(|t| t.rise());

    // Resolve interactions; deaths are flags only
    collision::resolve(state, ctx);

    // Compaction: flagged entries leave, queued entries join
    state.projectiles.compact();
    state.enemies.compact();
    state.power_ups.compact();
    state.particles.compact();
    state.texts.compact();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::context::Muted;
    use crate::sim::state::{Enemy, GamePhase};
    use glam::Vec2;

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    fn muted_frame(state: &mut GameState, now_ms: f64, input: &InputSnapshot) {
        let (mut audio, mut ui) = (Muted, Muted);
        let mut ctx = Context {
            audio: &mut audio,
            ui: &mut ui,
        };
        frame(state, now_ms, input, &mut ctx);
    }

    fn muted_start(state: &mut GameState) {
        let (mut audio, mut ui) = (Muted, Muted);
        let mut ctx = Context {
            audio: &mut audio,
            ui: &mut ui,
        };
        start(state, &mut ctx);
    }

    #[test]
    fn test_idle_frames_do_not_simulate() {
        let mut state = GameState::new(1, VIEW);
        let before = state.ship.pos;
        let input = InputSnapshot {
            right: true,
            fire: true,
            ..Default::default()
        };
        for i in 0..10 {
            muted_frame(&mut state, i as f64 * 500.0, &input);
        }
        assert_eq!(state.ship.pos, before);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(1, VIEW);
        state.score = 500;
        state.ship.hp = 10;
        state.enemies.push(Enemy::spawn(VIEW, &mut state.rng));

        muted_start(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.ship.hp, SHIP_MAX_HP);
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawner.interval(), SPAWN_INTERVAL_START);
    }

    #[test]
    fn test_first_frame_after_start_has_zero_delta() {
        let mut state = GameState::new(1, VIEW);
        // Burn some clock history before the run starts
        muted_frame(&mut state, 1000.0, &InputSnapshot::default());
        muted_frame(&mut state, 2000.0, &InputSnapshot::default());
        muted_start(&mut state);

        // A huge timestamp right after start yields dt 0: the shoot
        // accumulator must not jump
        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        muted_frame(&mut state, 99_000.0, &fire);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_playing_spawns_enemies_over_time() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);

        let mut now = 0.0;
        for _ in 0..40 {
            now += 100.0;
            muted_frame(&mut state, now, &InputSnapshot::default());
        }
        assert!(state.enemies.len() >= 2);
    }

    #[test]
    fn test_fire_held_produces_volleys() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);

        let fire = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        let mut now = 0.0;
        for _ in 0..5 {
            now += 150.0;
            muted_frame(&mut state, now, &fire);
        }
        // 600ms of accrual at a 200ms interval: at least one twin volley,
        // minus any bolts that already left the top
        assert!(state.projectiles.len() >= 2);
    }

    #[test]
    fn test_game_over_freezes_the_world() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);
        muted_frame(&mut state, 0.0, &InputSnapshot::default());

        // Park an enemy on the ship until the hull gives out
        let mut now = 0.0;
        while state.phase == GamePhase::Playing {
            let mut enemy = Enemy::spawn(VIEW, &mut state.rng);
            enemy.pos = state.ship.pos;
            enemy.vel = Vec2::ZERO;
            state.enemies.push(enemy);
            now += 16.0;
            muted_frame(&mut state, now, &InputSnapshot::default());
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        let frozen_score = state.score;
        let frozen_particles = state.particles.len();
        let input = InputSnapshot {
            left: true,
            fire: true,
            ..Default::default()
        };
        let pos = state.ship.pos;
        for i in 0..10 {
            muted_frame(&mut state, now + 1000.0 * i as f64, &input);
        }
        assert_eq!(state.ship.pos, pos);
        assert_eq!(state.score, frozen_score);
        assert_eq!(state.particles.len(), frozen_particles);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);
        state.phase = GamePhase::GameOver;
        state.score = 120;
        state.ship.hp = -20;

        let (mut audio, mut ui) = (Muted, Muted);
        let mut ctx = Context {
            audio: &mut audio,
            ui: &mut ui,
        };
        restart(&mut state, &mut ctx);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.ship.hp, SHIP_MAX_HP);
    }

    #[test]
    fn test_reset_to_idle_clears_without_starting() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);
        state.phase = GamePhase::GameOver;
        state.enemies.push(Enemy::spawn(VIEW, &mut state.rng));

        let (mut audio, mut ui) = (Muted, Muted);
        let mut ctx = Context {
            audio: &mut audio,
            ui: &mut ui,
        };
        reset_to_idle(&mut state, &mut ctx);

        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.enemies.is_empty());
        assert_eq!(state.ship.hp, SHIP_MAX_HP);
    }

    #[test]
    fn test_no_dead_entries_survive_a_frame() {
        let mut state = GameState::new(1, VIEW);
        muted_start(&mut state);

        // An enemy past the bottom edge expires during its step
        let mut enemy = Enemy::spawn(VIEW, &mut state.rng);
        enemy.pos = Vec2::new(100.0, VIEW.y + 5.0);
        state.enemies.push(enemy);

        muted_frame(&mut state, 16.0, &InputSnapshot::default());
        assert!(state.enemies.iter().all(|e| !e.dead));
        assert!(state.projectiles.iter().all(|b| !b.dead));
        assert!(state.particles.iter().all(|p| !p.dead));
    }
}
