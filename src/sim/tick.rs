//! Simulation step
//!
//! Advances the session by one frame's (already clamped) delta time:
//! phase transitions, background, then - only while Running - spawning,
//! player physics, entity motion, collision resolution and purge.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::input::TickInput;
use super::physics::update_player;
use super::spawner::difficulty_at;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// What a tick produced besides the state change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// Quit was requested; the driver should stop
    pub quit: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, tuning: &Tuning) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Quit is honored in every phase, before anything else moves
    if input.quit_pressed {
        outcome.quit = true;
        return outcome;
    }

    match state.phase {
        GamePhase::Running if input.pause_pressed => {
            state.phase = GamePhase::Paused;
            outcome.events.push(GameEvent::Paused);
        }
        GamePhase::Paused if input.pause_pressed => {
            state.phase = GamePhase::Running;
            outcome.events.push(GameEvent::Resumed);
        }
        GamePhase::GameOver if input.restart_pressed => {
            state.restart(tuning);
            outcome.events.push(GameEvent::Restarted);
            log::info!("Run #{} started (best {:.0})", state.restarts + 1, state.best);
        }
        _ => {}
    }

    // Background always animates
    state.clock += dt;
    let star_speed = state.speed * tuning.world.star_scroll_factor;
    for star in &mut state.stars {
        star.update(star_speed, dt, &mut state.fx_rng, tuning);
    }

    if state.phase == GamePhase::Running {
        step_running(state, input, dt, tuning, &mut outcome.events);
    }

    // Shake is frozen while paused
    if state.phase != GamePhase::Paused {
        state.shake = (state.shake - dt * tuning.world.shake_decay).max(0.0);
        state.shake_offset = shake_offset(state);
    }

    outcome
}

fn step_running(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let world = &tuning.world;
    let scoring = &tuning.scoring;

    state.time_ticks += 1;
    state.elapsed += dt;
    state.difficulty = difficulty_at(state.elapsed, &tuning.spawn);
    state.speed += dt * (world.speed_ramp_base + state.difficulty * world.speed_ramp_per_difficulty);
    state.score += dt
        * scoring.score_rate
        * state.difficulty
        * (1.0 + scoring.combo_score_bonus * state.player.combo as f32);

    state.spawner.update(
        dt,
        state.difficulty,
        state.speed,
        tuning,
        &mut state.rng,
        &mut state.obstacles,
        &mut state.pickups,
    );

    update_player(&mut state.player, input, dt, tuning, events);

    let time = state.elapsed;
    for obstacle in &mut state.obstacles {
        obstacle.update(dt, time);
    }
    for pickup in &mut state.pickups {
        pickup.update(dt, time);
    }

    resolve_collisions(state, tuning, events);

    for particle in &mut state.particles {
        particle.update(dt);
    }

    state.purge_dead();
}

/// Random integer jitter within the current shake magnitude
fn shake_offset(state: &mut GameState) -> Vec2 {
    let magnitude = state.shake.floor() as i32;
    if magnitude <= 0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        state.fx_rng.random_range(-magnitude..=magnitude) as f32,
        state.fx_rng.random_range(-magnitude..=magnitude) as f32,
    )
}
