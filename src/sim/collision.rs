//! Collision detection and resolution
//!
//! Geometry is circle-vs-rectangle: the player (and each pickup's bounding
//! box) against obstacle rectangles. Resolution maps each intersection to a
//! state change: shield absorb, crash, near-miss combo or pickup effect.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Burst, GameEvent, GamePhase, GameState, PickupKind, spawn_burst};
use crate::tuning::Tuning;

/// Circle overlaps rectangle (touching counts)
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length_squared() <= radius * radius
}

/// Circle passes within `margin` of the rectangle without touching it
pub fn is_near_miss(center: Vec2, radius: f32, rect: &Rect, margin: f32) -> bool {
    rect.distance_to(center) < radius + margin
}

/// Combo value after a near-miss tick
///
/// Extends a live streak, otherwise starts a new one at 1; never above `max`.
pub fn next_combo(combo: u32, combo_time: f32, max: u32) -> u32 {
    let next = if combo_time > 0.0 { combo + 1 } else { 1 };
    next.min(max)
}

/// Resolve all player interactions for this tick
///
/// Entities already marked dead are skipped, so nothing resolves twice.
/// A crash ends resolution immediately: obstacles later in the collection,
/// near-miss bookkeeping and pickups are not processed.
pub fn resolve_collisions(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let scoring = &tuning.scoring;
    let cap = tuning.world.max_particles;
    let center = state.player.pos;
    let radius = state.player.radius;

    let mut near_miss = false;
    let mut crashed = false;

    for obstacle in state.obstacles.iter_mut().filter(|o| o.alive) {
        let rect = obstacle.rect();
        if circle_rect_overlap(center, radius, &rect) {
            if state.player.shield > 0.0 {
                state.player.shield = 0.0;
                obstacle.alive = false;
                state.shake = tuning.world.shield_shake;
                spawn_burst(&mut state.particles, &mut state.fx_rng, center, Burst::SHIELD, cap);
                events.push(GameEvent::ShieldAbsorbed);
                log::debug!("Shield absorbed {:?}", obstacle.kind);
            } else {
                crashed = true;
                break;
            }
        } else if is_near_miss(center, radius, &rect, scoring.near_miss_margin) {
            near_miss = true;
        }
    }

    if crashed {
        state.game_over(tuning);
        events.push(GameEvent::Crashed { score: state.score });
        log::info!(
            "Game over: score {:.0}, best {:.0}",
            state.score,
            state.best
        );
        return;
    }

    if near_miss {
        let player = &mut state.player;
        let before = player.combo;
        player.combo = next_combo(player.combo, player.combo_time, scoring.max_combo);
        player.combo_time = scoring.combo_window;
        if player.combo != before {
            events.push(GameEvent::ComboIncreased {
                combo: player.combo,
            });
        }
    }

    for pickup in state.pickups.iter_mut().filter(|p| p.alive) {
        if !circle_rect_overlap(center, radius, &pickup.rect()) {
            continue;
        }
        pickup.alive = false;
        match pickup.kind {
            // Re-collecting resets the timer rather than stacking
            PickupKind::Shield => state.player.shield = scoring.shield_duration,
            PickupKind::SlowMo => state.player.slowmo = scoring.slowmo_duration,
            PickupKind::Score => {
                state.score += scoring.score_pickup_base
                    + scoring.score_pickup_per_combo * state.player.combo as f32;
                spawn_burst(
                    &mut state.particles,
                    &mut state.fx_rng,
                    pickup.pos,
                    Burst::SCORE,
                    cap,
                );
            }
        }
        events.push(GameEvent::PickupCollected { kind: pickup.kind });
        log::debug!("Collected {:?} pickup", pickup.kind);
    }
}

/// True while the session can still be hurt
pub fn is_live(state: &GameState) -> bool {
    state.phase == GamePhase::Running && state.player.alive
}
