//! Procedural obstacle and pickup spawning
//!
//! Two independent countdowns. Each one fires when it reaches zero, emits
//! entities at the right edge and rearms with a random interval that shrinks
//! as difficulty grows. All randomness comes from the gameplay RNG passed in,
//! so a seed fully determines the spawn sequence.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind, Pickup, PickupKind};
use crate::tuning::{SpawnTuning, Tuning};

/// Obstacle arrangement chosen on each spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPattern {
    Block,
    Laser,
    Spike,
    /// Staircase of 2-4 blocks
    Stack,
    /// One block plus a trailing spikeball
    Mix,
}

const EARLY_PATTERNS: [SpawnPattern; 2] = [SpawnPattern::Block, SpawnPattern::Laser];
const ALL_PATTERNS: [SpawnPattern; 5] = [
    SpawnPattern::Block,
    SpawnPattern::Laser,
    SpawnPattern::Spike,
    SpawnPattern::Stack,
    SpawnPattern::Mix,
];

/// Horizontal distance between stacked blocks
const STACK_STEP_X: f32 = 48.0;
const STACK_BLOCK_WIDTH: f32 = 36.0;
/// Horizontal offset of the spikeball in a Mix pattern
const MIX_SPIKE_OFFSET: f32 = 120.0;
/// Distance past the right edge where pickups appear
const PICKUP_SPAWN_MARGIN: f32 = 20.0;

/// Difficulty for a given Running time: `1 + min(cap, elapsed / ramp)`
pub fn difficulty_at(elapsed: f32, spawn: &SpawnTuning) -> f32 {
    1.0 + (elapsed / spawn.difficulty_ramp_seconds).min(spawn.max_difficulty_bonus)
}

/// Patterns eligible at a given difficulty
pub fn eligible_patterns(difficulty: f32, spawn: &SpawnTuning) -> &'static [SpawnPattern] {
    if difficulty > spawn.pattern_unlock_difficulty {
        &ALL_PATTERNS
    } else {
        &EARLY_PATTERNS
    }
}

/// Uniform sample that tolerates a degenerate range
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Integer-valued sample in `[lo, hi]` (pixel sizes)
fn pixels(rng: &mut Pcg32, lo: i32, hi: i32) -> f32 {
    rng.random_range(lo..=hi.max(lo)) as f32
}

fn random_phase(rng: &mut Pcg32) -> f32 {
    rng.random_range(0.0..std::f32::consts::TAU)
}

/// Spawn timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next obstacle pattern
    pub obstacle_timer: f32,
    /// Seconds until the next pickup
    pub pickup_timer: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacle_timer: 0.0,
            pickup_timer: tuning.spawn.first_pickup_delay,
        }
    }

    /// Advance both timers and spawn whatever fires this tick
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        difficulty: f32,
        speed: f32,
        tuning: &Tuning,
        rng: &mut Pcg32,
        obstacles: &mut Vec<Obstacle>,
        pickups: &mut Vec<Pickup>,
    ) {
        self.obstacle_timer -= dt;
        self.pickup_timer -= dt;

        if self.obstacle_timer <= 0.0 {
            self.obstacle_timer = next_obstacle_interval(difficulty, &tuning.spawn, rng);
            let pattern = eligible_patterns(difficulty, &tuning.spawn)
                .choose(rng)
                .copied()
                .unwrap_or(SpawnPattern::Block);
            let before = obstacles.len();
            spawn_pattern(pattern, speed, tuning, rng, obstacles);
            log::debug!(
                "Spawned {:?} ({} obstacles) at difficulty {:.2}",
                pattern,
                obstacles.len() - before,
                difficulty
            );
        }

        if self.pickup_timer <= 0.0 {
            let spawn = &tuning.spawn;
            self.pickup_timer = uniform(
                rng,
                spawn.pickup_interval_min / difficulty,
                spawn.pickup_interval_max / difficulty,
            );
            let pickup = spawn_pickup(speed, tuning, rng);
            log::debug!("Spawned {:?} pickup", pickup.kind);
            pickups.push(pickup);
        }
    }
}

/// Random interval inversely proportional to difficulty, floored
pub fn next_obstacle_interval(difficulty: f32, spawn: &SpawnTuning, rng: &mut Pcg32) -> f32 {
    let rate = spawn.base_rate / difficulty;
    let lo = (spawn.interval_jitter_low * rate).max(spawn.min_interval);
    let hi = (spawn.interval_jitter_high * rate).max(lo);
    uniform(rng, lo, hi)
}

/// Instantiate the obstacles of one pattern just past the right edge
pub fn spawn_pattern(
    pattern: SpawnPattern,
    speed: f32,
    tuning: &Tuning,
    rng: &mut Pcg32,
    out: &mut Vec<Obstacle>,
) {
    let spawn = &tuning.spawn;
    let ground = tuning.ground_y();
    let air_top = (tuning.world.height * 0.45) as i32;
    let base_x = tuning.world.width + spawn.spawn_margin;
    let laser_speed = speed * spawn.laser_speed_factor;
    let spike_speed = speed * spawn.spikeball_speed_factor;

    match pattern {
        SpawnPattern::Block => {
            let h = pixels(rng, 16, 60);
            let w = pixels(rng, 24, 48);
            let phase = random_phase(rng);
            out.push(Obstacle::new(ObstacleKind::Block, base_x, ground - h, w, h, speed, phase));
        }
        SpawnPattern::Laser => {
            let h = pixels(rng, 12, 20);
            let y = pixels(rng, air_top, ground as i32 - 60);
            let w = pixels(rng, 80, 140);
            let phase = random_phase(rng);
            out.push(Obstacle::new(ObstacleKind::Laser, base_x, y, w, h, laser_speed, phase));
        }
        SpawnPattern::Spike => {
            let size = pixels(rng, 22, 34);
            let y = pixels(rng, air_top, ground as i32 - 40);
            let phase = random_phase(rng);
            out.push(Obstacle::new(
                ObstacleKind::Spikeball,
                base_x,
                y,
                size,
                size,
                spike_speed,
                phase,
            ));
        }
        SpawnPattern::Stack => {
            let step = pixels(rng, 18, 28);
            let count = rng.random_range(2..=4);
            for i in 0..count {
                let h = step * (i + 1) as f32;
                let phase = random_phase(rng);
                out.push(Obstacle::new(
                    ObstacleKind::Block,
                    base_x + i as f32 * STACK_STEP_X,
                    ground - h,
                    STACK_BLOCK_WIDTH,
                    h,
                    speed,
                    phase,
                ));
            }
        }
        SpawnPattern::Mix => {
            let h = pixels(rng, 16, 48);
            let w = pixels(rng, 24, 48);
            let phase = random_phase(rng);
            out.push(Obstacle::new(ObstacleKind::Block, base_x, ground - h, w, h, speed, phase));

            let size = pixels(rng, 20, 28);
            let y = pixels(rng, air_top, ground as i32 - 60);
            let phase = random_phase(rng);
            out.push(Obstacle::new(
                ObstacleKind::Spikeball,
                base_x + MIX_SPIKE_OFFSET,
                y,
                size,
                size,
                spike_speed,
                phase,
            ));
        }
    }
}

/// Weighted pickup kind (Shield : SlowMo : Score)
pub fn choose_pickup_kind(spawn: &SpawnTuning, rng: &mut Pcg32) -> PickupKind {
    match WeightedIndex::new(spawn.pickup_weights) {
        Ok(dist) => PickupKind::ALL[dist.sample(rng)],
        Err(e) => {
            log::warn!("Invalid pickup weights {:?}: {e}", spawn.pickup_weights);
            PickupKind::Score
        }
    }
}

/// A pickup in the height band above the ground, just past the right edge
pub fn spawn_pickup(speed: f32, tuning: &Tuning, rng: &mut Pcg32) -> Pickup {
    let kind = choose_pickup_kind(&tuning.spawn, rng);
    let top = (tuning.world.height * 0.35) as i32;
    let y = pixels(rng, top, tuning.ground_y() as i32 - 80);
    let phase = random_phase(rng);
    Pickup::new(
        kind,
        tuning.world.width + PICKUP_SPAWN_MARGIN,
        y,
        speed * tuning.spawn.pickup_speed_factor,
        phase,
    )
}
