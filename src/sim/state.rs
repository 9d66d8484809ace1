//! Game state and core simulation types
//!
//! The session exclusively owns the player and every entity collection.
//! Entities never reference each other; cross-entity effects go through
//! the collision pass.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Gameplay frozen, background still animating
    Paused,
    /// Run ended by an unshielded crash
    GameOver,
}

/// Gameplay events emitted by a tick (consumed by audio and logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    /// Hard landing (downward speed above the impact threshold)
    Landed { impact_speed: f32 },
    ShieldAbsorbed,
    Crashed { score: f32 },
    ComboIncreased { combo: u32 },
    PickupCollected { kind: PickupKind },
    Paused,
    Resumed,
    Restarted,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub on_ground: bool,
    /// Seconds left in which a jump still counts as grounded
    pub coyote: f32,
    /// Seconds a pressed jump stays queued
    pub jump_buffer: f32,
    /// Seconds of reduced gravity left after a jump
    pub hover: f32,
    pub shield: f32,
    pub slowmo: f32,
    pub combo_time: f32,
    pub combo: u32,
    pub alive: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.world.width * tuning.player.start_x_frac,
                tuning.world.height * tuning.player.start_y_frac,
            ),
            vel: Vec2::ZERO,
            radius: tuning.player.radius,
            on_ground: false,
            coyote: 0.0,
            jump_buffer: 0.0,
            hover: 0.0,
            shield: 0.0,
            slowmo: 0.0,
            combo_time: 0.0,
            combo: 0,
            alive: true,
        }
    }

    /// Player resting on the ground line
    pub fn grounded(tuning: &Tuning) -> Self {
        let mut player = Self::new(tuning);
        player.pos.y = tuning.ground_y() - player.radius;
        player.on_ground = true;
        player.coyote = tuning.player.coyote_window;
        player
    }
}

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Ground-standing block
    Block,
    /// Thin bar oscillating gently
    Laser,
    /// Square hazard bobbing widely
    Spikeball,
}

impl ObstacleKind {
    /// (amplitude px, angular speed rad/s) of the vertical oscillation
    pub fn oscillation(&self) -> Option<(f32, f32)> {
        match self {
            ObstacleKind::Block => None,
            ObstacleKind::Laser => Some((30.0, 2.0)),
            ObstacleKind::Spikeball => Some((50.0, 4.0)),
        }
    }
}

/// Obstacles die once they are this far past the left edge
const OBSTACLE_DESPAWN_X: f32 = -120.0;
const PICKUP_DESPAWN_X: f32 = -50.0;

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub base_y: f32,
    /// Leftward scroll speed (px/s)
    pub speed: f32,
    pub phase: f32,
    pub alive: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, y: f32, w: f32, h: f32, speed: f32, phase: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            base_y: y,
            speed,
            phase,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Scroll left and oscillate; `time` is session elapsed seconds
    pub fn update(&mut self, dt: f32, time: f32) {
        self.pos.x -= self.speed * dt;
        if let Some((amplitude, rate)) = self.kind.oscillation() {
            self.pos.y = self.base_y + (self.phase + time * rate).sin() * amplitude;
        }
        if self.pos.x + self.size.x < OBSTACLE_DESPAWN_X {
            self.alive = false;
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Shield,
    SlowMo,
    Score,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Shield, PickupKind::SlowMo, PickupKind::Score];
}

pub const PICKUP_RADIUS: f32 = 10.0;
/// Vertical bob speed scale (px/s at full swing)
const PICKUP_BOB: f32 = 24.0;

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Center position
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub phase: f32,
    pub alive: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, x: f32, y: f32, speed: f32, phase: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            radius: PICKUP_RADIUS,
            speed,
            phase,
            alive: true,
        }
    }

    /// Bounding box used for collection tests
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn update(&mut self, dt: f32, time: f32) {
        self.pos.x -= self.speed * dt;
        self.pos.y += (self.phase + time * 3.0).sin() * PICKUP_BOB * dt;
        if self.pos.x < PICKUP_DESPAWN_X {
            self.alive = false;
        }
    }
}

/// Color tag for cosmetic entities (resolved to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Pink,
    Cyan,
    Purple,
    Yellow,
    Green,
    White,
}

/// Downward pull on particles (px/s²)
const PARTICLE_GRAVITY: f32 = 40.0;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub color: ColorTag,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.life -= dt;
    }

    /// Remaining life as a 0-1 fade ratio
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Parameters for a particle burst
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    pub vx: (f32, f32),
    pub vy: (f32, f32),
    pub life: (f32, f32),
    pub color: ColorTag,
}

impl Burst {
    /// Shield absorb burst
    pub const SHIELD: Burst = Burst {
        count: 30,
        vx: (-120.0, 120.0),
        vy: (-160.0, -40.0),
        life: (0.2, 0.6),
        color: ColorTag::Cyan,
    };
    /// Score pickup burst
    pub const SCORE: Burst = Burst {
        count: 12,
        vx: (-80.0, 80.0),
        vy: (-120.0, -10.0),
        life: (0.2, 0.5),
        color: ColorTag::Yellow,
    };
}

/// Emit a burst of particles at `origin`, never exceeding `cap` live particles
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    burst: Burst,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..burst.count.min(room) {
        let life = rng.random_range(burst.life.0..=burst.life.1);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(
                rng.random_range(burst.vx.0..=burst.vx.1),
                rng.random_range(burst.vy.0..=burst.vy.1),
            ),
            life,
            max_life: life,
            color: burst.color,
        });
    }
}

/// Background star, recycled in place when it scrolls off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Depth factor in [0.3, 1.0]; nearer stars scroll faster and look bigger
    pub z: f32,
    pub twinkle: f32,
}

impl Star {
    pub fn new(rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=tuning.world.width),
                rng.random_range(0.0..=tuning.world.height),
            ),
            z: rng.random_range(0.3..=1.0),
            twinkle: rng.random_range(0.0..=1.0),
        }
    }

    pub fn update(&mut self, speed: f32, dt: f32, rng: &mut Pcg32, tuning: &Tuning) {
        self.pos.x -= speed * self.z * dt;
        if self.pos.x < -2.0 {
            let width = tuning.world.width;
            self.pos.x = width + rng.random_range(0.0..=width * 0.2);
            self.pos.y = rng.random_range(0.0..=tuning.world.height);
            self.z = rng.random_range(0.3..=1.0);
            self.twinkle = rng.random_range(0.0..=1.0);
        }
        self.twinkle += dt;
    }
}

/// Salt separating the cosmetic RNG stream from the gameplay stream
const FX_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (spawning only)
    pub rng: Pcg32,
    /// Cosmetic RNG (stars, particles, shake); never affects gameplay
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds of Running time since the session started
    pub elapsed: f32,
    /// Seconds since process start, including pauses (background animation)
    pub clock: f32,
    /// Running ticks since session start
    pub time_ticks: u64,
    pub score: f32,
    /// Best score across restarts within this process
    pub best: f32,
    /// World scroll speed (px/s)
    pub speed: f32,
    pub difficulty: f32,
    pub spawner: Spawner,
    /// Screen-shake magnitude (px), decaying
    pub shake: f32,
    /// Draw-origin offset derived from `shake` this frame
    pub shake_offset: Vec2,
    /// Sessions started after the first
    pub restarts: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_SEED_SALT);
        let stars = (0..tuning.world.star_count)
            .map(|_| Star::new(&mut fx_rng, tuning))
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng,
            phase: GamePhase::Running,
            elapsed: 0.0,
            clock: 0.0,
            time_ticks: 0,
            score: 0.0,
            best: 0.0,
            speed: tuning.world.initial_speed,
            difficulty: 1.0,
            spawner: Spawner::new(tuning),
            shake: 0.0,
            shake_offset: Vec2::ZERO,
            restarts: 0,
            player: Player::new(tuning),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            stars,
        }
    }

    /// Start a fresh run; best score, stars and RNG streams carry over
    pub fn restart(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::Running;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.score = 0.0;
        self.speed = tuning.world.initial_speed;
        self.difficulty = 1.0;
        self.spawner = Spawner::new(tuning);
        self.shake = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.player = Player::new(tuning);
        self.obstacles.clear();
        self.pickups.clear();
        self.particles.clear();
        self.restarts += 1;
    }

    /// End the run after a fatal collision
    pub fn game_over(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::GameOver;
        self.player.alive = false;
        self.best = self.best.max(self.score);
        self.shake = self.shake.max(tuning.world.death_shake);
    }

    /// Drop entities marked dead this tick
    pub fn purge_dead(&mut self) {
        self.obstacles.retain(|o| o.alive);
        self.pickups.retain(|p| p.alive);
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_scrolls_and_despawns() {
        let mut ob = Obstacle::new(ObstacleKind::Block, 0.0, 100.0, 40.0, 40.0, 200.0, 0.0);
        ob.update(0.5, 0.0);
        assert_eq!(ob.pos.x, -100.0);
        assert_eq!(ob.pos.y, 100.0);
        assert!(ob.alive);
        // x + w = -100: still on its way out
        ob.update(0.2, 0.0);
        assert_eq!(ob.pos.x, -140.0);
        assert!(ob.alive);
        // x + w = -130
        ob.update(0.15, 0.0);
        assert!(!ob.alive);
    }

    #[test]
    fn test_obstacle_alive_at_despawn_line() {
        let mut ob = Obstacle::new(ObstacleKind::Block, -160.0, 100.0, 40.0, 40.0, 0.0, 0.0);
        ob.update(0.1, 0.0);
        assert_eq!(ob.pos.x + ob.size.x, OBSTACLE_DESPAWN_X);
        assert!(ob.alive);
    }

    #[test]
    fn test_laser_oscillates_around_base() {
        let mut ob = Obstacle::new(ObstacleKind::Laser, 500.0, 300.0, 100.0, 15.0, 0.0, 0.0);
        ob.update(0.01, std::f32::consts::FRAC_PI_4);
        assert!((ob.pos.y - 330.0).abs() < 1e-3);
        assert_eq!(ob.base_y, 300.0);
    }

    #[test]
    fn test_pickup_despawns_left() {
        let mut pk = Pickup::new(PickupKind::Score, -40.0, 200.0, 100.0, 0.0);
        pk.update(0.2, 0.0);
        assert!(!pk.alive);
    }

    #[test]
    fn test_particle_fades() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            life: 0.5,
            max_life: 0.5,
            color: ColorTag::Cyan,
        };
        p.update(0.25);
        assert!((p.fade() - 0.5).abs() < 1e-5);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, Burst::SHIELD, 20);
        assert_eq!(particles.len(), 20);
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, Burst::SCORE, 20);
        assert_eq!(particles.len(), 20);
    }

    #[test]
    fn test_star_wraps_in_place() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut star = Star::new(&mut rng, &tuning);
        star.pos.x = -1.0;
        star.z = 1.0;
        star.update(100.0, 0.1, &mut rng, &tuning);
        assert!(star.pos.x >= tuning.world.width);
        assert!((0.3..=1.0).contains(&star.z));
    }

    #[test]
    fn test_restart_preserves_best() {
        let tuning = Tuning::default();
        let mut state = GameState::new(42, &tuning);
        state.score = 321.0;
        state.game_over(&tuning);
        assert_eq!(state.best, 321.0);
        assert!(!state.player.alive);

        state.restart(&tuning);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.best, 321.0);
        assert_eq!(state.speed, tuning.world.initial_speed);
        assert!(state.player.alive);
        assert_eq!(state.stars.len(), tuning.world.star_count);
    }
}
