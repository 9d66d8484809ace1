//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta time supplied by the caller, already clamped
//! - Seeded RNG only (gameplay and cosmetic streams kept apart)
//! - Stable iteration order (collection insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod physics;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{circle_rect_overlap, is_near_miss, resolve_collisions};
pub use input::{Action, HeldKeys, InputState, KeyEvent, TickInput, clamp_dt, reduce};
pub use physics::update_player;
pub use rect::Rect;
pub use spawner::{SpawnPattern, Spawner, difficulty_at, eligible_patterns};
pub use state::{
    ColorTag, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Particle, Pickup,
    PickupKind, Player, Star,
};
pub use tick::{TickOutcome, tick};
