//! Neon Dash - a side-scrolling neon runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input reduction, physics, spawning, collisions)
//! - `renderer`: Render-request emission (draw commands as data)
//! - `audio`: Sound cues and a muting-tolerant audio manager
//! - `game`: Per-frame step tying timing, simulation and output together
//! - `platform`: Platform abstraction and the outer frame loop
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameOutcome, Game};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Frame timing constants
pub mod consts {
    /// Fixed step used by deterministic drivers (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Upper bound on a single frame's delta time (prevents physics explosions on hitches)
    pub const MAX_DT: f32 = 1.0 / 45.0;
    /// Frame rate the platform paces toward
    pub const TARGET_FPS: u32 = 120;
}
