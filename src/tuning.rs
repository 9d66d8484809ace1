//! Data-driven game balance
//!
//! Every gameplay constant lives here. A `Tuning` is built once at startup
//! (defaults, optionally overridden from a JSON file) and passed by reference
//! into the simulation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure to read a JSON config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and deserialize a JSON file
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// World dimensions, scrolling and cosmetic budgets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
    /// Ground line as a fraction of height
    pub ground_frac: f32,
    /// World scroll speed at session start (px/s)
    pub initial_speed: f32,
    /// Speed gained per second regardless of difficulty
    pub speed_ramp_base: f32,
    /// Extra speed gained per second per unit of difficulty
    pub speed_ramp_per_difficulty: f32,
    pub star_count: usize,
    /// Star scroll speed as a fraction of world speed
    pub star_scroll_factor: f32,
    pub max_particles: usize,
    /// Shake magnitude lost per second
    pub shake_decay: f32,
    pub shield_shake: f32,
    pub death_shake: f32,
    /// How long the controls hint stays up at the start of a run
    pub hint_seconds: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            ground_frac: 0.8,
            initial_speed: 240.0,
            speed_ramp_base: 10.0,
            speed_ramp_per_difficulty: 6.0,
            star_count: 120,
            star_scroll_factor: 0.12,
            max_particles: 512,
            shake_decay: 20.0,
            shield_shake: 10.0,
            death_shake: 14.0,
            hint_seconds: 6.0,
        }
    }
}

/// Player movement and jump feel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub start_x_frac: f32,
    pub start_y_frac: f32,
    pub accel_ground: f32,
    pub accel_air: f32,
    pub max_speed_x: f32,
    /// Per-tick velocity multiplier while grounded
    pub friction_ground: f32,
    /// Per-tick velocity multiplier while airborne
    pub friction_air: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub hover_gravity: f32,
    pub hover_window: f32,
    pub coyote_window: f32,
    pub jump_buffer_window: f32,
    /// Upward speed an early release is clamped to
    pub jump_cut_velocity: f32,
    /// Fast-fall extra acceleration as a fraction of gravity
    pub fast_fall_factor: f32,
    /// Local time scale while slow-mo is active
    pub slowmo_time_scale: f32,
    /// Downward speed above which a landing emits an impact cue
    pub landing_impact_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 16.0,
            start_x_frac: 0.2,
            start_y_frac: 0.7,
            accel_ground: 1400.0,
            accel_air: 900.0,
            max_speed_x: 260.0,
            friction_ground: 0.86,
            friction_air: 0.98,
            jump_velocity: -420.0,
            gravity: 1200.0,
            max_fall_speed: 950.0,
            hover_gravity: 300.0,
            hover_window: 0.18,
            coyote_window: 0.12,
            jump_buffer_window: 0.12,
            jump_cut_velocity: -140.0,
            fast_fall_factor: 0.8,
            slowmo_time_scale: 0.5,
            landing_impact_speed: 200.0,
        }
    }
}

/// Spawn cadence, pattern unlocks and difficulty ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Base obstacle interval, divided by difficulty
    pub base_rate: f32,
    /// Floor on the obstacle interval
    pub min_interval: f32,
    pub interval_jitter_low: f32,
    pub interval_jitter_high: f32,
    pub first_pickup_delay: f32,
    pub pickup_interval_min: f32,
    pub pickup_interval_max: f32,
    /// Difficulty above which the full pattern pool is used
    pub pattern_unlock_difficulty: f32,
    pub difficulty_ramp_seconds: f32,
    pub max_difficulty_bonus: f32,
    pub laser_speed_factor: f32,
    pub spikeball_speed_factor: f32,
    pub pickup_speed_factor: f32,
    /// Relative weights for Shield, SlowMo, Score
    pub pickup_weights: [f32; 3],
    /// Distance past the right edge where obstacles appear
    pub spawn_margin: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_rate: 1.15,
            min_interval: 0.32,
            interval_jitter_low: 0.9,
            interval_jitter_high: 1.05,
            first_pickup_delay: 2.0,
            pickup_interval_min: 3.0,
            pickup_interval_max: 6.0,
            pattern_unlock_difficulty: 1.2,
            difficulty_ramp_seconds: 45.0,
            max_difficulty_bonus: 2.5,
            laser_speed_factor: 1.1,
            spikeball_speed_factor: 1.05,
            pickup_speed_factor: 0.9,
            pickup_weights: [1.2, 1.0, 1.4],
            spawn_margin: 30.0,
        }
    }
}

/// Score, combo and pickup effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// Survival points per second at difficulty 1
    pub score_rate: f32,
    /// Survival multiplier bonus per combo step
    pub combo_score_bonus: f32,
    pub near_miss_margin: f32,
    pub combo_window: f32,
    pub max_combo: u32,
    pub score_pickup_base: f32,
    pub score_pickup_per_combo: f32,
    pub shield_duration: f32,
    pub slowmo_duration: f32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            score_rate: 10.0,
            combo_score_bonus: 0.1,
            near_miss_margin: 12.0,
            combo_window: 1.2,
            max_combo: 20,
            score_pickup_base: 80.0,
            score_pickup_per_combo: 10.0,
            shield_duration: 6.0,
            slowmo_duration: 2.1,
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub scoring: ScoringTuning,
}

impl Tuning {
    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        (self.world.height * self.world.ground_frac).floor()
    }

    /// Load tuning overrides from a JSON file; missing fields keep defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_line() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ground_y(), 576.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "player": { "gravity": 900.0 } }"#).unwrap();
        assert_eq!(tuning.player.gravity, 900.0);
        assert_eq!(tuning.player.jump_velocity, -420.0);
        assert_eq!(tuning.scoring.max_combo, 20);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/neon_dash_tuning.json");
        assert!(matches!(
            Tuning::from_file(path),
            Err(ConfigError::Io { .. })
        ));
        let tuning = Tuning::load_or_default(Some(path));
        assert_eq!(tuning.world.initial_speed, 240.0);
    }
}
