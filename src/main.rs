//! Neon Dash entry point
//!
//! Loads configuration from the environment and runs the headless demo
//! loop (autopilot at the controls).

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use neon_dash::audio::AudioManager;
use neon_dash::consts::TARGET_FPS;
use neon_dash::platform::{self, HeadlessPlatform, Platform};
use neon_dash::{Game, Settings, Tuning};

/// Demo length when `NEON_DASH_FRAMES` is unset (one minute)
const DEFAULT_FRAMES: u64 = TARGET_FPS as u64 * 60;

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).map(PathBuf::from)
}

fn env_number(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("Ignoring {key}={raw:?}: {e}");
            None
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Neon Dash (headless) starting...");

    let tuning = Tuning::load_or_default(env_path("NEON_DASH_TUNING").as_deref());
    let settings = Settings::resolve(
        env_path("NEON_DASH_SETTINGS").as_deref(),
        std::env::var("NEON_DASH_QUALITY").ok().as_deref(),
    );
    let seed = env_number("NEON_DASH_SEED").unwrap_or_else(clock_seed);
    let frames = env_number("NEON_DASH_FRAMES").unwrap_or(DEFAULT_FRAMES);
    log::info!(
        "Quality {}, running {frames} frames",
        settings.quality.as_str()
    );

    let mut platform = HeadlessPlatform::new(Some(frames));
    let audio = AudioManager::new(platform.audio_backend(), &settings);
    let mut game = Game::new(seed, tuning, settings, audio);
    game.set_autopilot(true);

    match platform::run(&mut game, &mut platform) {
        Ok(summary) => log::info!(
            "Finished: {} frames, {} restarts, best {:.0}, {} dropped input batches",
            summary.frames,
            summary.restarts,
            summary.best,
            summary.dropped_inputs
        ),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
