//! Platform abstraction layer
//!
//! The game core never touches a window, keyboard or sound card. A
//! `Platform` supplies:
//! - Time (monotonic seconds)
//! - Input events
//! - Presentation of each `Frame`
//! - An audio backend, if the host has one (the only sound channel)

pub mod headless;

use thiserror::Error;

use crate::audio::{AudioBackend, AudioError};
use crate::game::{FrameOutcome, Game};
use crate::renderer::Frame;
use crate::sim::KeyEvent;

pub use headless::HeadlessPlatform;

/// Platform failure
#[derive(Debug, Error)]
pub enum PlatformError {
    /// A garbled event batch; the frame proceeds with no input
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("platform backend failed: {0}")]
    Backend(String),
    #[error("platform disconnected")]
    Disconnected,
}

impl PlatformError {
    /// Whether the loop can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PlatformError::MalformedInput(_))
    }
}

/// Host services the frame loop depends on
pub trait Platform {
    /// Monotonic seconds since the platform started
    fn elapsed(&mut self) -> f32;

    /// Drain key events received since the last call
    fn poll_events(&mut self) -> Result<Vec<KeyEvent>, PlatformError>;

    /// Show one frame
    fn present(&mut self, frame: &Frame) -> Result<(), PlatformError>;

    /// Tone player for this host
    fn audio_backend(&mut self) -> Result<Box<dyn AudioBackend>, AudioError>;
}

/// Totals for a finished run loop
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub restarts: u32,
    pub best: f32,
    /// Event batches discarded as malformed
    pub dropped_inputs: u32,
}

/// Drive `game` with `platform` until quit
pub fn run(game: &mut Game, platform: &mut impl Platform) -> Result<RunSummary, PlatformError> {
    let mut summary = RunSummary::default();
    let mut last = platform.elapsed();

    loop {
        let now = platform.elapsed();
        let raw_dt = now - last;
        last = now;

        let events = match platform.poll_events() {
            Ok(events) => events,
            Err(e) if e.is_recoverable() => {
                log::warn!("{e} - ignoring this frame's input");
                summary.dropped_inputs += 1;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        match game.frame(raw_dt, &events) {
            FrameOutcome::Continue(frame) => platform.present(&frame)?,
            FrameOutcome::Quit => break,
        }
        summary.frames += 1;
    }

    summary.restarts = game.state.restarts;
    summary.best = game.state.best;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioManager;
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    /// Scripted host: one result per frame, then close
    struct Scripted {
        clock: f32,
        script: Vec<Result<Vec<KeyEvent>, PlatformError>>,
        presented: usize,
    }

    impl Platform for Scripted {
        fn elapsed(&mut self) -> f32 {
            self.clock += 1.0 / 60.0;
            self.clock
        }

        fn poll_events(&mut self) -> Result<Vec<KeyEvent>, PlatformError> {
            if self.script.is_empty() {
                return Ok(vec![KeyEvent::CloseRequested]);
            }
            self.script.remove(0)
        }

        fn present(&mut self, _frame: &Frame) -> Result<(), PlatformError> {
            self.presented += 1;
            Ok(())
        }

        fn audio_backend(&mut self) -> Result<Box<dyn AudioBackend>, AudioError> {
            Err(AudioError::Unavailable("scripted".into()))
        }
    }

    fn game() -> Game {
        Game::new(
            3,
            Tuning::default(),
            Settings::default(),
            AudioManager::muted(),
        )
    }

    #[test]
    fn test_malformed_input_is_skipped() {
        let mut platform = Scripted {
            clock: 0.0,
            script: vec![
                Ok(Vec::new()),
                Err(PlatformError::MalformedInput("bad scancode".into())),
                Ok(Vec::new()),
            ],
            presented: 0,
        };
        let summary = run(&mut game(), &mut platform).unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.dropped_inputs, 1);
        assert_eq!(platform.presented, 3);
    }

    #[test]
    fn test_fatal_error_propagates() {
        let mut platform = Scripted {
            clock: 0.0,
            script: vec![Ok(Vec::new()), Err(PlatformError::Disconnected)],
            presented: 0,
        };
        let err = run(&mut game(), &mut platform).unwrap_err();
        assert!(matches!(err, PlatformError::Disconnected));
        assert!(!err.is_recoverable());
    }
}
