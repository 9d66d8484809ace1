//! Frame driver
//!
//! Owns the session plus its collaborators and turns one platform frame
//! (raw delta, raw key events) into one simulation step and one `Frame`.

use crate::audio::{AudioManager, SoundCue};
use crate::consts::MAX_DT;
use crate::renderer::{Frame, build_frame};
use crate::settings::Settings;
use crate::sim::{Autopilot, GameState, InputState, KeyEvent, clamp_dt, tick};
use crate::tuning::Tuning;

/// Result of driving one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Continue(Frame),
    Quit,
}

/// A running game session with its input, audio and settings
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    input: InputState,
    tuning: Tuning,
    settings: Settings,
    audio: AudioManager,
    autopilot: Option<Autopilot>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, audio: AudioManager) -> Self {
        log::info!("Session created with seed: {seed}");
        Self {
            state: GameState::new(seed, &tuning),
            input: InputState::new(),
            tuning,
            settings,
            audio,
            autopilot: None,
        }
    }

    /// Toggle the demo bot; it feeds key events alongside the platform's
    pub fn set_autopilot(&mut self, enabled: bool) {
        if enabled == self.autopilot.is_some() {
            return;
        }
        self.autopilot = enabled.then(Autopilot::new);
        log::info!("Idle mode: {enabled}");
    }

    /// Advance one frame
    pub fn frame(&mut self, raw_dt: f32, events: &[KeyEvent]) -> FrameOutcome {
        let dt = clamp_dt(raw_dt, MAX_DT);

        let input = match self.autopilot.as_mut() {
            Some(bot) => {
                let mut merged = events.to_vec();
                merged.extend(bot.events(&self.state, self.input.held(), dt, &self.tuning));
                self.input.poll(&merged)
            }
            None => self.input.poll(events),
        };

        let before = self.state.phase;
        let outcome = tick(&mut self.state, &input, dt, &self.tuning);
        if outcome.quit {
            log::info!("Quit requested (best {:.0})", self.state.best);
            return FrameOutcome::Quit;
        }
        if self.state.phase != before {
            log::debug!("Phase {:?} -> {:?}", before, self.state.phase);
        }

        for cue in outcome.events.iter().filter_map(SoundCue::from_event) {
            self.audio.play(cue);
        }

        FrameOutcome::Continue(build_frame(&self.state, &self.tuning, &self.settings))
    }
}
