//! Sound cues
//!
//! The simulation never plays audio. Gameplay events map to symbolic cues,
//! each with a procedural tone (frequency, duration, volume). Synthesis is
//! the platform's job: an `AudioBackend` plays tones if one is available,
//! otherwise the manager runs muted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{GameEvent, PickupKind};

/// Audio subsystem failure
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    /// Hard landing
    Land,
    ShieldAbsorb,
    /// Fatal collision
    Crash,
    ComboUp,
    PickupShield,
    PickupSlowMo,
    PickupScore,
}

/// A single beep: sine tone at `freq` Hz for `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub freq: f32,
    pub duration_ms: u32,
    pub volume: f32,
}

impl Tone {
    const fn new(freq: f32, duration_ms: u32, volume: f32) -> Self {
        Self {
            freq,
            duration_ms,
            volume,
        }
    }
}

impl SoundCue {
    /// Cue for a gameplay event, if it makes a sound
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundCue::Jump),
            GameEvent::Landed { .. } => Some(SoundCue::Land),
            GameEvent::ShieldAbsorbed => Some(SoundCue::ShieldAbsorb),
            GameEvent::Crashed { .. } => Some(SoundCue::Crash),
            GameEvent::ComboIncreased { .. } => Some(SoundCue::ComboUp),
            GameEvent::PickupCollected { kind } => Some(match kind {
                PickupKind::Shield => SoundCue::PickupShield,
                PickupKind::SlowMo => SoundCue::PickupSlowMo,
                PickupKind::Score => SoundCue::PickupScore,
            }),
            GameEvent::Paused | GameEvent::Resumed | GameEvent::Restarted => None,
        }
    }

    /// Unscaled tone for this cue
    pub fn tone(&self) -> Tone {
        match self {
            SoundCue::Jump => Tone::new(620.0, 70, 0.25),
            SoundCue::Land => Tone::new(220.0, 40, 0.15),
            SoundCue::ShieldAbsorb => Tone::new(180.0, 60, 0.25),
            SoundCue::Crash => Tone::new(120.0, 150, 0.35),
            SoundCue::ComboUp => Tone::new(840.0, 40, 0.18),
            SoundCue::PickupShield => Tone::new(500.0, 80, 0.25),
            SoundCue::PickupSlowMo => Tone::new(300.0, 80, 0.25),
            SoundCue::PickupScore => Tone::new(760.0, 60, 0.25),
        }
    }
}

/// Platform tone player
pub trait AudioBackend {
    fn play_tone(&mut self, tone: Tone) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::muted()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("available", &self.is_available())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    /// Wrap a backend, degrading to muted if it failed to initialize
    pub fn new(backend: Result<Box<dyn AudioBackend>, AudioError>, settings: &Settings) -> Self {
        let backend = match backend {
            Ok(backend) => Some(backend),
            Err(e) => {
                log::warn!("{e} - audio disabled");
                None
            }
        };
        let mut manager = Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    /// No backend at all
    pub fn muted() -> Self {
        Self {
            backend: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: true,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Tone as it would be played right now, with volume applied
    pub fn scaled_tone(&self, cue: SoundCue) -> Tone {
        let tone = cue.tone();
        Tone {
            volume: tone.volume * self.effective_volume(),
            ..tone
        }
    }

    /// Play a cue; a failing backend is dropped and the game continues muted
    pub fn play(&mut self, cue: SoundCue) {
        let tone = self.scaled_tone(cue);
        if tone.volume <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.play_tone(tone) {
            log::warn!("{e} - audio disabled");
            self.backend = None;
        }
    }
}
