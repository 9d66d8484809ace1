//! Headless host
//!
//! Fixed-step clock, no window and no sound card. Frames are serialized to
//! JSON at trace level. After the frame budget runs out it asks to close,
//! the same way a window would.

use crate::audio::{AudioBackend, AudioError};
use crate::consts::SIM_DT;
use crate::renderer::Frame;
use crate::sim::KeyEvent;

use super::{Platform, PlatformError};

#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    step: f32,
    ticks: u64,
    budget: Option<u64>,
    presented: u64,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HeadlessPlatform {
    /// `budget` is the number of frames to present before closing; `None` runs forever
    pub fn new(budget: Option<u64>) -> Self {
        Self {
            step: SIM_DT,
            ticks: 0,
            budget,
            presented: 0,
        }
    }
}

impl Platform for HeadlessPlatform {
    fn elapsed(&mut self) -> f32 {
        let now = self.ticks as f32 * self.step;
        self.ticks += 1;
        now
    }

    fn poll_events(&mut self) -> Result<Vec<KeyEvent>, PlatformError> {
        if self.budget.is_some_and(|budget| self.presented >= budget) {
            return Ok(vec![KeyEvent::CloseRequested]);
        }
        Ok(Vec::new())
    }

    fn present(&mut self, frame: &Frame) -> Result<(), PlatformError> {
        self.presented += 1;
        if log::log_enabled!(log::Level::Trace) {
            let json = serde_json::to_string(frame)
                .map_err(|e| PlatformError::Backend(format!("frame encoding: {e}")))?;
            log::trace!("frame {}: {json}", self.presented);
        }
        Ok(())
    }

    fn audio_backend(&mut self) -> Result<Box<dyn AudioBackend>, AudioError> {
        Err(AudioError::Unavailable("headless".into()))
    }
}
