//! Frame timing and edge-triggered input
//!
//! Raw platform key transitions are reduced into a `TickInput` snapshot:
//! held-state booleans plus one-shot pulses that are true for exactly one
//! snapshot after the transition that caused them.

use serde::{Deserialize, Serialize};

/// Clamp a raw frame delta to `[0, max_dt]`
///
/// Non-finite or negative deltas (clock glitches) become zero.
#[inline]
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max_dt)
    } else {
        0.0
    }
}

/// Logical actions the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    FastFall,
    Jump,
    Pause,
    Restart,
    Quit,
}

impl Action {
    /// Fixed key map from platform key names
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a" | "left" => Some(Action::MoveLeft),
            "d" | "right" => Some(Action::MoveRight),
            "s" | "down" => Some(Action::FastFall),
            "space" | "w" | "up" => Some(Action::Jump),
            "p" => Some(Action::Pause),
            "r" => Some(Action::Restart),
            "escape" | "esc" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// A raw key transition delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Down(Action),
    Up(Action),
    /// Window close request
    CloseRequested,
}

/// Held state carried between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub fast_fall: bool,
    pub jump: bool,
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fast_fall: bool,
    /// Jump currently held
    pub jump: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub pause_pressed: bool,
    pub restart_pressed: bool,
    pub quit_pressed: bool,
}

/// Pure reducer: (previous held state, this frame's events) -> (new held state, snapshot)
pub fn reduce(prev: HeldKeys, events: &[KeyEvent]) -> (HeldKeys, TickInput) {
    let mut held = prev;
    let mut input = TickInput::default();

    for event in events {
        match *event {
            KeyEvent::Down(action) => match action {
                Action::MoveLeft => held.left = true,
                Action::MoveRight => held.right = true,
                Action::FastFall => held.fast_fall = true,
                Action::Jump => {
                    // Key repeat redelivers Down while held; only the edge counts
                    if !held.jump {
                        input.jump_pressed = true;
                    }
                    held.jump = true;
                }
                Action::Pause => input.pause_pressed = true,
                Action::Restart => input.restart_pressed = true,
                Action::Quit => input.quit_pressed = true,
            },
            KeyEvent::Up(action) => match action {
                Action::MoveLeft => held.left = false,
                Action::MoveRight => held.right = false,
                Action::FastFall => held.fast_fall = false,
                Action::Jump => {
                    if held.jump {
                        input.jump_released = true;
                    }
                    held.jump = false;
                }
                Action::Pause | Action::Restart | Action::Quit => {}
            },
            KeyEvent::CloseRequested => input.quit_pressed = true,
        }
    }

    input.left = held.left;
    input.right = held.right;
    input.fast_fall = held.fast_fall;
    input.jump = held.jump;
    (held, input)
}

/// Stateful wrapper around `reduce` for frame drivers
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HeldKeys,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this frame's raw events and produce the tick snapshot
    pub fn poll(&mut self, events: &[KeyEvent]) -> TickInput {
        let (held, input) = reduce(self.held, events);
        self.held = held;
        input
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.005, 1.0 / 45.0), 0.005);
        assert_eq!(clamp_dt(0.5, 1.0 / 45.0), 1.0 / 45.0);
        assert_eq!(clamp_dt(-1.0, 1.0 / 45.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN, 1.0 / 45.0), 0.0);
    }

    #[test]
    fn test_jump_pulse_only_on_edge() {
        let mut input = InputState::new();

        let first = input.poll(&[KeyEvent::Down(Action::Jump)]);
        assert!(first.jump_pressed);
        assert!(first.jump);

        // Repeat delivery while held
        let repeat = input.poll(&[KeyEvent::Down(Action::Jump)]);
        assert!(!repeat.jump_pressed);
        assert!(repeat.jump);

        let idle = input.poll(&[]);
        assert!(!idle.jump_pressed);
        assert!(idle.jump);

        let release = input.poll(&[KeyEvent::Up(Action::Jump)]);
        assert!(release.jump_released);
        assert!(!release.jump);

        // Stray release while not held
        let stray = input.poll(&[KeyEvent::Up(Action::Jump)]);
        assert!(!stray.jump_released);
    }

    #[test]
    fn test_one_shot_pulses_clear() {
        let mut input = InputState::new();
        let snap = input.poll(&[KeyEvent::Down(Action::Pause), KeyEvent::Down(Action::Restart)]);
        assert!(snap.pause_pressed);
        assert!(snap.restart_pressed);

        let next = input.poll(&[]);
        assert!(!next.pause_pressed);
        assert!(!next.restart_pressed);
    }

    #[test]
    fn test_movement_held_across_frames() {
        let mut input = InputState::new();
        input.poll(&[KeyEvent::Down(Action::MoveRight)]);
        let snap = input.poll(&[]);
        assert!(snap.right);
        assert!(!snap.left);
        let snap = input.poll(&[KeyEvent::Up(Action::MoveRight)]);
        assert!(!snap.right);
    }

    #[test]
    fn test_close_request_quits() {
        let (_, snap) = reduce(HeldKeys::default(), &[KeyEvent::CloseRequested]);
        assert!(snap.quit_pressed);
    }

    #[test]
    fn test_key_map() {
        assert_eq!(Action::from_key_name("Space"), Some(Action::Jump));
        assert_eq!(Action::from_key_name("left"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_name("escape"), Some(Action::Quit));
        assert_eq!(Action::from_key_name("f13"), None);
    }
}
