//! Idle/demo mode - a simple bot that plays the game
//!
//! Reads the session and produces raw key events, exactly as a platform
//! would, so the demo exercises the same input path as a human.

use super::collision::is_live;
use super::input::{Action, HeldKeys, KeyEvent};
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Seconds of travel the bot looks ahead for threats
const LOOKAHEAD_SECONDS: f32 = 0.3;
/// Seconds the bot waits on the game-over screen before restarting
const RESTART_DELAY: f32 = 1.0;

/// What the bot wants held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub jump: bool,
    pub fast_fall: bool,
    pub restart: bool,
}

/// Demo bot with a little memory of its own
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    game_over_for: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's intent
    pub fn decide(&mut self, state: &GameState, dt: f32, tuning: &Tuning) -> Intent {
        if state.phase == GamePhase::GameOver {
            self.game_over_for += dt;
            if self.game_over_for >= RESTART_DELAY {
                self.game_over_for = 0.0;
                return Intent {
                    restart: true,
                    ..Default::default()
                };
            }
            return Intent::default();
        }
        self.game_over_for = 0.0;

        if !is_live(state) {
            return Intent::default();
        }

        let threat = threat_ahead(state, tuning);
        let player = &state.player;
        Intent {
            jump: threat,
            fast_fall: !threat && !player.on_ground && player.vel.y > 0.0,
            restart: false,
        }
    }

    /// Decide and translate into raw key events against the current held keys
    pub fn events(&mut self, state: &GameState, held: HeldKeys, dt: f32, tuning: &Tuning) -> Vec<KeyEvent> {
        let intent = self.decide(state, dt, tuning);
        intent_events(intent, held, state.player.on_ground)
    }
}

/// An obstacle within reach that a grounded runner would hit
pub fn threat_ahead(state: &GameState, tuning: &Tuning) -> bool {
    let player = &state.player;
    let grounded_top = tuning.ground_y() - player.radius * 2.0;
    let reach = player.pos.x + player.radius + state.speed * LOOKAHEAD_SECONDS;

    state.obstacles.iter().filter(|o| o.alive).any(|o| {
        let rect = o.rect();
        rect.right() > player.pos.x - player.radius
            && rect.left() < reach
            && rect.bottom() > grounded_top
    })
}

/// Key transitions that move `held` toward `intent`
///
/// A jump wanted while grounded and already held is re-pressed so that it
/// registers as a fresh edge.
pub fn intent_events(intent: Intent, held: HeldKeys, on_ground: bool) -> Vec<KeyEvent> {
    let mut events = Vec::new();

    match (intent.jump, held.jump) {
        (true, false) => events.push(KeyEvent::Down(Action::Jump)),
        (true, true) if on_ground => {
            events.push(KeyEvent::Up(Action::Jump));
            events.push(KeyEvent::Down(Action::Jump));
        }
        (false, true) => events.push(KeyEvent::Up(Action::Jump)),
        _ => {}
    }

    match (intent.fast_fall, held.fast_fall) {
        (true, false) => events.push(KeyEvent::Down(Action::FastFall)),
        (false, true) => events.push(KeyEvent::Up(Action::FastFall)),
        _ => {}
    }

    if intent.restart {
        events.push(KeyEvent::Down(Action::Restart));
        events.push(KeyEvent::Up(Action::Restart));
    }

    events
}
