//! Per-frame render requests
//!
//! The core never draws. Each frame it emits an ordered list of draw
//! commands; the platform collaborator renders them. Sound goes through
//! `AudioManager`, not the frame.

use glam::Vec2;
use serde::Serialize;

use super::colors::{self, Rgba};
use crate::settings::Settings;
use crate::sim::{ColorTag, GamePhase, GameState, ObstacleKind, PickupKind};
use crate::tuning::Tuning;

/// Background grid cell size (px)
pub const GRID_SPACING: f32 = 40.0;

/// A single draw request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    Grid {
        spacing: f32,
        color: Rgba,
    },
    Star {
        pos: Vec2,
        size: f32,
        /// Twinkle brightness, 0-1
        glow: f32,
    },
    /// Ground line with a dashed, rippling edge driven by `time`
    Ground {
        y: f32,
        time: f32,
        color: Rgba,
        dash_color: Rgba,
    },
    Obstacle {
        kind: ObstacleKind,
        pos: Vec2,
        size: Vec2,
        color: ColorTag,
    },
    Pickup {
        kind: PickupKind,
        pos: Vec2,
        radius: f32,
        color: ColorTag,
    },
    Particle {
        pos: Vec2,
        alpha: f32,
        color: ColorTag,
    },
    Player {
        pos: Vec2,
        radius: f32,
        color: ColorTag,
        shielded: bool,
    },
    Hud {
        lines: Vec<String>,
    },
    /// Full-screen translucent fill
    Overlay {
        color: Rgba,
    },
    /// Centered message block
    Message {
        title: String,
        lines: Vec<String>,
    },
    /// Small text along the bottom edge
    Hint {
        text: String,
    },
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Draw-origin offset (screen shake)
    pub origin: Vec2,
    pub commands: Vec<DrawCommand>,
}

const CONTROLS_HINT: &str =
    "SPACE to jump (buffered) - Hold to hover - S/DOWN fast-fall - A/D move - P pause";

/// HUD text lines for the current state
pub fn hud_lines(state: &GameState) -> Vec<String> {
    let player = &state.player;
    let mut lines = vec![
        format!("Score {}", state.score as i64),
        format!("Best {}", state.best as i64),
    ];
    if player.combo > 0 {
        lines.push(format!("STREAK x{}", player.combo));
    }
    if player.shield > 0.0 {
        lines.push("Shield".to_string());
    }
    if player.slowmo > 0.0 {
        lines.push("SLOW".to_string());
    }
    lines
}

/// Build the frame's draw list
pub fn build_frame(state: &GameState, tuning: &Tuning, settings: &Settings) -> Frame {
    let mut commands = Vec::with_capacity(
        8 + state.stars.len() + state.obstacles.len() + state.pickups.len() + state.particles.len(),
    );

    commands.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });
    commands.push(DrawCommand::Grid {
        spacing: GRID_SPACING,
        color: colors::GRID,
    });

    if settings.quality.starfield_enabled() {
        commands.extend(state.stars.iter().map(|star| DrawCommand::Star {
            pos: star.pos,
            size: (star.z * 2.0).floor() + 1.0,
            glow: (150.0 + 105.0 * (star.twinkle * 3.0).sin().abs()) / 255.0,
        }));
    }

    commands.push(DrawCommand::Ground {
        y: tuning.ground_y(),
        time: state.clock,
        color: colors::GROUND,
        dash_color: colors::GROUND_DASH,
    });

    commands.extend(state.obstacles.iter().map(|o| DrawCommand::Obstacle {
        kind: o.kind,
        pos: o.pos,
        size: o.size,
        color: colors::obstacle(o.kind),
    }));

    commands.extend(state.pickups.iter().map(|p| DrawCommand::Pickup {
        kind: p.kind,
        pos: p.pos,
        radius: p.radius,
        color: colors::pickup(p.kind),
    }));

    commands.extend(
        state
            .particles
            .iter()
            .filter(|p| p.life > 0.0)
            .take(settings.max_particles())
            .map(|p| DrawCommand::Particle {
                pos: p.pos,
                alpha: p.fade(),
                color: p.color,
            }),
    );

    let player = &state.player;
    let shielded = player.shield > 0.0;
    commands.push(DrawCommand::Player {
        pos: player.pos,
        radius: player.radius,
        color: colors::player(shielded),
        shielded,
    });

    commands.push(DrawCommand::Hud {
        lines: hud_lines(state),
    });

    match state.phase {
        GamePhase::Paused => {
            commands.push(DrawCommand::Overlay {
                color: colors::PAUSE_DIM,
            });
            commands.push(DrawCommand::Message {
                title: "Paused - P to resume".to_string(),
                lines: Vec::new(),
            });
        }
        GamePhase::GameOver => {
            commands.push(DrawCommand::Overlay {
                color: colors::GAME_OVER_DIM,
            });
            commands.push(DrawCommand::Message {
                title: "Game Over".to_string(),
                lines: vec![
                    format!(
                        "Score: {}   Best: {}",
                        state.score as i64, state.best as i64
                    ),
                    "Press R to restart, ESC to quit".to_string(),
                ],
            });
        }
        GamePhase::Running => {}
    }

    if settings.tints {
        if player.slowmo > 0.0 {
            commands.push(DrawCommand::Overlay {
                color: colors::SLOWMO_TINT,
            });
        }
        if shielded {
            commands.push(DrawCommand::Overlay {
                color: colors::SHIELD_TINT,
            });
        }
    }

    if state.elapsed < tuning.world.hint_seconds && state.phase != GamePhase::GameOver {
        commands.push(DrawCommand::Hint {
            text: CONTROLS_HINT.to_string(),
        });
    }

    let origin = if settings.screen_shake {
        state.shake_offset
    } else {
        Vec2::ZERO
    };

    Frame { origin, commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, Pickup};

    fn count(frame: &Frame, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        frame.commands.iter().filter(|c| pred(c)).count()
    }

    fn is_overlay(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::Overlay { .. })
    }

    #[test]
    fn test_one_command_per_entity() {
        let tuning = Tuning::default();
        let settings = Settings::default();
        let mut state = GameState::new(1, &tuning);
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Laser, 600.0, 400.0, 100.0, 15.0, 240.0, 0.0));
        state
            .pickups
            .push(Pickup::new(PickupKind::Score, 700.0, 300.0, 200.0, 0.0));

        let frame = build_frame(&state, &tuning, &settings);
        assert_eq!(count(&frame, |c| matches!(c, DrawCommand::Obstacle { .. })), 1);
        assert_eq!(count(&frame, |c| matches!(c, DrawCommand::Pickup { .. })), 1);
        assert_eq!(count(&frame, |c| matches!(c, DrawCommand::Player { .. })), 1);
        assert_eq!(
            count(&frame, |c| matches!(c, DrawCommand::Star { .. })),
            tuning.world.star_count
        );
        assert_eq!(count(&frame, is_overlay), 0);
        assert!(matches!(frame.commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_hud_lines() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.score = 123.7;
        state.best = 456.0;
        state.player.combo = 3;
        state.player.shield = 2.0;
        assert_eq!(
            hud_lines(&state),
            vec!["Score 123", "Best 456", "STREAK x3", "Shield"]
        );
    }

    #[test]
    fn test_game_over_overlay_and_message() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.score = 80.0;
        state.game_over(&tuning);
        let frame = build_frame(&state, &tuning, &Settings::default());
        assert_eq!(count(&frame, is_overlay), 1);
        let message = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Message { title, lines } => Some((title.clone(), lines.clone())),
            _ => None,
        });
        let (title, lines) = message.expect("game over message");
        assert_eq!(title, "Game Over");
        assert_eq!(lines[0], "Score: 80   Best: 80");
        assert_eq!(count(&frame, |c| matches!(c, DrawCommand::Hint { .. })), 0);
    }

    #[test]
    fn test_tints_for_active_effects() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.slowmo = 1.0;
        state.player.shield = 1.0;
        let frame = build_frame(&state, &tuning, &Settings::default());
        assert_eq!(count(&frame, is_overlay), 2);

        let settings = Settings {
            tints: false,
            ..Settings::default()
        };
        let frame = build_frame(&state, &tuning, &settings);
        assert_eq!(count(&frame, is_overlay), 0);
    }

    #[test]
    fn test_shake_respects_settings() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.shake_offset = Vec2::new(3.0, -2.0);
        let frame = build_frame(&state, &tuning, &Settings::default());
        assert_eq!(frame.origin, Vec2::new(3.0, -2.0));

        let settings = Settings {
            screen_shake: false,
            ..Settings::default()
        };
        let frame = build_frame(&state, &tuning, &settings);
        assert_eq!(frame.origin, Vec2::ZERO);
    }

    #[test]
    fn test_frame_serializes() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        let frame = build_frame(&state, &tuning, &Settings::default());
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains(r#""cmd":"player""#));
    }
}
