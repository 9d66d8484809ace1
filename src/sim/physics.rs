//! Player movement and jump mechanics
//!
//! Runs once per Running tick. Slow-mo halves the player's local delta time
//! only; the world keeps scrolling at the unscaled rate.

use super::input::TickInput;
use super::state::{GameEvent, Player};
use crate::tuning::Tuning;

/// Step the player one tick
pub fn update_player(
    player: &mut Player,
    input: &TickInput,
    dt: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let pt = &tuning.player;
    let ground_y = tuning.ground_y();

    let local_dt = if player.slowmo > 0.0 {
        dt * pt.slowmo_time_scale
    } else {
        dt
    };

    // Timers (combo uses unscaled dt, below)
    player.coyote = (player.coyote - local_dt).max(0.0);
    player.jump_buffer = (player.jump_buffer - local_dt).max(0.0);
    player.hover = (player.hover - local_dt).max(0.0);
    player.slowmo = (player.slowmo - local_dt).max(0.0);
    player.shield = (player.shield - local_dt).max(0.0);

    if input.jump_pressed {
        player.jump_buffer = pt.jump_buffer_window;
    }

    // Horizontal: accelerate, clamp, then friction every tick
    let accel = if player.on_ground {
        pt.accel_ground
    } else {
        pt.accel_air
    };
    let mut ax = 0.0;
    if input.left {
        ax -= accel;
    }
    if input.right {
        ax += accel;
    }
    player.vel.x += ax * local_dt;
    player.vel.x = player.vel.x.clamp(-pt.max_speed_x, pt.max_speed_x);
    player.vel.x *= if player.on_ground {
        pt.friction_ground
    } else {
        pt.friction_air
    };

    // Buffered jump, forgiven by coyote time
    if player.jump_buffer > 0.0 && (player.on_ground || player.coyote > 0.0) {
        player.vel.y = pt.jump_velocity;
        player.on_ground = false;
        player.coyote = 0.0;
        player.jump_buffer = 0.0;
        player.hover = pt.hover_window;
        events.push(GameEvent::Jumped);
    }

    // Variable jump height
    if input.jump_released && player.vel.y < pt.jump_cut_velocity {
        player.vel.y = pt.jump_cut_velocity;
    }

    // Hover replaces gravity with hover gravity for this tick
    if input.jump && !player.on_ground && player.hover > 0.0 {
        player.vel.y += (pt.hover_gravity - pt.gravity) * local_dt;
    }

    if input.fast_fall && !player.on_ground {
        player.vel.y += pt.gravity * local_dt * pt.fast_fall_factor;
    }

    player.vel.y = (player.vel.y + pt.gravity * local_dt).min(pt.max_fall_speed);

    player.pos += player.vel * local_dt;

    if player.pos.y + player.radius >= ground_y {
        if !player.on_ground && player.vel.y > pt.landing_impact_speed {
            events.push(GameEvent::Landed {
                impact_speed: player.vel.y,
            });
        }
        player.pos.y = ground_y - player.radius;
        player.vel.y = 0.0;
        player.on_ground = true;
        player.coyote = pt.coyote_window;
    } else {
        // Walked off a ledge rather than jumped: grant coyote time.
        // Only valid for the single flat ground line.
        if player.on_ground && player.vel.y > 0.0 {
            player.coyote = pt.coyote_window;
        }
        player.on_ground = false;
    }

    player.combo_time = (player.combo_time - dt).max(0.0);
    if player.combo_time <= 0.0 && player.combo > 0 {
        player.combo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn step(player: &mut Player, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
        let mut events = Vec::new();
        update_player(player, input, SIM_DT, tuning, &mut events);
        events
    }

    #[test]
    fn test_rests_on_ground() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        for _ in 0..60 {
            step(&mut player, &TickInput::default(), &tuning);
        }
        assert!(player.on_ground);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, tuning.ground_y() - player.radius);
    }

    #[test]
    fn test_ground_jump() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        let input = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        let events = step(&mut player, &input, &tuning);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert!(!player.on_ground);
        assert!(player.vel.y < 0.0);
        assert_eq!(player.jump_buffer, 0.0);
        assert_eq!(player.hover, tuning.player.hover_window);
    }

    #[test]
    fn test_jump_cut_on_release() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        step(
            &mut player,
            &TickInput {
                jump: true,
                jump_pressed: true,
                ..Default::default()
            },
            &tuning,
        );
        let release = TickInput {
            jump_released: true,
            ..Default::default()
        };
        step(&mut player, &release, &tuning);
        // Clamped to the cut, then one tick of gravity
        let expected = tuning.player.jump_cut_velocity + tuning.player.gravity * SIM_DT;
        assert!((player.vel.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hover_softens_gravity() {
        let tuning = Tuning::default();
        let mut held = Player::grounded(&tuning);
        let mut released = Player::grounded(&tuning);
        let press = TickInput {
            jump: true,
            jump_pressed: true,
            ..Default::default()
        };
        step(&mut held, &press, &tuning);
        step(&mut released, &press, &tuning);

        let hold = TickInput {
            jump: true,
            ..Default::default()
        };
        for _ in 0..10 {
            step(&mut held, &hold, &tuning);
            step(&mut released, &TickInput::default(), &tuning);
        }
        assert!(held.vel.y < released.vel.y);
    }

    #[test]
    fn test_fast_fall_accelerates() {
        let tuning = Tuning::default();
        let mut normal = Player::new(&tuning);
        let mut fast = Player::new(&tuning);
        let down = TickInput {
            fast_fall: true,
            ..Default::default()
        };
        step(&mut normal, &TickInput::default(), &tuning);
        step(&mut fast, &down, &tuning);
        assert!(fast.vel.y > normal.vel.y);
    }

    #[test]
    fn test_terminal_velocity() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = -10_000.0;
        let down = TickInput {
            fast_fall: true,
            ..Default::default()
        };
        for _ in 0..240 {
            step(&mut player, &down, &tuning);
        }
        assert_eq!(player.vel.y, tuning.player.max_fall_speed);
    }

    #[test]
    fn test_horizontal_friction_decelerates() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            step(&mut player, &right, &tuning);
        }
        let moving = player.vel.x;
        assert!(moving > 0.0 && moving <= tuning.player.max_speed_x);

        step(&mut player, &TickInput::default(), &tuning);
        assert!(player.vel.x < moving);
        assert!(player.vel.x > 0.0);
    }

    #[test]
    fn test_hard_landing_emits_cue() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = tuning.ground_y() - player.radius - 1.0;
        player.vel.y = 600.0;
        let events = step(&mut player, &TickInput::default(), &tuning);
        assert!(matches!(events.as_slice(), [GameEvent::Landed { .. }]));
        assert!(player.on_ground);
        assert_eq!(player.coyote, tuning.player.coyote_window);
    }

    #[test]
    fn test_timers_never_negative() {
        let tuning = Tuning::default();
        let mut player = Player::grounded(&tuning);
        player.shield = 0.001;
        player.slowmo = 0.001;
        player.combo_time = 0.001;
        player.combo = 4;
        step(&mut player, &TickInput::default(), &tuning);
        assert_eq!(player.shield, 0.0);
        assert_eq!(player.slowmo, 0.0);
        assert_eq!(player.combo_time, 0.0);
        assert_eq!(player.combo, 0);
        assert!(player.jump_buffer >= 0.0 && player.hover >= 0.0);
    }
}
