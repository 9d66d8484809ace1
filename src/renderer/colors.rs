//! Colors for game elements (linear RGBA, 0-1)

use crate::sim::{ColorTag, ObstacleKind, PickupKind};

pub type Rgba = [f32; 4];

const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

pub const BACKGROUND: Rgba = rgb(10, 10, 18);
pub const GRID: Rgba = rgb(30, 30, 60);
pub const GROUND: Rgba = rgb(240, 240, 255);
pub const GROUND_DASH: Rgba = rgb(60, 60, 80);
pub const WHITE: Rgba = rgb(240, 240, 255);
pub const NEON_PINK: Rgba = rgb(255, 70, 165);
pub const NEON_CYAN: Rgba = rgb(40, 245, 240);
pub const NEON_PURPLE: Rgba = rgb(168, 85, 247);
pub const NEON_YELLOW: Rgba = rgb(255, 234, 94);
pub const NEON_GREEN: Rgba = rgb(50, 255, 170);

pub const SLOWMO_TINT: Rgba = rgba(40, 255, 240, 30);
pub const SHIELD_TINT: Rgba = rgba(40, 255, 170, 25);
pub const PAUSE_DIM: Rgba = rgba(0, 0, 0, 160);
pub const GAME_OVER_DIM: Rgba = rgba(0, 0, 0, 180);

pub fn tag(tag: ColorTag) -> Rgba {
    match tag {
        ColorTag::Pink => NEON_PINK,
        ColorTag::Cyan => NEON_CYAN,
        ColorTag::Purple => NEON_PURPLE,
        ColorTag::Yellow => NEON_YELLOW,
        ColorTag::Green => NEON_GREEN,
        ColorTag::White => WHITE,
    }
}

pub fn obstacle(kind: ObstacleKind) -> ColorTag {
    match kind {
        ObstacleKind::Block => ColorTag::Purple,
        ObstacleKind::Laser => ColorTag::Pink,
        ObstacleKind::Spikeball => ColorTag::Yellow,
    }
}

pub fn pickup(kind: PickupKind) -> ColorTag {
    match kind {
        PickupKind::Shield => ColorTag::Green,
        PickupKind::SlowMo => ColorTag::Cyan,
        PickupKind::Score => ColorTag::Yellow,
    }
}

/// Player glows cyan while shielded
pub fn player(shielded: bool) -> ColorTag {
    if shielded {
        ColorTag::Cyan
    } else {
        ColorTag::Pink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_colors_resolve() {
        assert_eq!(tag(obstacle(ObstacleKind::Laser)), NEON_PINK);
        assert_eq!(tag(pickup(PickupKind::Shield)), NEON_GREEN);
        assert_eq!(tag(player(true)), NEON_CYAN);
        assert!(SLOWMO_TINT[3] < 0.2);
    }
}
