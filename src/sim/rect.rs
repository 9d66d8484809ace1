//! Axis-aligned rectangle geometry
//!
//! Obstacles are rectangles in screen space (y grows downward). The player
//! and pickups are tested against them as circles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square bounding box around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Closest point on or inside the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.pos, self.pos + self.size)
    }

    /// Distance from `p` to the rectangle (zero inside)
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let dx = (self.left() - p.x).max(0.0).max(p.x - self.right());
        let dy = (self.top() - p.y).max(0.0).max(p.y - self.bottom());
        Vec2::new(dx, dy).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_closest_point_clamps() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.closest_point(Vec2::new(-5.0, 5.0)), Vec2::new(0.0, 5.0));
        assert_eq!(r.closest_point(Vec2::new(20.0, 20.0)), Vec2::new(10.0, 10.0));
        assert_eq!(r.closest_point(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_distance_to() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.distance_to(Vec2::new(5.0, 5.0)), 0.0);
        assert!((r.distance_to(Vec2::new(13.0, 14.0)) - 5.0).abs() < 1e-5);
        assert!((r.distance_to(Vec2::new(-2.0, 5.0)) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(50.0, 50.0), 10.0);
        assert_eq!(r.pos, Vec2::new(40.0, 40.0));
        assert_eq!(r.size, Vec2::new(20.0, 20.0));
        assert_eq!(r.distance_to(Vec2::new(59.0, 41.0)), 0.0);
    }
}
