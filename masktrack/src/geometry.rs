//! Pixel-space points and rectangles used for matching and mask placement

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position or displacement in pixel space
pub type Point = Vector2<f32>;

/// Shorthand constructor for a [`Point`]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Euclidean distance between two centers
pub fn center_distance(a: &Point, b: &Point) -> f32 {
    (a - b).norm()
}

pub fn midpoint(a: &Point, b: &Point) -> Point {
    (a + b) * 0.5
}

pub fn is_finite_point(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle of the given size centered on `center`
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({:.1}, {:.1}, {:.1}x{:.1})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_center_distance() {
        let a = point(0.0, 0.0);
        let b = point(3.0, 4.0);
        assert_abs_diff_eq!(center_distance(&a, &b), 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(center_distance(&b, &a), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(&point(10.0, 20.0), &point(30.0, 40.0));
        assert_abs_diff_eq!(m.x, 20.0);
        assert_abs_diff_eq!(m.y, 30.0);
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(point(50.0, 40.0), 20.0, 10.0);
        assert_eq!(r.x, 40.0);
        assert_eq!(r.y, 35.0);
        assert_eq!(r.width, 20.0);
        assert_eq!(r.height, 10.0);
        assert_eq!(r.to_string(), "Rect(40.0, 35.0, 20.0x10.0)");
    }

    #[test]
    fn test_finite_point() {
        assert!(is_finite_point(&point(1.0, 2.0)));
        assert!(!is_finite_point(&point(f32::NAN, 2.0)));
        assert!(!is_finite_point(&point(1.0, f32::INFINITY)));
    }
}
