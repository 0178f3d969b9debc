//! Plane geometry shared by the sprite and the controller.

use glam::DVec2;

/// A 2D vector in screen space. The y-axis points down.
pub type Vector2D = DVec2;

/// The vector pointing from `a` towards `b`, i.e. `b - a`.
pub fn difference(a: Vector2D, b: Vector2D) -> Vector2D {
    Vector2D::new(b.x - a.x, b.y - a.y)
}

/// The Euclidean length of `v`.
pub fn magnitude(v: Vector2D) -> f64 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// The visible area of the page, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The bottom-right corner, where the sprite starts.
    pub fn corner(&self) -> Vector2D {
        Vector2D::new(self.width, self.height)
    }

    /// Pulls `v` into `[0, width] x [0, height]`.
    pub fn clamp(&self, v: Vector2D) -> Vector2D {
        Vector2D::new(v.x.max(0.0).min(self.width), v.y.max(0.0).min(self.height))
    }

    pub fn contains(&self, v: Vector2D) -> bool {
        (0.0..=self.width).contains(&v.x) && (0.0..=self.height).contains(&v.y)
    }
}
