//! Plane geometry shared by every layer: points, translation vectors, and
//! axis-aligned rectangles in surface coordinates.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A translation in surface units, as delivered by the host's gesture layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// The zero translation.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn add_left(&mut self, delta: f64) {
        self.left += delta;
    }

    pub fn add_top(&mut self, delta: f64) {
        self.top += delta;
    }

    pub fn add_width(&mut self, delta: f64) {
        self.width += delta;
    }

    pub fn add_height(&mut self, delta: f64) {
        self.height += delta;
    }
}

/// Clamp `value` into `[lo, hi]`. Unlike [`f64::clamp`] this never panics on
/// an inverted interval; the upper bound wins.
#[must_use]
pub fn clamp_between(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
