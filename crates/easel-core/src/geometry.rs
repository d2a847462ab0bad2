//! Geometric primitives for board placement.
//!
//! - [`Point`] - A position on the board
//! - [`Size`] - Width and height of an item
//!
//! Both serialize to the field names the board service expects
//! (`{"x", "y"}` and `{"width", "height"}`), so they can be embedded in
//! request bodies as-is.

use serde::Serialize;

/// A position on the board.
///
/// Board coordinates are unbounded floating point values; the service places
/// the item's center at this point.
///
/// # Examples
///
/// ```
/// # use easel_core::geometry::Point;
/// let p = Point::new(10.0, -20.5);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), -20.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }
}

/// Width and height of a board item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size with the specified dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f64 {
        self.height
    }
}
