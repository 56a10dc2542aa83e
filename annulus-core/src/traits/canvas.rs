//! Canvas trait for the host rasterizer

use crate::pattern::Pattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Coordinates outside the drawable area
    OutOfBounds,
}

/// Screen-space pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of an ellipse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `point` lies inside the box
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && (point.x - self.x) < self.width as i32
            && (point.y - self.y) < self.height as i32
    }
}

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill<'a> {
    /// Solid white (paper)
    White,
    /// Solid black (ink)
    Black,
    /// Dither pattern tiled from the screen origin
    Pattern(&'a Pattern),
}

/// Trait for the host's 2D rasterizer
///
/// The surface never rasterizes by itself; it only issues these three
/// primitives. Implementations paint immediately into the host framebuffer.
pub trait Canvas {
    /// Fill a convex polygon
    ///
    /// - `points`: vertices in drawing order (the LED quads use four)
    /// - `fill`: paint for the interior
    fn fill_polygon(&mut self, points: &[Point], fill: Fill<'_>) -> Result<(), DisplayError>;

    /// Fill the ellipse inscribed in `bounds`
    fn fill_ellipse(&mut self, bounds: Bounds, fill: Fill<'_>) -> Result<(), DisplayError>;

    /// Stroke the outline of the ellipse inscribed in `bounds`
    ///
    /// - `line_width`: stroke width in pixels
    fn draw_ellipse(
        &mut self,
        bounds: Bounds,
        line_width: u32,
        fill: Fill<'_>,
    ) -> Result<(), DisplayError>;
}
