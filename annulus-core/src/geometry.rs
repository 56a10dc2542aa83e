//! Ring geometry
//!
//! Every LED is drawn as a thin isosceles trapezoid pointing away from the
//! ring center. The trapezoid is computed once in a local frame (LED 0,
//! pointing straight up) and then rotated into place for each of the 64
//! slots. All vertices are resolved to integer screen coordinates at
//! start-up, so the render pass never touches trigonometry.

use core::f64::consts::PI;

use annulus_protocol::{LedIndex, RingId, N_LEDS, N_RINGS};

use crate::config::Layout;
use crate::traits::{Bounds, Point};

/// Angle subtended by one LED slot (radians)
pub const LED_ANGLE: f64 = 2.0 * PI / N_LEDS as f64;

/// Gap between the outer outline and the LED tips (pixels)
const OUTER_MARGIN: f64 = 3.0;

/// Gap between the LED bases and the key fill (pixels)
const KEY_MARGIN: f64 = 2.0;

/// Gap between the LED bases and the inner outline (pixels)
const INNER_MARGIN: f64 = 1.0;

/// Four integer vertices of one LED
///
/// Order: outer-left, outer-right, inner-right, inner-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quad {
    points: [Point; 4],
}

impl Quad {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Flat coordinate list `x0, y0, .. x3, y3`
    pub fn coords(&self) -> [i32; 8] {
        let mut coords = [0; 8];
        for (pair, point) in coords.chunks_exact_mut(2).zip(self.points.iter()) {
            pair[0] = point.x;
            pair[1] = point.y;
        }
        coords
    }
}

/// LED trapezoid in the local frame, before rotation
///
/// The local frame has its origin at the ring center, y growing downward,
/// and LED 0 pointing toward negative y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedShape {
    corners: [(f64, f64); 4],
}

impl LedShape {
    /// Derive the trapezoid from the layout's radius, padding and arm length
    pub fn new(layout: &Layout) -> Self {
        let radius = layout.radius as f64;
        let padding = layout.led_padding as f64;
        let length = layout.led_length as f64;

        let half_angle = LED_ANGLE / 2.0;
        let tan_half = libm::tan(half_angle);

        // Distance from the center where neighbouring LEDs stop touching
        let inner_radius = padding / libm::sin(half_angle);
        let height = radius - inner_radius;
        let half_base = height * tan_half;
        let inner_height = height - length;
        let inner_half_base = inner_height * tan_half;

        let tip = -(inner_radius + height);
        let base = -(inner_radius + inner_height);

        Self {
            corners: [
                (-half_base, tip),
                (half_base, tip),
                (inner_half_base, base),
                (-inner_half_base, base),
            ],
        }
    }

    /// Local-frame corners
    pub fn corners(&self) -> &[(f64, f64); 4] {
        &self.corners
    }

    /// Rotate into slot `led` around `center` and round to pixels
    pub fn place(&self, center: Point, led: LedIndex) -> Quad {
        let angle = led.get() as f64 * LED_ANGLE;
        let (sin, cos) = (libm::sin(angle), libm::cos(angle));
        let (cx, cy) = (center.x as f64, center.y as f64);

        let mut points = [Point::default(); 4];
        for (point, &(u, v)) in points.iter_mut().zip(self.corners.iter()) {
            point.x = libm::round(u * cos - v * sin + cx) as i32;
            point.y = libm::round(u * sin + v * cos + cy) as i32;
        }
        Quad::new(points)
    }
}

/// Ellipse bounds inset from the ring's bounding square
///
/// The height is one pixel shorter than the width; the host rasterizer
/// expects exactly these boxes.
fn inset_bounds(center: Point, radius: f64, inset: f64) -> Bounds {
    let half = radius - inset;
    Bounds::new(
        (center.x as f64 - radius + inset) as i32,
        (center.y as f64 - radius + inset) as i32,
        (2.0 * half + 1.0) as u32,
        (2.0 * half) as u32,
    )
}

/// Square around the LED tips, used for the outer outline and background
pub fn outer_bounds(center: Point, radius: f32) -> Bounds {
    let radius = radius as f64 + OUTER_MARGIN;
    let size = (2.0 * radius) as u32;
    Bounds::new(
        (center.x as f64 - radius) as i32,
        (center.y as f64 - radius) as i32,
        size,
        size,
    )
}

/// Precomputed screen geometry of one ring
#[derive(Debug, Clone)]
pub struct RingGeometry {
    center: Point,
    quads: [Quad; N_LEDS],
    key: Bounds,
    inner_outline: Bounds,
    outer_outline: Bounds,
}

impl RingGeometry {
    /// Build the geometry of a ring centered at `center`
    pub fn build(center: Point, layout: &Layout) -> Self {
        Self::with_shape(&LedShape::new(layout), center, layout)
    }

    /// Build from an already derived LED shape
    pub fn with_shape(shape: &LedShape, center: Point, layout: &Layout) -> Self {
        let radius = layout.radius as f64;
        let base = layout.led_length as f64 + layout.led_padding as f64;

        Self {
            center,
            quads: core::array::from_fn(|i| shape.place(center, LedIndex::masked(i as u8))),
            key: inset_bounds(center, radius, base + KEY_MARGIN),
            inner_outline: inset_bounds(center, radius, base + INNER_MARGIN),
            outer_outline: outer_bounds(center, layout.radius),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Quad of one LED
    pub fn quad(&self, led: LedIndex) -> &Quad {
        &self.quads[led.index()]
    }

    /// Area cleared before the ring is first drawn
    pub fn background(&self) -> Bounds {
        self.outer_outline
    }

    /// Filled key ellipse
    pub fn key(&self) -> Bounds {
        self.key
    }

    pub fn inner_outline(&self) -> Bounds {
        self.inner_outline
    }

    pub fn outer_outline(&self) -> Bounds {
        self.outer_outline
    }
}

/// Geometry of all rings
#[derive(Debug, Clone)]
pub struct Geometry {
    rings: [RingGeometry; N_RINGS],
}

impl Geometry {
    /// Compute every ring's geometry from the layout
    pub fn new(layout: &Layout) -> Self {
        let shape = LedShape::new(layout);
        Self {
            rings: core::array::from_fn(|i| {
                RingGeometry::with_shape(&shape, layout.centers[i], layout)
            }),
        }
    }

    pub fn ring(&self, ring: RingId) -> &RingGeometry {
        &self.rings[ring.index()]
    }
}
