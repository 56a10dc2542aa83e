//! `Canvas` implementation on `embedded-graphics`

use annulus_core::pattern::Pattern;
use annulus_core::traits::{self, Bounds, Canvas, DisplayError, Fill};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Ellipse, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment, StyledDrawable,
    Triangle,
};
use embedded_graphics::Pixel;

/// Draws surface primitives into an `embedded-graphics` target
///
/// Polygons are filled as triangle fans, so only convex polygons are
/// supported. Patterns are tiled from the target origin.
pub struct GraphicsCanvas<D> {
    target: D,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    /// Fail when `area` misses the target entirely
    fn check_visible(&self, area: &Rectangle) -> Result<(), DisplayError> {
        let visible = area.intersection(&self.target.bounding_box());
        if visible.size.width == 0 || visible.size.height == 0 {
            return Err(DisplayError::OutOfBounds);
        }
        Ok(())
    }

    fn paint<P>(
        &mut self,
        shape: &P,
        style: PrimitiveStyle<BinaryColor>,
        fill: Fill<'_>,
    ) -> Result<(), DisplayError>
    where
        P: StyledDrawable<PrimitiveStyle<BinaryColor>, Color = BinaryColor, Output = ()>,
    {
        let result = match fill {
            Fill::Pattern(pattern) => shape.draw_styled(
                &style,
                &mut Dithered {
                    target: &mut self.target,
                    pattern,
                },
            ),
            Fill::White | Fill::Black => shape.draw_styled(&style, &mut self.target),
        };
        result.map_err(|_| DisplayError::Communication)
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn fill_polygon(
        &mut self,
        points: &[traits::Point],
        fill: Fill<'_>,
    ) -> Result<(), DisplayError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };

        let area = Rectangle::with_corners(
            Point::new(
                points.iter().map(|p| p.x).min().unwrap_or(first.x),
                points.iter().map(|p| p.y).min().unwrap_or(first.y),
            ),
            Point::new(
                points.iter().map(|p| p.x).max().unwrap_or(first.x),
                points.iter().map(|p| p.y).max().unwrap_or(first.y),
            ),
        );
        self.check_visible(&area)?;

        let style = PrimitiveStyle::with_fill(color(fill));
        let origin = to_point(*first);
        for pair in rest.windows(2) {
            let triangle = Triangle::new(origin, to_point(pair[0]), to_point(pair[1]));
            self.paint(&triangle, style, fill)?;
        }
        Ok(())
    }

    fn fill_ellipse(&mut self, bounds: Bounds, fill: Fill<'_>) -> Result<(), DisplayError> {
        let ellipse = to_ellipse(bounds);
        self.check_visible(&ellipse.bounding_box())?;
        self.paint(&ellipse, PrimitiveStyle::with_fill(color(fill)), fill)
    }

    fn draw_ellipse(
        &mut self,
        bounds: Bounds,
        line_width: u32,
        fill: Fill<'_>,
    ) -> Result<(), DisplayError> {
        let ellipse = to_ellipse(bounds);
        self.check_visible(&ellipse.bounding_box())?;
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color(fill))
            .stroke_width(line_width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        self.paint(&ellipse, style, fill)
    }
}

/// Solid color for a fill; patterns pick their color per pixel
fn color(fill: Fill<'_>) -> BinaryColor {
    match fill {
        Fill::White => BinaryColor::Off,
        Fill::Black | Fill::Pattern(_) => BinaryColor::On,
    }
}

fn to_point(point: traits::Point) -> Point {
    Point::new(point.x, point.y)
}

fn to_ellipse(bounds: Bounds) -> Ellipse {
    Ellipse::new(
        Point::new(bounds.x, bounds.y),
        Size::new(bounds.width, bounds.height),
    )
}

/// Draw target that recolors pixels through a dither pattern
struct Dithered<'a, D> {
    target: &'a mut D,
    pattern: &'a Pattern,
}

impl<D: Dimensions> Dimensions for Dithered<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D> DrawTarget for Dithered<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let pattern = self.pattern;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(p, _)| pattern.is_opaque_at(p.x, p.y))
                .map(|Pixel(p, _)| {
                    let ink = if pattern.is_white_at(p.x, p.y) {
                        BinaryColor::Off
                    } else {
                        BinaryColor::On
                    };
                    Pixel(p, ink)
                }),
        )
    }
}
