//! Rasterizing shape records with `embedded-graphics`.
//!
//! [`Canvas`] is the sink the firmware and simulator hand to a module. It
//! converts each [`Shape`] to the matching `embedded-graphics` primitive and
//! draws it straight away, translating by an optional offset so a face laid
//! out in its own square can be centered on a larger screen.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc,
    Circle,
    Line,
    PrimitiveStyle,
    PrimitiveStyleBuilder,
    Rectangle,
    RoundedRectangle,
    Triangle,
};

use crate::colors::to_display;
use crate::error::Error;
use crate::shapes::Shape;
use crate::sink::ShapeSink;

/// Shape sink that draws onto an RGB565 display.
pub struct Canvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: &'a mut D,
    offset: Point,
}

impl<'a, D> Canvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(display: &'a mut D) -> Self { Self::with_offset(display, Point::zero()) }

    /// Draw every record shifted by `offset`.
    pub fn with_offset(
        display: &'a mut D,
        offset: Point,
    ) -> Self {
        Self { display, offset }
    }

    /// Clear the whole target to one color.
    pub fn clear(
        &mut self,
        color: Rgb888,
    ) {
        self.display.clear(to_display(color)).ok();
    }

    #[inline]
    pub const fn offset(&self) -> Point { self.offset }
}

fn outline_style(
    stroke: u32,
    outline: Rgb888,
    fill: Option<Rgb888>,
) -> PrimitiveStyle<Rgb565> {
    let mut style = PrimitiveStyleBuilder::new()
        .stroke_color(to_display(outline))
        .stroke_width(stroke);
    if let Some(fill) = fill {
        style = style.fill_color(to_display(fill));
    }
    style.build()
}

/// Embedded-graphics angles run clockwise from 3 o'clock because y points
/// down, so a counter-clockwise direction is negated.
fn arc_start(
    direction: u32,
    sweep: u32,
) -> f32 {
    -(direction as f32) - sweep as f32 / 2.0
}

impl<D> ShapeSink for Canvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn emit(
        &mut self,
        shape: Shape,
    ) -> Result<(), Error> {
        let offset = self.offset;
        match shape {
            Shape::Circle {
                center,
                radius,
                stroke,
                outline,
                fill,
            } => {
                Circle::with_center(center + offset, radius * 2)
                    .into_styled(outline_style(stroke, outline, fill))
                    .draw(self.display)
                    .ok();
            }
            Shape::Polygon { points, fill, .. } => {
                let [a, b, c, d] = points.map(|p| p + offset);
                let style = PrimitiveStyle::with_fill(to_display(fill));
                Triangle::new(a, b, c).into_styled(style).draw(self.display).ok();
                Triangle::new(a, c, d).into_styled(style).draw(self.display).ok();
            }
            Shape::RoundRect {
                top_left,
                size,
                corner_radius,
                stroke,
                outline,
                fill,
            } => {
                RoundedRectangle::with_equal_corners(
                    Rectangle::new(top_left + offset, size),
                    Size::new(corner_radius, corner_radius),
                )
                .into_styled(outline_style(stroke, outline, fill))
                .draw(self.display)
                .ok();
            }
            Shape::Arc {
                center,
                radius,
                sweep,
                direction,
                width,
                color,
                ..
            } => {
                Arc::with_center(
                    center + offset,
                    radius * 2,
                    Angle::from_degrees(arc_start(direction, sweep)),
                    Angle::from_degrees(sweep as f32),
                )
                .into_styled(PrimitiveStyle::with_stroke(to_display(color), width))
                .draw(self.display)
                .ok();
            }
            Shape::Line { start, end, stroke, color } => {
                Line::new(start + offset, end + offset)
                    .into_styled(PrimitiveStyle::with_stroke(to_display(color), stroke))
                    .draw(self.display)
                    .ok();
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
