use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;

use super::Shape;
use crate::colors::WHITE;
use crate::config::{EYEBROW_DEFAULT_HEIGHT, EYEBROW_MAX_ANGLE};
use crate::error::Error;
use crate::geometry::rotate;

/// A rectangle rotated about its center.
///
/// Positive angles tilt the brow clockwise on screen (y grows downward).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EyeBrow {
    pub center: Point,
    pub width: i32,
    pub height: i32,
    /// Degrees. Drawn clamped to +/-[`EYEBROW_MAX_ANGLE`]; [`update`](Self::update)
    /// clamps the stored value too.
    pub angle: i32,
    pub stroke: u32,
    pub color: Rgb888,
}

impl EyeBrow {
    pub const fn new(
        center: Point,
        width: i32,
    ) -> Self {
        Self {
            center,
            width,
            height: EYEBROW_DEFAULT_HEIGHT,
            angle: 0,
            stroke: 1,
            color: WHITE,
        }
    }

    /// The angle the brow is drawn at.
    #[inline]
    pub fn drawn_angle(&self) -> i32 { self.angle.clamp(-EYEBROW_MAX_ANGLE, EYEBROW_MAX_ANGLE) }

    /// Clamp the stored angle into range.
    #[inline]
    pub fn update(&mut self) { self.angle = self.drawn_angle(); }

    /// Corners of the rotated rectangle at the drawn angle, in outline order.
    pub fn points(&self) -> [Point; 4] {
        let hh = self.height / 2;
        let ww = self.width / 2;
        [
            Point::new(-ww, hh),
            Point::new(ww, hh),
            Point::new(ww, -hh),
            Point::new(-ww, -hh),
        ]
        .map(|corner| rotate(corner, self.drawn_angle()) + self.center)
    }

    pub fn shape(&self) -> Result<Shape, Error> {
        if self.width < 0 || self.height < 0 {
            return Err(Error::InvalidGeometry("negative eyebrow size"));
        }
        Ok(Shape::Polygon {
            points: self.points(),
            stroke: self.stroke,
            fill: self.color,
        })
    }
}

impl Default for EyeBrow {
    fn default() -> Self { Self::new(Point::zero(), 2) }
}
