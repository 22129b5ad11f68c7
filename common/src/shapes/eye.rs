use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;

use super::Shape;
use crate::colors::WHITE;
use crate::error::Error;

/// A circle outline. Used for both eyes and the pupils inside them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Eye {
    pub center: Point,
    pub radius: i32,
    pub stroke: u32,
    pub color: Rgb888,
    pub fill: Option<Rgb888>,
}

impl Eye {
    pub const fn new(
        center: Point,
        radius: i32,
    ) -> Self {
        Self {
            center,
            radius,
            stroke: 1,
            color: WHITE,
            fill: None,
        }
    }

    /// Move the center back onto `other`'s center.
    #[inline]
    pub fn center_on(
        &mut self,
        other: &Eye,
    ) {
        self.center = other.center;
    }

    pub fn shape(&self) -> Result<Shape, Error> {
        let radius = u32::try_from(self.radius).map_err(|_| Error::InvalidGeometry("negative eye radius"))?;
        Ok(Shape::Circle {
            center: self.center,
            radius,
            stroke: self.stroke,
            outline: self.color,
            fill: self.fill,
        })
    }
}

impl Default for Eye {
    fn default() -> Self { Self::new(Point::zero(), 1) }
}
