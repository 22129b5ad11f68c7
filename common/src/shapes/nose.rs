use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, Size};

use super::Shape;
use crate::colors::WHITE;
use crate::error::Error;

/// A rounded rectangle centered on the face. The weather module resizes it
/// with temperature.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Nose {
    pub center: Point,
    pub width: i32,
    pub height: i32,
    pub stroke: u32,
    pub color: Rgb888,
    pub fill: Option<Rgb888>,
}

impl Nose {
    pub const fn new(
        center: Point,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            center,
            width,
            height,
            stroke: 1,
            color: WHITE,
            fill: None,
        }
    }

    pub fn shape(&self) -> Result<Shape, Error> {
        let (Ok(width), Ok(height)) = (u32::try_from(self.width), u32::try_from(self.height)) else {
            return Err(Error::InvalidGeometry("negative nose size"));
        };
        let top_left = self.center - Point::new(self.width / 2, self.height / 2);
        Ok(Shape::RoundRect {
            top_left,
            size: Size::new(width, height),
            corner_radius: width.min(height) / 2,
            stroke: self.stroke,
            outline: self.color,
            fill: self.fill,
        })
    }
}

impl Default for Nose {
    fn default() -> Self { Self::new(Point::zero(), 1, 1) }
}
