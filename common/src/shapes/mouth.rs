//! Mouth shape selection.
//!
//! The mouth reads its own `emotion` (which the face may set differently from
//! the face's emotion) and picks exactly one profile:
//!
//! | Emotion | Profile |
//! |---------|---------|
//! | `HAPPY_3..1` | arc opening up, flatter as intensity drops |
//! | `NEUTRAL` | straight line below center |
//! | `SAD_3..1` | arc opening down, flatter as intensity drops |
//! | `SCARED`, `ANGRY` | rounded frame with six teeth |
//! | `MISCHIEVOUS`, `CONFUSED` | nothing |
//!
//! Flatter arcs use a larger radius, so their circle center is moved away
//! from the face to keep the visible curve near the same height.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, Size};

use super::Shape;
use crate::colors::WHITE;
use crate::config::{
    MOUTH_HALF_WIDTH,
    MOUTH_NEUTRAL_Y_OFFSET,
    MOUTH_SEGMENTS,
    TEETH_COUNT,
    TEETH_HEIGHT,
};
use crate::emotion::{Emotion, Intensity};
use crate::error::Error;
use crate::sink::ShapeSink;

/// Direction of a smile's arc midpoint (pointing down).
const SMILE_DIRECTION: u32 = 270;
/// Direction of a frown's arc midpoint (pointing up).
const FROWN_DIRECTION: u32 = 90;

/// Arc parameters relative to the mouth center.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MouthArc {
    /// Offset of the arc's circle center from the mouth center, in y.
    pub y_offset: i32,
    pub direction: u32,
    pub sweep: u32,
    pub radius: u32,
}

/// Which mouth to draw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MouthProfile {
    Arc(MouthArc),
    Line,
    Teeth,
    /// Intentionally empty. The face never hands these emotions to the mouth.
    Blank,
}

impl MouthProfile {
    pub const fn for_emotion(emotion: Emotion) -> Self {
        match emotion {
            Emotion::Happy(intensity) => {
                let (y_offset, sweep, radius) = match intensity {
                    Intensity::High => (0, 120, 100),
                    Intensity::Medium => (-100, 60, 200),
                    Intensity::Low => (-300, 30, 400),
                };
                Self::Arc(MouthArc {
                    y_offset,
                    direction: SMILE_DIRECTION,
                    sweep,
                    radius,
                })
            }
            Emotion::Sad(intensity) => {
                let (y_offset, sweep, radius) = match intensity {
                    Intensity::High => (200, 120, 100),
                    Intensity::Medium => (300, 60, 200),
                    Intensity::Low => (500, 30, 400),
                };
                Self::Arc(MouthArc {
                    y_offset,
                    direction: FROWN_DIRECTION,
                    sweep,
                    radius,
                })
            }
            Emotion::Neutral => Self::Line,
            Emotion::Scared | Emotion::Angry => Self::Teeth,
            Emotion::Mischievous | Emotion::Confused => Self::Blank,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mouth {
    pub center: Point,
    pub stroke: u32,
    pub color: Rgb888,
    pub segments: u32,
    pub emotion: Emotion,
    pub half_width: i32,
    pub neutral_y_offset: i32,
}

impl Mouth {
    pub const fn new(center: Point) -> Self {
        Self {
            center,
            stroke: 1,
            color: WHITE,
            segments: MOUTH_SEGMENTS,
            emotion: Emotion::Neutral,
            half_width: MOUTH_HALF_WIDTH,
            neutral_y_offset: MOUTH_NEUTRAL_Y_OFFSET,
        }
    }

    #[inline]
    pub const fn profile(&self) -> MouthProfile { MouthProfile::for_emotion(self.emotion) }

    /// Emit the mouth's shapes. Nothing is emitted for [`MouthProfile::Blank`].
    pub fn draw<S>(
        &self,
        sink: &mut S,
    ) -> Result<(), Error>
    where
        S: ShapeSink + ?Sized,
    {
        match self.profile() {
            MouthProfile::Arc(arc) => sink.emit(Shape::Arc {
                center: self.center + Point::new(0, arc.y_offset),
                radius: arc.radius,
                sweep: arc.sweep,
                direction: arc.direction,
                segments: self.segments,
                width: self.stroke * 2,
                color: self.color,
            }),
            MouthProfile::Line => sink.emit(self.center_line()),
            MouthProfile::Teeth => self.draw_teeth(sink),
            MouthProfile::Blank => Ok(()),
        }
    }

    /// Horizontal line across the mouth at the neutral height.
    fn center_line(&self) -> Shape {
        let y = self.center.y + self.neutral_y_offset;
        Shape::Line {
            start: Point::new(self.center.x - self.half_width, y),
            end: Point::new(self.center.x + self.half_width, y),
            stroke: 1,
            color: self.color,
        }
    }

    fn draw_teeth<S>(
        &self,
        sink: &mut S,
    ) -> Result<(), Error>
    where
        S: ShapeSink + ?Sized,
    {
        let width = u32::try_from(2 * self.half_width).map_err(|_| Error::InvalidGeometry("negative mouth width"))?;
        let left = self.center.x - self.half_width;
        let top = self.center.y + self.neutral_y_offset - TEETH_HEIGHT / 2;

        sink.emit(Shape::RoundRect {
            top_left: Point::new(left, top),
            size: Size::new(width, TEETH_HEIGHT as u32),
            corner_radius: (TEETH_HEIGHT / 2) as u32,
            stroke: self.stroke,
            outline: self.color,
            fill: None,
        })?;
        sink.emit(self.center_line())?;

        let tooth_width = 2 * self.half_width / TEETH_COUNT;
        for i in 1..TEETH_COUNT {
            let x = left + tooth_width * i;
            sink.emit(Shape::Line {
                start: Point::new(x, top),
                end: Point::new(x, top + TEETH_HEIGHT),
                stroke: 1,
                color: self.color,
            })?;
        }
        Ok(())
    }
}

impl Default for Mouth {
    fn default() -> Self { Self::new(Point::zero()) }
}
