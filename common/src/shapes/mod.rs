//! Face features and the shape records they emit.
//!
//! Every feature owns its position, size and color, and turns that state into
//! one or more [`Shape`] records. Records are plain data: the sink decides
//! whether they are rasterized, logged, or compared in a test.

mod eye;
mod eyebrow;
mod mouth;
mod nose;

use core::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, Size};

pub use eye::Eye;
pub use eyebrow::EyeBrow;
pub use mouth::{Mouth, MouthArc, MouthProfile};
pub use nose::Nose;

use crate::colors::to_hex;

/// A primitive the display layer knows how to draw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Shape {
    /// Circle outline with optional fill. Eyes, pupils, aircraft.
    Circle {
        center: Point,
        radius: u32,
        stroke: u32,
        outline: Rgb888,
        fill: Option<Rgb888>,
    },
    /// Filled quadrilateral. Eyebrows.
    Polygon { points: [Point; 4], stroke: u32, fill: Rgb888 },
    /// Rectangle with rounded corners. Nose and teeth frame.
    RoundRect {
        top_left: Point,
        size: Size,
        corner_radius: u32,
        stroke: u32,
        outline: Rgb888,
        fill: Option<Rgb888>,
    },
    /// Thick circular arc. Smiles and frowns.
    ///
    /// `direction` is where the middle of the arc points, in degrees
    /// counter-clockwise from 3 o'clock (90 is up, 270 is down).
    Arc {
        center: Point,
        radius: u32,
        sweep: u32,
        direction: u32,
        segments: u32,
        width: u32,
        color: Rgb888,
    },
    /// Straight line.
    Line { start: Point, end: Point, stroke: u32, color: Rgb888 },
}

impl Shape {
    /// Short name of the record kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Polygon { .. } => "polygon",
            Self::RoundRect { .. } => "roundrect",
            Self::Arc { .. } => "arc",
            Self::Line { .. } => "line",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match *self {
            Self::Circle {
                center,
                radius,
                stroke,
                outline,
                fill,
            } => {
                write!(
                    f,
                    "circle center ({}, {}) r={radius} stroke={stroke} 0x{:06x}",
                    center.x,
                    center.y,
                    to_hex(outline)
                )?;
                if let Some(fill) = fill {
                    write!(f, " fill 0x{:06x}", to_hex(fill))?;
                }
                Ok(())
            }
            Self::Polygon { points, stroke, fill } => {
                f.write_str("polygon")?;
                for p in points {
                    write!(f, " ({}, {})", p.x, p.y)?;
                }
                write!(f, " stroke={stroke} fill 0x{:06x}", to_hex(fill))
            }
            Self::RoundRect {
                top_left,
                size,
                corner_radius,
                stroke,
                outline,
                ..
            } => write!(
                f,
                "roundrect ({}, {}) {}x{} r={corner_radius} stroke={stroke} 0x{:06x}",
                top_left.x,
                top_left.y,
                size.width,
                size.height,
                to_hex(outline)
            ),
            Self::Arc {
                center,
                radius,
                sweep,
                direction,
                width,
                color,
                ..
            } => write!(
                f,
                "arc center ({}, {}) r={radius} sweep={sweep} dir={direction} width={width} 0x{:06x}",
                center.x,
                center.y,
                to_hex(color)
            ),
            Self::Line { start, end, stroke, color } => write!(
                f,
                "line ({}, {}) -> ({}, {}) stroke={stroke} 0x{:06x}",
                start.x,
                start.y,
                end.x,
                end.y,
                to_hex(color)
            ),
        }
    }
}
