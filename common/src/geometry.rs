//! Small numeric helpers shared by the face engine and the data modules.

use embedded_graphics::prelude::Point;

use crate::error::Error;

/// Fractional position of `value` inside `[min, max]` (both inclusive).
///
/// Values outside the range (and NaN) are rejected rather than clamped, so a
/// caller mapping noisy positions onto the screen decides for itself what to
/// drop.
pub fn linear_scale(
    min: f32,
    value: f32,
    max: f32,
) -> Result<f32, Error> {
    if max <= min {
        return Err(Error::InvalidGeometry("empty scale range"));
    }
    if !(min..=max).contains(&value) {
        return Err(Error::OutOfRange { value, min, max });
    }
    Ok((value - min) / (max - min))
}

/// Index of the bin containing `value`.
///
/// `bins` is an ascending list of lower bounds: `[0, 3, 6]` describes
/// `[0, 3)`, `[3, 6)` and `[6, inf)`. Returns `None` when `value` is below
/// the first bound (or there are no bins).
pub fn bin_cutoff<T: PartialOrd>(
    value: T,
    bins: &[T],
) -> Option<usize> {
    let mut start = 0;
    let mut end = bins.len();
    while start < end {
        let mid = start + (end - start) / 2;
        if value == bins[mid] {
            return Some(mid);
        } else if value < bins[mid] {
            if mid == 0 {
                return None;
            } else if bins[mid - 1] <= value {
                return Some(mid - 1);
            }
            end = mid;
        } else {
            start = mid + 1;
        }
    }
    bins.len().checked_sub(1)
}

/// 2D Euclidean distance.
#[inline]
pub fn euclid(
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
) -> f32 {
    let dx = x0 - x1;
    let dy = y0 - y1;
    libm::sqrtf(dx * dx + dy * dy)
}

/// Distance between two points.
#[inline]
pub fn distance(
    a: Point,
    b: Point,
) -> f32 {
    euclid(a.x as f32, a.y as f32, b.x as f32, b.y as f32)
}

/// Rotate `point` about the origin by `degrees`, rounding to whole pixels.
pub fn rotate(
    point: Point,
    degrees: i32,
) -> Point {
    let theta = (degrees as f32).to_radians();
    let (sin, cos) = (libm::sinf(theta), libm::cosf(theta));
    let (x, y) = (point.x as f32, point.y as f32);
    Point::new(round(x * cos - y * sin), round(x * sin + y * cos))
}

/// Round half away from zero into an `i32`.
#[inline]
pub fn round(value: f32) -> i32 {
    libm::roundf(value) as i32
}
