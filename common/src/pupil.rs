//! Keeping a pupil inside its eye.
//!
//! Whenever something moves a pupil (an emotion pose, humidity, a tap) the
//! result may poke out of the eye. [`bound_pupil_to_eye`] pulls it back
//! along the line from the eye center, so the pupil keeps looking the same
//! way and just stops at the rim.

use core::f32::consts::FRAC_PI_2;

use crate::error::Error;
use crate::geometry::{distance, round};
use crate::shapes::Eye;

/// Shrink and recenter `pupil` so it lies fully inside `eye`.
///
/// The pupil radius is capped at the eye radius. If the far edge of the pupil
/// is past the rim, the pupil is moved back toward the eye center by the
/// overshoot, with each axis rounded to a whole pixel. When rounding leaves it
/// poking out, it is nudged a pixel at a time along its longer axis until it
/// fits.
///
/// When the pupil is straight above or below the eye center the correction is
/// always applied upward, which is right for a pupil hanging below the eye
/// and pushes a pupil above the eye further out. That case is left as is.
///
/// `eye` is never modified. Running this on its own result is a no-op.
pub fn bound_pupil_to_eye(
    eye: &Eye,
    pupil: &mut Eye,
) -> Result<(), Error> {
    if eye.radius < 0 || pupil.radius < 0 {
        return Err(Error::InvalidGeometry("negative radius"));
    }

    pupil.radius = pupil.radius.min(eye.radius);
    let reach = eye.radius - pupil.radius;

    let dx = pupil.center.x - eye.center.x;
    let dy = pupil.center.y - eye.center.y;
    if fits(dx, dy, reach) {
        return Ok(());
    }

    let overage = distance(eye.center, pupil.center) + pupil.radius as f32 - eye.radius as f32;
    let mut angle = FRAC_PI_2;

    if dx > 0 {
        angle = libm::atanf(dy as f32 / dx as f32);
        pupil.center.x -= round(libm::cosf(angle) * overage);
    } else if dx < 0 {
        angle = libm::atanf(dy as f32 / -dx as f32);
        pupil.center.x += round(libm::cosf(angle) * overage);
    }
    pupil.center.y -= round(libm::sinf(angle) * overage);

    if dx == 0 && dy < 0 {
        return Ok(());
    }

    loop {
        let dx = pupil.center.x - eye.center.x;
        let dy = pupil.center.y - eye.center.y;
        if fits(dx, dy, reach) {
            return Ok(());
        }
        if dx.abs() >= dy.abs() {
            pupil.center.x -= dx.signum();
        } else {
            pupil.center.y -= dy.signum();
        }
    }
}

/// Whether an offset of `(dx, dy)` is at most `reach` from the center.
#[inline]
fn fits(
    dx: i32,
    dy: i32,
    reach: i32,
) -> bool {
    let (dx, dy, reach) = (i64::from(dx), i64::from(dy), i64::from(reach));
    dx * dx + dy * dy <= reach * reach
}

// =============================================================================
// Unit Tests
// =============================================================================
