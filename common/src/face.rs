//! The composed Chernoff face.
//!
//! A face is a circle of `diameter` inside a `diameter x diameter` square
//! whose origin is the square's top-left corner. Every feature is laid out
//! from the diameter alone:
//!
//! ```text
//!        brow      brow          brow y = eye y - eye r - pupil r
//!       ( eye )   ( eye )        eyes 5 eye radii apart, 2.5 above center
//!            [nose]              nose at center, 3x as tall as wide
//!        \_________/             mouth anchored at center
//! ```
//!
//! Owners mutate `emotion`, `color` and individual features between frames.
//! [`Face::update`] re-derives the pose and re-applies the pupil constraint;
//! [`Face::draw`] does that and then emits the features in a fixed order.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;

use crate::colors::WHITE;
use crate::config::{EYE_RADIUS_RATIO, EYE_SPACING, NOSE_ASPECT, NOSE_WIDTH_RATIO, PUPIL_DIVISOR};
use crate::emotion::Emotion;
use crate::error::Error;
use crate::geometry::round;
use crate::pose::Pose;
use crate::pupil::bound_pupil_to_eye;
use crate::shapes::{Eye, EyeBrow, Mouth, Nose};
use crate::sink::ShapeSink;

/// Index of the left feature in each pair.
pub const LEFT: usize = 0;
/// Index of the right feature in each pair.
pub const RIGHT: usize = 1;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Face {
    pub diameter: i32,
    pub radius: i32,
    pub center: Point,
    /// `None` leaves the pose to whoever last moved the features.
    pub emotion: Option<Emotion>,
    /// `None` is treated as white by [`reset_color`](Self::reset_color).
    pub color: Option<Rgb888>,
    pub eyes: [Eye; 2],
    pub pupils: [Eye; 2],
    pub eyebrows: [EyeBrow; 2],
    pub nose: Nose,
    pub mouth: Mouth,
}

impl Face {
    /// Lay out a face for the given diameter.
    pub fn new(diameter: i32) -> Result<Self, Error> {
        if diameter <= 0 {
            return Err(Error::InvalidGeometry("face diameter must be positive"));
        }

        let radius = diameter / 2;
        let center = Point::new(radius, radius);

        let eye_radius = round(radius as f32 * EYE_RADIUS_RATIO);
        let pupil_radius = eye_radius / PUPIL_DIVISOR;
        let eye_space = eye_radius * EYE_SPACING;
        let eye_height = eye_space / 2;
        let half_eye_space = eye_space / 2;

        let eye_y = center.y - eye_height;
        let left = Point::new(center.x - half_eye_space, eye_y);
        let right = Point::new(center.x + half_eye_space, eye_y);

        let brow_y = eye_y - eye_radius - pupil_radius;
        let brow_width = eye_radius * 2;

        let nose_width = round(pupil_radius as f32 * NOSE_WIDTH_RATIO);

        Ok(Self {
            diameter,
            radius,
            center,
            emotion: None,
            color: Some(WHITE),
            eyes: [Eye::new(left, eye_radius), Eye::new(right, eye_radius)],
            pupils: [Eye::new(left, pupil_radius), Eye::new(right, pupil_radius)],
            eyebrows: [
                EyeBrow::new(Point::new(left.x, brow_y), brow_width),
                EyeBrow::new(Point::new(right.x, brow_y), brow_width),
            ],
            nose: Nose::new(center, nose_width, nose_width * NOSE_ASPECT),
            mouth: Mouth::new(center),
        })
    }

    /// Whether the current emotion poses brows/pupils itself.
    #[inline]
    pub fn is_complex_emotion(&self) -> bool { self.emotion.is_some_and(Emotion::is_complex) }

    /// Put both pupils back in the middle of their eyes.
    pub fn reset_pupils(&mut self) {
        for (pupil, eye) in self.pupils.iter_mut().zip(&self.eyes) {
            pupil.center_on(eye);
        }
    }

    /// Level both eyebrows.
    pub fn reset_eyebrows(&mut self) {
        for brow in &mut self.eyebrows {
            brow.angle = 0;
        }
    }

    /// Paint every feature in the face color, defaulting a missing color to white.
    pub fn reset_color(&mut self) {
        let color = *self.color.get_or_insert(WHITE);
        for i in [LEFT, RIGHT] {
            self.eyes[i].color = color;
            self.pupils[i].color = color;
            self.eyebrows[i].color = color;
        }
        self.nose.color = color;
        self.mouth.color = color;
    }

    /// The pose the current emotion asks for.
    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::for_emotion(self.emotion, [self.eyes[LEFT].radius, self.eyes[RIGHT].radius])
    }

    /// Apply the emotion's pose, then clamp brows and bound pupils.
    ///
    /// With no emotion set only the pupils are bounded. Brow angles stay as
    /// the module left them and are clamped when drawn.
    pub fn update(&mut self) -> Result<(), Error> {
        let pose = self.pose();

        if let Some(mouth) = pose.mouth {
            self.mouth.emotion = mouth;
        }
        if let Some(angles) = pose.eyebrows {
            for (brow, angle) in self.eyebrows.iter_mut().zip(angles) {
                brow.angle = angle;
            }
        }
        if let Some(offsets) = pose.pupils {
            for ((pupil, eye), offset) in self.pupils.iter_mut().zip(&self.eyes).zip(offsets) {
                pupil.center = eye.center + offset;
            }
        }

        if self.emotion.is_some() {
            for brow in &mut self.eyebrows {
                brow.update();
            }
        }
        self.bound_pupils()
    }

    /// Re-apply the pupil constraint to both eyes.
    pub fn bound_pupils(&mut self) -> Result<(), Error> {
        for (eye, pupil) in self.eyes.iter().zip(self.pupils.iter_mut()) {
            bound_pupil_to_eye(eye, pupil)?;
        }
        Ok(())
    }

    /// Update, then emit eye, pupil and brow for each side, the nose, and the mouth.
    pub fn draw<S>(
        &mut self,
        sink: &mut S,
    ) -> Result<(), Error>
    where
        S: ShapeSink + ?Sized,
    {
        self.update()?;
        for i in [LEFT, RIGHT] {
            sink.emit(self.eyes[i].shape()?)?;
            sink.emit(self.pupils[i].shape()?)?;
            sink.emit(self.eyebrows[i].shape()?)?;
        }
        sink.emit(self.nose.shape()?)?;
        self.mouth.draw(sink)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
