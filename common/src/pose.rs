//! Emotion → feature pose.
//!
//! The face's emotion is its state; [`Pose::for_emotion`] is the transition
//! function that says what each feature should do for that state. A `None`
//! field means "leave that feature as it is", which is how data-driven
//! modules keep the pupil and eyebrow positions they computed themselves.

use embedded_graphics::prelude::Point;

use crate::emotion::Emotion;

/// Brow splay for a mischievous face.
const MISCHIEF_BROW: i32 = 30;
/// Horizontal offset of the right pupil on a confused face.
const CONFUSED_GLANCE: i32 = 20;
/// Left brow tilt on a confused face.
const CONFUSED_BROW: i32 = -15;
/// Degrees of brow tilt per step of negative emotion code.
const BROW_PER_CODE: i32 = 10;

/// What one emotion does to the face's features.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Pose {
    /// Expression handed to the mouth.
    pub mouth: Option<Emotion>,
    /// Left and right eyebrow angles in degrees (before clamping).
    pub eyebrows: Option<[i32; 2]>,
    /// Left and right pupil centers, relative to their eye centers.
    pub pupils: Option<[Point; 2]>,
}

impl Pose {
    /// Pose that changes nothing. Used while the face has no emotion.
    pub const IDLE: Self = Self {
        mouth: None,
        eyebrows: None,
        pupils: None,
    };

    /// Derive the pose for `emotion`. `eye_radii` are the left and right eye
    /// radii, which set how far a sideways glance reaches.
    pub const fn for_emotion(
        emotion: Option<Emotion>,
        eye_radii: [i32; 2],
    ) -> Self {
        let Some(emotion) = emotion else {
            return Self::IDLE;
        };

        match emotion {
            Emotion::Mischievous => Self {
                mouth: Some(Emotion::HAPPY),
                eyebrows: Some([MISCHIEF_BROW, -MISCHIEF_BROW]),
                pupils: Some([
                    Point::new(eye_radii[0], eye_radii[0]),
                    Point::new(-eye_radii[1], eye_radii[1]),
                ]),
            },
            Emotion::Confused => Self {
                mouth: Some(Emotion::SAD_1),
                eyebrows: Some([CONFUSED_BROW, 0]),
                pupils: Some([Point::zero(), Point::new(CONFUSED_GLANCE, 0)]),
            },
            Emotion::Neutral | Emotion::Happy(_) | Emotion::Angry => Self {
                mouth: Some(emotion),
                eyebrows: None,
                pupils: None,
            },
            Emotion::Sad(_) | Emotion::Scared => {
                let tilt = BROW_PER_CODE * emotion.code() as i32;
                Self {
                    mouth: Some(emotion),
                    eyebrows: Some([tilt, -tilt]),
                    pupils: None,
                }
            }
        }
    }
}
