//! Demo module that steps through every emotion.

use embedded_graphics::pixelcolor::Rgb888;

use super::{Module, Ttl};
use crate::colors::{BLUE, CYAN, GREEN, MAGENTA, RED, WHITE, YELLOW};
use crate::config::ANIMATION_TTL;
use crate::emotion::Emotion;
use crate::error::Error;
use crate::face::Face;
use crate::log::DebugLog;
use crate::sink::ShapeSink;

/// Emotions in display order.
pub const EMOTIONS: [Emotion; 11] = [
    Emotion::Angry,
    Emotion::HAPPY_3,
    Emotion::HAPPY_2,
    Emotion::HAPPY_1,
    Emotion::Neutral,
    Emotion::SAD_1,
    Emotion::SAD_2,
    Emotion::SAD_3,
    Emotion::Scared,
    Emotion::Mischievous,
    Emotion::Confused,
];

/// Face colors a tap cycles through.
pub const COLORS: [Rgb888; 7] = [WHITE, YELLOW, MAGENTA, CYAN, RED, GREEN, BLUE];

/// Shows one emotion per frame. Taps change the color.
pub struct FaceAnimation {
    face: Face,
    emotion_index: usize,
    color_index: usize,
}

impl FaceAnimation {
    pub fn new(face_size: i32) -> Result<Self, Error> {
        Ok(Self {
            face: Face::new(face_size)?,
            emotion_index: 0,
            color_index: 0,
        })
    }

    /// Emotion the next frame will show.
    #[inline]
    pub const fn next_emotion(&self) -> Emotion { EMOTIONS[self.emotion_index] }

    #[inline]
    pub const fn color(&self) -> Rgb888 { COLORS[self.color_index] }

    #[inline]
    pub const fn face(&self) -> &Face { &self.face }
}

impl Module for FaceAnimation {
    fn name(&self) -> &'static str { "faces" }

    fn draw(
        &mut self,
        _now: u32,
        sink: &mut dyn ShapeSink,
        _log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        self.face.emotion = Some(self.next_emotion());
        self.face.color = Some(self.color());
        self.face.reset_color();

        // Complex emotions keep whatever the last pose left behind.
        if !self.face.is_complex_emotion() {
            self.face.reset_pupils();
            self.face.reset_eyebrows();
        }

        self.face.draw(sink)?;

        self.emotion_index = (self.emotion_index + 1) % EMOTIONS.len();
        Ok(ANIMATION_TTL)
    }

    fn tap(
        &mut self,
        _x: i32,
        _y: i32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        self.color_index = (self.color_index + 1) % COLORS.len();
        self.draw(0, sink, log)
    }
}
