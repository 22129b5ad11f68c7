//! Emotions a face can show.
//!
//! Emotions carry a stable integer code (used by data mappings that do
//! arithmetic on intensity, and by anything that stores or transmits an
//! emotion). The sign of a "simple" code picks the smile/frown family and
//! its magnitude the intensity:
//!
//! | Code | Emotion |
//! |------|---------|
//! | 3, 2, 1 | `Happy(High)`, `Happy(Medium)`, `Happy(Low)` |
//! | 0 | `Neutral` |
//! | -1, -2, -3 | `Sad(Low)`, `Sad(Medium)`, `Sad(High)` |
//! | 10 / -10 | `Angry` / `Scared` |
//! | 11 / -11 | `Mischievous` / `Confused` |

use core::fmt;

use crate::error::Error;

/// Strength of a happy or sad expression.
#[derive(Clone, Copy, PartialEq, Eq, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Intensity {
    /// Slight curve, large radius.
    Low = 1,
    /// Medium curve.
    Medium = 2,
    /// Full smile or frown.
    High = 3,
}

impl Intensity {
    /// All intensities from weakest to strongest.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Intensity tier 1..=3.
    #[inline]
    pub const fn level(self) -> i8 { self as i8 }

    /// Intensity for a tier, if it is one of 1..=3.
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

/// Whether an emotion needs its own eyebrow/pupil pose.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    /// Only the mouth changes; eyes and brows sit at rest.
    Simple,
    /// Eyebrows and/or pupils are posed too.
    Complex,
}

/// The expression shown by a face.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Emotion {
    /// Straight mouth.
    #[default]
    Neutral,
    /// Smile.
    Happy(Intensity),
    /// Frown.
    Sad(Intensity),
    /// Teeth showing.
    Angry,
    /// Teeth showing, raised brows.
    Scared,
    /// Big smile, splayed brows, sideways glance.
    Mischievous,
    /// Slight frown, mismatched eyes and brows.
    Confused,
}

impl Emotion {
    /// Alias for the strongest smile.
    pub const HAPPY: Self = Self::Happy(Intensity::High);
    /// Alias for the strongest frown.
    pub const SAD: Self = Self::Sad(Intensity::High);

    pub const HAPPY_3: Self = Self::Happy(Intensity::High);
    pub const HAPPY_2: Self = Self::Happy(Intensity::Medium);
    pub const HAPPY_1: Self = Self::Happy(Intensity::Low);
    pub const SAD_1: Self = Self::Sad(Intensity::Low);
    pub const SAD_2: Self = Self::Sad(Intensity::Medium);
    pub const SAD_3: Self = Self::Sad(Intensity::High);

    /// Signed integer code.
    pub const fn code(self) -> i8 {
        match self {
            Self::Neutral => 0,
            Self::Happy(intensity) => intensity.level(),
            Self::Sad(intensity) => -intensity.level(),
            Self::Angry => 10,
            Self::Scared => -10,
            Self::Mischievous => 11,
            Self::Confused => -11,
        }
    }

    /// Emotion for a signed integer code.
    pub const fn from_code(code: i8) -> Result<Self, Error> {
        let emotion = match code {
            0 => Self::Neutral,
            1..=3 => match Intensity::from_level(code as u8) {
                Some(intensity) => Self::Happy(intensity),
                None => return Err(Error::UnknownEmotion(code)),
            },
            -3..=-1 => match Intensity::from_level(code.unsigned_abs()) {
                Some(intensity) => Self::Sad(intensity),
                None => return Err(Error::UnknownEmotion(code)),
            },
            10 => Self::Angry,
            -10 => Self::Scared,
            11 => Self::Mischievous,
            -11 => Self::Confused,
            _ => return Err(Error::UnknownEmotion(code)),
        };
        Ok(emotion)
    }

    /// Simple emotions only move the mouth; complex ones pose brows/pupils.
    pub const fn category(self) -> Category {
        match self {
            Self::Neutral | Self::Happy(_) | Self::Angry => Category::Simple,
            Self::Sad(_) | Self::Scared | Self::Mischievous | Self::Confused => Category::Complex,
        }
    }

    #[inline]
    pub const fn is_complex(self) -> bool { matches!(self.category(), Category::Complex) }

    /// Negative codes: the frown family plus Scared and Confused.
    #[inline]
    pub const fn is_negative(self) -> bool { self.code() < 0 }

    /// Short upper-case label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::Happy(Intensity::Low) => "HAPPY_1",
            Self::Happy(Intensity::Medium) => "HAPPY_2",
            Self::Happy(Intensity::High) => "HAPPY_3",
            Self::Sad(Intensity::Low) => "SAD_1",
            Self::Sad(Intensity::Medium) => "SAD_2",
            Self::Sad(Intensity::High) => "SAD_3",
            Self::Angry => "ANGRY",
            Self::Scared => "SCARED",
            Self::Mischievous => "MISCHIEVOUS",
            Self::Confused => "CONFUSED",
        }
    }
}

impl TryFrom<i8> for Emotion {
    type Error = Error;

    fn try_from(code: i8) -> Result<Self, Self::Error> { Self::from_code(code) }
}

impl From<Emotion> for i8 {
    fn from(emotion: Emotion) -> Self { emotion.code() }
}

impl fmt::Display for Emotion {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
