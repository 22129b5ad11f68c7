//! Error types for the face engine and its data collaborators.

use core::fmt;

/// Errors raised by geometry operations and shape emission.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A value fell outside the inclusive `[min, max]` range it was scaled into.
    OutOfRange {
        /// The rejected value.
        value: f32,
        /// Lower bound (inclusive).
        min: f32,
        /// Upper bound (inclusive).
        max: f32,
    },
    /// A shape was given an impossible size (negative radius, width, etc).
    InvalidGeometry(&'static str),
    /// An integer code that maps to no [`Emotion`](crate::Emotion).
    UnknownEmotion(i8),
    /// The shape sink has no room for another record.
    SinkFull,
}

impl fmt::Display for Error {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} outside [{min}, {max}]")
            }
            Self::InvalidGeometry(what) => write!(f, "invalid geometry: {what}"),
            Self::UnknownEmotion(code) => write!(f, "unknown emotion code {code}"),
            Self::SinkFull => f.write_str("shape sink full"),
        }
    }
}

/// Failures reported by external data collaborators (weather, flight feeds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The source could not be reached or returned nothing.
    Unavailable,
    /// A field was missing or could not be parsed. Carries the field name.
    Malformed(&'static str),
}

impl fmt::Display for SourceError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("source unavailable"),
            Self::Malformed(field) => write!(f, "malformed field '{field}'"),
        }
    }
}
