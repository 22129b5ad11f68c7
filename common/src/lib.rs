//! Chernoff face engine for a round 480x480 display.
//!
//! A [`Face`] is laid out from its diameter alone. The caller sets an
//! [`Emotion`] and a color, and [`Face::draw`] emits [`Shape`] records into
//! any [`ShapeSink`]. Modules turn data (weather readings, nearby aircraft)
//! into faces or radar dots, and the [`Carousel`] decides which module is on
//! screen.
//!
//! - [`geometry`]: scaling, bucketing, distance and rotation helpers
//! - [`shapes`]: eyes, eyebrows, nose, mouth, and the records they emit
//! - [`pupil`]: keeps pupils inside their eyes
//! - [`emotion`], [`pose`]: emotions and what they do to each feature
//! - [`face`]: the composed face
//! - [`sink`], [`render`]: where shape records go
//! - [`modules`]: face animation, weather, and OpenSky radar
//! - [`carousel`]: touch zones, debounce and refresh scheduling
//! - [`config`], [`colors`], [`error`], [`log`]: shared plumbing
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and does not allocate. Fixed-capacity containers
//! come from `heapless`, and callers pass the time in.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod log;

pub mod carousel;
pub mod colors;
pub mod config;
pub mod emotion;
pub mod error;
pub mod face;
pub mod geometry;
pub mod modules;
pub mod pose;
pub mod pupil;
pub mod render;
pub mod shapes;
pub mod sink;

// Re-export commonly used items
pub use carousel::{Carousel, TouchAction, TouchZone};
pub use emotion::{Emotion, Intensity};
pub use error::{Error, SourceError};
pub use face::Face;
pub use log::DebugLog;
pub use modules::{Module, Ttl};
pub use render::Canvas;
pub use shapes::Shape;
pub use sink::{ShapeList, ShapeSink, TextSink};
