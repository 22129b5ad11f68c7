//! Where shape records go.
//!
//! The face never draws anything itself. It appends [`Shape`] records, in
//! draw order, to whatever [`ShapeSink`] the caller hands it:
//!
//! - [`ShapeList`]: fixed-capacity list, for caching a frame or testing
//! - [`TextSink`]: one description line per shape, for logs and headless runs
//! - [`Canvas`](crate::render::Canvas): rasterizes onto an `embedded-graphics` target

use core::fmt;
use core::ops::Deref;

use heapless::Vec;

use crate::error::Error;
use crate::shapes::Shape;

/// Append-only consumer of shape records.
pub trait ShapeSink {
    /// Append one record. Fails with [`Error::SinkFull`] when out of room.
    fn emit(
        &mut self,
        shape: Shape,
    ) -> Result<(), Error>;
}

impl<S: ShapeSink + ?Sized> ShapeSink for &mut S {
    #[inline]
    fn emit(
        &mut self,
        shape: Shape,
    ) -> Result<(), Error> {
        (**self).emit(shape)
    }
}

// =============================================================================
// Fixed-capacity list
// =============================================================================

/// Ordered list of up to `N` shapes.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ShapeList<const N: usize> {
    shapes: Vec<Shape, N>,
}

impl<const N: usize> ShapeList<N> {
    pub const fn new() -> Self { Self { shapes: Vec::new() } }

    /// Drop every record, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) { self.shapes.clear(); }

    /// Replay every record into another sink.
    pub fn replay<S: ShapeSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<(), Error> {
        self.shapes.iter().try_for_each(|shape| sink.emit(*shape))
    }
}

impl<const N: usize> Deref for ShapeList<N> {
    type Target = [Shape];

    fn deref(&self) -> &[Shape] { &self.shapes }
}

impl<const N: usize> ShapeSink for ShapeList<N> {
    fn emit(
        &mut self,
        shape: Shape,
    ) -> Result<(), Error> {
        self.shapes.push(shape).map_err(|_| Error::SinkFull)
    }
}

// =============================================================================
// Text description
// =============================================================================

/// Writes one line per shape into any `fmt::Write`.
pub struct TextSink<W: fmt::Write> {
    out: W,
    count: usize,
}

impl<W: fmt::Write> TextSink<W> {
    pub const fn new(out: W) -> Self { Self { out, count: 0 } }

    /// Number of shapes written so far.
    #[inline]
    pub const fn count(&self) -> usize { self.count }

    pub fn into_inner(self) -> W { self.out }
}

impl<W: fmt::Write> ShapeSink for TextSink<W> {
    fn emit(
        &mut self,
        shape: Shape,
    ) -> Result<(), Error> {
        writeln!(self.out, "{shape}").map_err(|_| Error::SinkFull)?;
        self.count += 1;
        Ok(())
    }
}
