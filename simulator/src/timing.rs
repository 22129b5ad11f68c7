//! Timing for the simulator.
//!
//! These use `std::time`, which is not available in `no_std`, so they live
//! here rather than in the common crate.

use std::time::{Duration, Instant};

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Whole seconds since the simulator started. This is the `now` every
/// module and the carousel see.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self { Self { start: Instant::now() } }

    pub fn now(&self) -> u32 { u32::try_from(self.start.elapsed().as_secs()).unwrap_or(u32::MAX) }

    /// Fractional seconds, for animating demo data.
    pub fn seconds(&self) -> f32 { self.start.elapsed().as_secs_f32() }
}

impl Default for Clock {
    fn default() -> Self { Self::new() }
}
