//! Module navigation and scheduling.
//!
//! The screen is split into three touch zones. The outer quarters flip
//! between modules and the middle half is passed to the current module as a
//! tap. The panel is mounted upside down, so the left quarter as the driver
//! reports it is the right edge as the user sees it:
//!
//! ```text
//! +--------+----------------+--------+
//! |  Next  |     Center     |  Prev  |
//! +--------+----------------+--------+
//! 0     size/4          3*size/4   size
//! ```
//!
//! The carousel owns no clock. Every call takes `now` in seconds.

use core::num::NonZeroUsize;
use core::ops::DerefMut;

use embedded_graphics::prelude::Point;

use crate::config::{MODULE_ERROR_TTL, TOUCH_TTL};
use crate::error::Error;
use crate::log::DebugLog;
use crate::log_error;
use crate::modules::{Module, Ttl};
use crate::sink::ShapeList;

/// Where on the screen a touch landed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchZone {
    Next,
    Previous,
    Center,
}

/// Classify a touch x coordinate on a screen `size` pixels wide.
pub const fn touch_zone(
    x: i32,
    size: i32,
) -> TouchZone {
    let left = size / 4;
    let right = left * 3;
    if x < left {
        TouchZone::Next
    } else if x > right {
        TouchZone::Previous
    } else {
        TouchZone::Center
    }
}

/// What an accepted touch asks for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchAction {
    /// Show the module at this index.
    Switch(usize),
    /// Forward a tap to the current module.
    Tap { x: i32, y: i32 },
}

/// Current module, touch debounce and refresh deadline.
#[derive(Clone, Debug)]
pub struct Carousel {
    index: usize,
    count: NonZeroUsize,
    size: i32,
    next_touch: Option<u32>,
    next_refresh: Option<u32>,
}

impl Carousel {
    /// Carousel over `count` modules on a screen `size` pixels wide.
    pub const fn new(
        count: NonZeroUsize,
        size: i32,
    ) -> Self {
        Self {
            index: 0,
            count,
            size,
            next_touch: None,
            next_refresh: None,
        }
    }

    #[inline]
    pub const fn current(&self) -> usize { self.index }

    #[inline]
    pub const fn count(&self) -> usize { self.count.get() }

    /// Handle a touch at `now`. Touches within `TOUCH_TTL` of the last
    /// accepted one are ignored.
    pub fn touch(
        &mut self,
        x: i32,
        y: i32,
        now: u32,
    ) -> Option<TouchAction> {
        if self.next_touch.is_some_and(|t| now <= t) {
            return None;
        }
        self.next_touch = Some(now.saturating_add(TOUCH_TTL));

        let count = self.count.get();
        let action = match touch_zone(x, self.size) {
            TouchZone::Next => {
                self.index = (self.index + 1) % count;
                TouchAction::Switch(self.index)
            }
            TouchZone::Previous => {
                self.index = self.index.checked_sub(1).unwrap_or(count - 1);
                TouchAction::Switch(self.index)
            }
            TouchZone::Center => TouchAction::Tap { x, y },
        };
        Some(action)
    }

    /// Whether the current frame has expired.
    #[inline]
    pub fn refresh_due(
        &self,
        now: u32,
    ) -> bool {
        self.next_refresh.is_none_or(|t| now > t)
    }

    /// Keep the frame drawn at `now` for `ttl` seconds.
    #[inline]
    pub fn schedule(
        &mut self,
        now: u32,
        ttl: Ttl,
    ) {
        self.next_refresh = Some(now.saturating_add(ttl));
    }

    /// Run one step of the main loop.
    ///
    /// An accepted touch wins over a pending refresh. When a module is
    /// drawn, `frame` is cleared and refilled and its TTL is returned;
    /// otherwise `frame` is left alone and `None` comes back. A failing
    /// module is logged and retried after `MODULE_ERROR_TTL`.
    pub fn poll<M, D, const N: usize>(
        &mut self,
        modules: &mut [M],
        touch: Option<Point>,
        now: u32,
        frame: &mut ShapeList<N>,
        log: &mut DebugLog,
    ) -> Result<Option<Ttl>, Error>
    where
        M: DerefMut<Target = D>,
        D: Module + ?Sized,
    {
        let action = touch.and_then(|p| self.touch(p.x, p.y, now));
        if action.is_none() && !self.refresh_due(now) {
            return Ok(None);
        }

        let Some(module) = modules.get_mut(self.index) else {
            return Ok(None);
        };

        frame.clear();
        let drawn = match action {
            Some(TouchAction::Tap { x, y }) => module.tap(x, y, frame, log),
            Some(TouchAction::Switch(_)) | None => module.draw(now, frame, log),
        };

        match drawn {
            Ok(ttl) => {
                self.schedule(now, ttl);
                Ok(Some(ttl))
            }
            Err(err) => {
                log_error!(log, "{}: {}", module.name(), err);
                self.schedule(now, MODULE_ERROR_TTL);
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::log::LogLevel;
    use crate::shapes::Shape;
    use crate::sink::ShapeSink;

    const SIZE: i32 = 480;

    fn carousel(count: usize) -> Carousel { Carousel::new(NonZeroUsize::new(count).unwrap(), SIZE) }

    /// Emits one line whose x is its id, and records calls.
    struct Scripted {
        id: i32,
        ttl: Ttl,
        draws: u32,
        taps: u32,
        fail: bool,
    }

    impl Scripted {
        fn new(id: i32) -> Self {
            Self {
                id,
                ttl: 5,
                draws: 0,
                taps: 0,
                fail: false,
            }
        }

        fn mark(
            &self,
            sink: &mut dyn ShapeSink,
        ) -> Result<(), Error> {
            sink.emit(Shape::Line {
                start: Point::new(self.id, 0),
                end: Point::new(self.id, 1),
                stroke: 1,
                color: WHITE,
            })
        }
    }

    impl Module for Scripted {
        fn name(&self) -> &'static str { "scripted" }

        fn draw(
            &mut self,
            _now: u32,
            sink: &mut dyn ShapeSink,
            _log: &mut DebugLog,
        ) -> Result<Ttl, Error> {
            self.draws += 1;
            if self.fail {
                return Err(Error::SinkFull);
            }
            self.mark(sink)?;
            Ok(self.ttl)
        }

        fn tap(
            &mut self,
            _x: i32,
            _y: i32,
            sink: &mut dyn ShapeSink,
            _log: &mut DebugLog,
        ) -> Result<Ttl, Error> {
            self.taps += 1;
            self.mark(sink)?;
            Ok(1)
        }
    }

    fn drawn_id(frame: &ShapeList<4>) -> i32 {
        match frame[0] {
            Shape::Line { start, .. } => start.x,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_touch_zones() {
        assert_eq!(touch_zone(0, SIZE), TouchZone::Next);
        assert_eq!(touch_zone(119, SIZE), TouchZone::Next);
        assert_eq!(touch_zone(120, SIZE), TouchZone::Center);
        assert_eq!(touch_zone(240, SIZE), TouchZone::Center);
        assert_eq!(touch_zone(360, SIZE), TouchZone::Center);
        assert_eq!(touch_zone(361, SIZE), TouchZone::Previous);
        assert_eq!(touch_zone(479, SIZE), TouchZone::Previous);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut carousel = carousel(3);
        assert_eq!(carousel.touch(400, 0, 10), Some(TouchAction::Switch(2)));
        assert_eq!(carousel.touch(10, 0, 20), Some(TouchAction::Switch(0)));
        assert_eq!(carousel.touch(10, 0, 30), Some(TouchAction::Switch(1)));
        assert_eq!(carousel.current(), 1);
    }

    #[test]
    fn test_center_is_tap() {
        let mut carousel = carousel(2);
        assert_eq!(carousel.touch(240, 77, 0), Some(TouchAction::Tap { x: 240, y: 77 }));
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn test_touch_debounce() {
        let mut carousel = carousel(2);
        assert!(carousel.touch(10, 0, 100).is_some());
        assert_eq!(carousel.touch(10, 0, 100), None);
        assert_eq!(carousel.touch(10, 0, 100 + TOUCH_TTL), None);
        assert!(carousel.touch(10, 0, 101 + TOUCH_TTL).is_some());
    }

    #[test]
    fn test_single_module_wraps_to_itself() {
        let mut carousel = carousel(1);
        assert_eq!(carousel.touch(10, 0, 0), Some(TouchAction::Switch(0)));
        assert_eq!(carousel.touch(470, 0, 5), Some(TouchAction::Switch(0)));
    }

    #[test]
    fn test_refresh_schedule() {
        let mut carousel = carousel(1);
        assert!(carousel.refresh_due(0));
        carousel.schedule(100, 15);
        assert!(!carousel.refresh_due(115));
        assert!(carousel.refresh_due(116));
    }

    #[test]
    fn test_poll_draws_then_waits() {
        let mut modules = vec![Scripted::new(1), Scripted::new(2)];
        let mut refs: Vec<&mut Scripted> = modules.iter_mut().collect();
        let mut carousel = carousel(2);
        let mut frame: ShapeList<4> = ShapeList::new();
        let mut log = DebugLog::new();

        assert_eq!(carousel.poll(&mut refs, None, 0, &mut frame, &mut log), Ok(Some(5)));
        assert_eq!(drawn_id(&frame), 1);
        assert_eq!(carousel.poll(&mut refs, None, 5, &mut frame, &mut log), Ok(None));
        assert_eq!(carousel.poll(&mut refs, None, 6, &mut frame, &mut log), Ok(Some(5)));
        assert_eq!(frame.len(), 1);
        assert_eq!(modules[0].draws, 2);
        assert_eq!(modules[1].draws, 0);
    }

    #[test]
    fn test_poll_touch_switches_and_taps() {
        let mut modules: Vec<Box<dyn Module>> = vec![Box::new(Scripted::new(1)), Box::new(Scripted::new(2))];
        let mut carousel = carousel(2);
        let mut frame: ShapeList<4> = ShapeList::new();
        let mut log = DebugLog::new();

        carousel.poll(&mut modules, None, 0, &mut frame, &mut log).unwrap();
        assert_eq!(
            carousel.poll(&mut modules, Some(Point::new(5, 5)), 1, &mut frame, &mut log),
            Ok(Some(5))
        );
        assert_eq!(carousel.current(), 1);
        assert_eq!(drawn_id(&frame), 2);

        // Center touch after the debounce window taps module 2.
        assert_eq!(
            carousel.poll(&mut modules, Some(Point::new(240, 5)), 3, &mut frame, &mut log),
            Ok(Some(1))
        );
        assert_eq!(drawn_id(&frame), 2);
    }

    #[test]
    fn test_poll_failure_logged_and_delayed() {
        let mut scripted = Scripted::new(1);
        scripted.fail = true;
        let mut modules = [&mut scripted];
        let mut carousel = carousel(1);
        let mut frame: ShapeList<4> = ShapeList::new();
        let mut log = DebugLog::new();

        assert_eq!(carousel.poll(&mut modules, None, 0, &mut frame, &mut log), Err(Error::SinkFull));
        let entry = log.last().unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message.as_str(), "scripted: shape sink full");
        assert!(!carousel.refresh_due(MODULE_ERROR_TTL));
        assert!(carousel.refresh_due(MODULE_ERROR_TTL + 1));
    }
}
