//! On-screen debug log.
//!
//! Modules report what they did (fetch failures, skipped aircraft) into a
//! small ring buffer the display can show as an overlay. Entries are
//! fixed-size and the buffer drops the oldest entry when full, so logging
//! never allocates and never fails.
//!
//! # Usage
//!
//! ```
//! use guy_common::log::DebugLog;
//! use guy_common::{log_info, log_warn};
//!
//! let mut log = DebugLog::new();
//! log_info!(log, "fetched {} aircraft", 12);
//! log_warn!(log, "skipped {}", 3);
//! assert_eq!(log.len(), 2);
//! ```
//!
//! With the `defmt` feature every entry is also sent to `defmt` at the
//! matching level.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use heapless::{Deque, String};

use crate::colors::{GREEN, RED, WHITE, YELLOW, rgb};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 12;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 48;

const GRAY: Rgb888 = rgb(0x808080);

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Overlay color for this level.
    pub const fn color(self) -> Rgb888 {
        match self {
            Self::Trace | Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Message, truncated to `LOG_MSG_LEN - 1` characters.
    pub message: String<LOG_MSG_LEN>,
    /// Caller clock, in seconds, when the entry was pushed.
    pub timestamp: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars().take(LOG_MSG_LEN - 1) {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp,
        }
    }

    /// Color to draw this entry in.
    #[inline]
    pub const fn color(&self) -> Rgb888 {
        match self.level {
            LogLevel::Info => WHITE,
            level => level.color(),
        }
    }
}

/// Ring buffer of the last `LOG_ENTRIES` entries.
#[derive(Clone, Debug, Default)]
pub struct DebugLog {
    entries: Deque<LogEntry, LOG_ENTRIES>,
    now: u32,
    dropped: u32,
}

impl DebugLog {
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
            now: 0,
            dropped: 0,
        }
    }

    /// Set the timestamp stamped on subsequent entries.
    #[inline]
    pub fn set_time(
        &mut self,
        now: u32,
    ) {
        self.now = now;
    }

    /// Push a message. If the buffer is full the oldest entry is dropped.
    pub fn push(
        &mut self,
        level: LogLevel,
        message: &str,
    ) {
        #[cfg(feature = "defmt")]
        match level {
            LogLevel::Trace => defmt::trace!("{=str}", message),
            LogLevel::Debug => defmt::debug!("{=str}", message),
            LogLevel::Info => defmt::info!("{=str}", message),
            LogLevel::Warn => defmt::warn!("{=str}", message),
            LogLevel::Error => defmt::error!("{=str}", message),
        }

        if self.entries.is_full() {
            self.entries.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail: a slot was freed above.
        let _ = self.entries.push_back(LogEntry::new(level, message, self.now));
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// The most recent entry.
    #[inline]
    pub fn last(&self) -> Option<&LogEntry> { self.entries.back() }

    /// Number of entries pushed out by newer ones.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.dropped }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn clear(&mut self) { self.entries.clear(); }
}

/// Formatting buffer for one message. Output past capacity is cut off at a
/// character boundary instead of failing the whole write.
#[derive(Default)]
pub struct LogLine(String<LOG_MSG_LEN>);

impl LogLine {
    pub const fn new() -> Self { Self(String::new()) }

    #[inline]
    pub fn as_str(&self) -> &str { self.0.as_str() }
}

impl fmt::Write for LogLine {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format into a fixed-size line and push it at the given level.
#[macro_export]
macro_rules! log_at {
    ($log:expr, $level:expr, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let mut line = $crate::log::LogLine::new();
        let _ = write!(line, $($arg)*);
        $log.push($level, line.as_str());
    }};
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log::LogLevel::Info, $($arg)*)
    };
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log::LogLevel::Warn, $($arg)*)
    };
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log::LogLevel::Error, $($arg)*)
    };
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log::LogLevel::Debug, $($arg)*)
    };
}

// =============================================================================
// Tests
// =============================================================================
