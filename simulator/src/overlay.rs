//! Text drawn over the face: module title, log terminal and round bezel.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder, StrokeAlignment};
use embedded_graphics::text::{Alignment, Text};
use guy_common::DebugLog;
use guy_common::colors::{GREEN, to_display};
use guy_common::config::SCREEN_SIZE;
use heapless::String;
use profont::{PROFONT_12_POINT, PROFONT_14_POINT};

const TITLE_Y: i32 = 40;
const LOG_X: i32 = 90;
const LOG_BOTTOM_Y: i32 = 400;
const LOG_LINE_HEIGHT: i32 = 15;
const LOG_LINES: usize = 6;
const BEZEL_WIDTH: u32 = 120;

/// Module name and position in the carousel, centered at the top.
pub fn draw_title<D>(
    display: &mut D,
    name: &str,
    index: usize,
    count: usize,
)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&PROFONT_14_POINT, to_display(GREEN));
    let mut s: String<32> = String::new();
    let _ = write!(s, "{name} {}/{count}", index + 1);
    Text::with_alignment(&s, Point::new(SCREEN_SIZE as i32 / 2, TITLE_Y), style, Alignment::Center)
        .draw(display)
        .ok();
}

/// The newest log entries, oldest on top, inside the lower half of the dial.
pub fn draw_log_terminal<D>(
    display: &mut D,
    log: &DebugLog,
)
where
    D: DrawTarget<Color = Rgb565>,
{
    let skip = log.len().saturating_sub(LOG_LINES);
    let shown = log.len() - skip;
    let mut y = LOG_BOTTOM_Y - (shown as i32 - 1) * LOG_LINE_HEIGHT;

    for entry in log.iter().skip(skip) {
        let style = MonoTextStyle::new(&PROFONT_12_POINT, to_display(entry.color()));
        let mut s: String<64> = String::new();
        let _ = write!(s, "{} {:>4} {}", entry.level.prefix(), entry.timestamp, entry.message);
        Text::new(&s, Point::new(LOG_X, y), style).draw(display).ok();
        y += LOG_LINE_HEIGHT;
    }
}

/// Black out everything outside the round panel.
pub fn draw_bezel<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(Rgb565::BLACK)
        .stroke_width(BEZEL_WIDTH)
        .stroke_alignment(StrokeAlignment::Outside)
        .build();
    Circle::with_center(
        Point::new(SCREEN_SIZE as i32 / 2, SCREEN_SIZE as i32 / 2),
        SCREEN_SIZE,
    )
    .into_styled(style)
    .draw(display)
    .ok();
}
