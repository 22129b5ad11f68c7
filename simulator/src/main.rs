//! Guy face display simulator for desktop.
//!
//! Runs the same modules and carousel the firmware does, against canned data
//! sources, in an `embedded-graphics-simulator` window.
//!
//! Controls:
//! - click: touch the screen (left quarter next, right quarter previous)
//! - Left / Right: previous / next module
//! - Space: tap the center
//! - D: toggle the log overlay
//!
//! `simulator --describe` prints each module's first frame as text and exits.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod overlay;
mod settings;
mod sources;
mod timing;

use std::num::NonZeroUsize;
use std::time::Instant;
use std::{env, process, thread};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use guy_common::colors::rgb;
use guy_common::config::{BACKGROUND_RGB, FRAME_SHAPES, SCREEN_SIZE};
use guy_common::modules::{BoundingBox, FaceAnimation, OpenSky, Weather};
use guy_common::{Canvas, Carousel, DebugLog, Error, Module, ShapeList, TextSink, log_info};

use crate::sources::{DemoFeed, DemoStation};
use crate::timing::{Clock, FRAME_TIME};

const SIZE: i32 = SCREEN_SIZE as i32;

fn build_modules(area: BoundingBox) -> Result<Vec<Box<dyn Module>>, Error> {
    let modules: Vec<Box<dyn Module>> = vec![
        Box::new(FaceAnimation::new(SIZE)?),
        Box::new(Weather::new(DemoStation::new(), SIZE)?),
        Box::new(OpenSky::new(DemoFeed::new(), area, SIZE)?),
    ];
    Ok(modules)
}

/// Print the first frame of every module and return.
fn describe(
    modules: &mut [Box<dyn Module>],
    log: &mut DebugLog,
) {
    for module in modules.iter_mut() {
        let mut sink = TextSink::new(String::new());
        match module.draw(0, &mut sink, log) {
            Ok(ttl) => {
                println!("# {} ({} shapes, ttl {ttl}s)", module.name(), sink.count());
                print!("{}", sink.into_inner());
            }
            Err(err) => println!("# {}: {err}", module.name()),
        }
    }
    for entry in log.iter() {
        println!("{} {}", entry.level.prefix(), entry.message);
    }
}

fn main() {
    let mut log = DebugLog::new();
    let area = settings::opensky_area(&mut log);
    let mut modules = match build_modules(area) {
        Ok(modules) => modules,
        Err(err) => {
            eprintln!("failed to set up modules: {err}");
            process::exit(1);
        }
    };

    if env::args().any(|arg| arg == "--describe") {
        describe(&mut modules, &mut log);
        return;
    }

    let Some(count) = NonZeroUsize::new(modules.len()) else {
        return;
    };
    let mut carousel = Carousel::new(count, SIZE);
    let mut frame: ShapeList<FRAME_SHAPES> = ShapeList::new();

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_SIZE, SCREEN_SIZE));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Guy Simulator", &output_settings);
    display.clear(Rgb565::BLACK).ok();
    window.update(&display);

    let clock = Clock::new();
    let mut show_log = false;
    let mut dirty = true;
    log_info!(log, "{} modules", modules.len());

    loop {
        let frame_start = Instant::now();
        let now = clock.now();
        log.set_time(now);

        let mut touch = None;
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::MouseButtonDown { point, .. } => touch = Some(point),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Left => touch = Some(Point::new(SIZE - 1, SIZE / 2)),
                        Keycode::Right => touch = Some(Point::new(0, SIZE / 2)),
                        Keycode::Space => touch = Some(Point::new(SIZE / 2, SIZE / 2)),
                        Keycode::D => {
                            show_log = !show_log;
                            dirty = true;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let logged = log.len() + log.dropped() as usize;
        match carousel.poll(&mut modules, touch, now, &mut frame, &mut log) {
            Ok(Some(_)) => dirty = true,
            Ok(None) => {}
            Err(_) => {
                frame.clear();
                dirty = true;
            }
        }
        if show_log && log.len() + log.dropped() as usize != logged {
            dirty = true;
        }

        if dirty {
            let mut canvas = Canvas::new(&mut display);
            canvas.clear(rgb(BACKGROUND_RGB));
            frame.replay(&mut canvas).ok();

            if show_log {
                let index = carousel.current();
                let name = modules.get(index).map_or("?", |m| m.name());
                overlay::draw_title(&mut display, name, index, carousel.count());
                overlay::draw_log_terminal(&mut display, &log);
            }
            overlay::draw_bezel(&mut display);
            dirty = false;
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}
