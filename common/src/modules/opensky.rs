//! Aircraft over an area, as a radar of colored dots.
//!
//! The watched area is a latitude/longitude [`BoundingBox`] stretched over
//! the whole screen, north up. Every aircraft with a position inside it
//! becomes a small filled circle. The color comes from the airline part of
//! the callsign (`UAL` in `UAL123`), so one carrier's flights share a color.

use core::fmt;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;
use heapless::{String, Vec};

use super::{Module, Ttl};
use crate::colors::rgb;
use crate::config::{AIRCRAFT_RADIUS, MAX_AIRCRAFT, OPENSKY_ERROR_TTL, OPENSKY_REQUEST_TTL};
use crate::error::{Error, SourceError};
use crate::geometry::{linear_scale, round};
use crate::log::DebugLog;
use crate::shapes::Shape;
use crate::sink::ShapeSink;
use crate::{log_error, log_info};

/// Longest callsign a transponder reports.
pub const CALLSIGN_LEN: usize = 8;

/// Stand-in for a missing or blank callsign.
pub const UNKNOWN_CALLSIGN: &str = "????????";

// =============================================================================
// Area
// =============================================================================

/// Watched area in degrees. South and west are negative.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundingBox {
    pub lat_min: f32,
    pub lat_max: f32,
    pub lon_min: f32,
    pub lon_max: f32,
}

impl BoundingBox {
    pub fn new(
        lat_min: f32,
        lat_max: f32,
        lon_min: f32,
        lon_max: f32,
    ) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&lat_min) || !(-90.0..=90.0).contains(&lat_max) {
            return Err(Error::InvalidGeometry("latitude outside -90..90"));
        }
        if !(-180.0..=180.0).contains(&lon_min) || !(-180.0..=180.0).contains(&lon_max) {
            return Err(Error::InvalidGeometry("longitude outside -180..180"));
        }
        if lat_min >= lat_max || lon_min >= lon_max {
            return Err(Error::InvalidGeometry("empty bounding box"));
        }
        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    pub fn contains(
        &self,
        lat: f32,
        lon: f32,
    ) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    /// Screen position of a coordinate on a `size` x `size` screen.
    /// West is left and north is up.
    pub fn to_screen(
        &self,
        lat: f32,
        lon: f32,
        size: i32,
    ) -> Result<Point, Error> {
        let x = linear_scale(self.lon_min, lon, self.lon_max)?;
        let y = 1.0 - linear_scale(self.lat_min, lat, self.lat_max)?;
        Ok(Point::new(round(size as f32 * x), round(size as f32 * y)))
    }
}

/// Query string for the OpenSky `states/all` endpoint.
impl fmt::Display for BoundingBox {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "lamin={}&lomin={}&lamax={}&lomax={}",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }
}

// =============================================================================
// Aircraft
// =============================================================================

/// The parts of an OpenSky state vector the radar uses.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Aircraft {
    pub callsign: Option<String<CALLSIGN_LEN>>,
    pub latitude: Option<f32>,
    pub longitude: Option<f32>,
}

impl Aircraft {
    /// Build from feed values. The callsign is trimmed and cut to `CALLSIGN_LEN`.
    pub fn new(
        callsign: Option<&str>,
        latitude: Option<f32>,
        longitude: Option<f32>,
    ) -> Self {
        let callsign = callsign.map(|raw| {
            let mut out = String::new();
            for c in raw.trim().chars() {
                if out.push(c).is_err() {
                    break;
                }
            }
            out
        });
        Self {
            callsign,
            latitude,
            longitude,
        }
    }

    /// `(latitude, longitude)` when both are known.
    pub fn position(&self) -> Option<(f32, f32)> { self.latitude.zip(self.longitude) }

    #[inline]
    pub fn color(&self) -> Rgb888 { callsign_color(self.callsign.as_deref()) }
}

/// One feed response.
pub type Flights = Vec<Aircraft, MAX_AIRCRAFT>;

/// Source of aircraft positions.
pub trait FlightSource {
    fn fetch(
        &mut self,
        area: &BoundingBox,
    ) -> Result<Flights, SourceError>;
}

/// Splits a callsign into alternating runs of digits and non-digits.
///
/// `"UAL123"` yields `"UAL"`, `"123"`.
#[derive(Clone, Debug)]
pub struct CallsignFields<'a> {
    rest: &'a str,
}

impl<'a> Iterator for CallsignFields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;
        let digit = first.is_ascii_digit();
        let end = chars
            .find(|(_, c)| c.is_ascii_digit() != digit)
            .map_or(self.rest.len(), |(i, _)| i);
        let (field, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(field)
    }
}

/// Fields of a callsign. Missing or blank callsigns read as [`UNKNOWN_CALLSIGN`].
pub fn callsign_fields(callsign: Option<&str>) -> CallsignFields<'_> {
    let rest = match callsign.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => UNKNOWN_CALLSIGN,
    };
    CallsignFields { rest }
}

/// Color for a callsign: the top 24 bits of the CRC-32 of its first field.
pub fn callsign_color(callsign: Option<&str>) -> Rgb888 {
    let prefix = callsign_fields(callsign).next().unwrap_or(UNKNOWN_CALLSIGN);
    rgb(crc32fast::hash(prefix.as_bytes()) >> 8)
}

// =============================================================================
// Module
// =============================================================================

/// A plotted aircraft.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Blip {
    pub center: Point,
    pub color: Rgb888,
}

impl Blip {
    pub const fn shape(&self) -> Shape {
        Shape::Circle {
            center: self.center,
            radius: AIRCRAFT_RADIUS as u32,
            stroke: 1,
            outline: self.color,
            fill: Some(self.color),
        }
    }
}

pub struct OpenSky<F: FlightSource> {
    source: F,
    area: BoundingBox,
    screen_size: i32,
    blips: Vec<Blip, MAX_AIRCRAFT>,
    last_update: Option<u32>,
}

impl<F: FlightSource> OpenSky<F> {
    pub fn new(
        source: F,
        area: BoundingBox,
        screen_size: i32,
    ) -> Result<Self, Error> {
        if screen_size <= 0 {
            return Err(Error::InvalidGeometry("screen size must be positive"));
        }
        Ok(Self {
            source,
            area,
            screen_size,
            blips: Vec::new(),
            last_update: None,
        })
    }

    #[inline]
    pub const fn area(&self) -> &BoundingBox { &self.area }

    #[inline]
    pub fn blips(&self) -> &[Blip] { &self.blips }

    fn is_due(
        &self,
        now: u32,
    ) -> bool {
        self.last_update.is_none_or(|t| t.saturating_add(OPENSKY_REQUEST_TTL) < now)
    }

    /// Replace the blips with `flights`. Returns how many were skipped for
    /// having no position or lying outside the area.
    fn plot(
        &mut self,
        flights: &[Aircraft],
    ) -> usize {
        self.blips.clear();
        let mut skipped = 0;
        for aircraft in flights {
            let center = aircraft
                .position()
                .and_then(|(lat, lon)| self.area.to_screen(lat, lon, self.screen_size).ok());
            let Some(center) = center else {
                skipped += 1;
                continue;
            };
            let blip = Blip {
                center,
                color: aircraft.color(),
            };
            if self.blips.push(blip).is_err() {
                skipped += 1;
            }
        }
        skipped
    }

    fn emit_blips(
        &self,
        sink: &mut dyn ShapeSink,
    ) -> Result<(), Error> {
        self.blips.iter().try_for_each(|blip| sink.emit(blip.shape()))
    }
}

impl<F: FlightSource> Module for OpenSky<F> {
    fn name(&self) -> &'static str { "opensky" }

    fn draw(
        &mut self,
        now: u32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        if self.is_due(now) {
            match self.source.fetch(&self.area) {
                Ok(flights) => {
                    let skipped = self.plot(&flights);
                    log_info!(log, "opensky {} aircraft, {} skipped", self.blips.len(), skipped);
                    self.last_update = Some(now);
                }
                Err(err) => {
                    log_error!(log, "opensky fetch failed: {}", err);
                    return Ok(OPENSKY_ERROR_TTL);
                }
            }
        }

        self.emit_blips(sink)?;
        Ok(OPENSKY_REQUEST_TTL)
    }

    fn tap(
        &mut self,
        _x: i32,
        _y: i32,
        sink: &mut dyn ShapeSink,
        _log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        self.emit_blips(sink)?;
        Ok(OPENSKY_REQUEST_TTL)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::FRAME_SHAPES;
    use crate::log::LogLevel;
    use crate::sink::ShapeList;

    type Frame = ShapeList<FRAME_SHAPES>;

    fn area() -> BoundingBox { BoundingBox::new(40.0, 41.0, -75.0, -74.0).unwrap() }

    struct Feed {
        reply: Result<std::vec::Vec<Aircraft>, SourceError>,
        calls: usize,
    }

    impl Feed {
        fn ok(aircraft: std::vec::Vec<Aircraft>) -> Self {
            Self {
                reply: Ok(aircraft),
                calls: 0,
            }
        }
    }

    impl FlightSource for Feed {
        fn fetch(
            &mut self,
            _area: &BoundingBox,
        ) -> Result<Flights, SourceError> {
            self.calls += 1;
            let aircraft = self.reply.clone()?;
            Ok(aircraft.into_iter().take(MAX_AIRCRAFT).collect())
        }
    }

    #[test]
    fn test_callsign_fields() {
        let fields: std::vec::Vec<&str> = callsign_fields(Some("UAL123")).collect();
        assert_eq!(fields, ["UAL", "123"]);
        let fields: std::vec::Vec<&str> = callsign_fields(Some("AB12CD ")).collect();
        assert_eq!(fields, ["AB", "12", "CD"]);
        let fields: std::vec::Vec<&str> = callsign_fields(Some("N12345")).collect();
        assert_eq!(fields, ["N", "12345"]);
        let fields: std::vec::Vec<&str> = callsign_fields(Some("123")).collect();
        assert_eq!(fields, ["123"]);
    }

    #[test]
    fn test_blank_callsign_is_unknown() {
        assert_eq!(callsign_fields(None).next(), Some(UNKNOWN_CALLSIGN));
        assert_eq!(callsign_fields(Some("   ")).next(), Some(UNKNOWN_CALLSIGN));
        assert_eq!(callsign_color(None), rgb(0xd8_7e9c));
        assert_eq!(callsign_color(Some("")), callsign_color(None));
    }

    #[test]
    fn test_callsign_color_by_airline() {
        assert_eq!(callsign_color(Some("UAL123")), rgb(0x03_3e46));
        assert_eq!(callsign_color(Some("UAL9")), callsign_color(Some("UAL123")));
        assert_eq!(callsign_color(Some("DAL12")), rgb(0x1e_da8f));
        assert_eq!(callsign_color(Some("N12345")), rgb(0x43_6683));
    }

    #[test]
    fn test_aircraft_callsign_trimmed() {
        let aircraft = Aircraft::new(Some(" SWA1234  "), None, None);
        assert_eq!(aircraft.callsign.as_deref(), Some("SWA1234"));
        assert_eq!(aircraft.color(), rgb(0x65_9af3));

        let long = Aircraft::new(Some("ABCDEFGHIJK"), None, None);
        assert_eq!(long.callsign.as_deref(), Some("ABCDEFGH"));
    }

    #[test]
    fn test_bounding_box_validation() {
        assert!(BoundingBox::new(41.0, 40.0, -75.0, -74.0).is_err());
        assert!(BoundingBox::new(40.0, 40.0, -75.0, -74.0).is_err());
        assert!(BoundingBox::new(40.0, 91.0, -75.0, -74.0).is_err());
        assert!(BoundingBox::new(40.0, 41.0, -181.0, -74.0).is_err());
        assert!(area().contains(40.5, -74.5));
        assert!(!area().contains(39.9, -74.5));
    }

    #[test]
    fn test_query_string() {
        let mut query: heapless::String<64> = heapless::String::new();
        core::fmt::write(&mut query, format_args!("{}", area())).unwrap();
        assert_eq!(query.as_str(), "lamin=40&lomin=-75&lamax=41&lomax=-74");
    }

    #[test]
    fn test_to_screen() {
        let area = area();
        assert_eq!(area.to_screen(40.5, -74.5, 480), Ok(Point::new(240, 240)));
        // North-west quarter
        assert_eq!(area.to_screen(40.75, -74.75, 480), Ok(Point::new(120, 120)));
        assert_eq!(area.to_screen(40.0, -75.0, 480), Ok(Point::new(0, 480)));
        assert!(matches!(area.to_screen(42.0, -74.5, 480), Err(Error::OutOfRange { .. })));
        assert!(area.to_screen(f32::NAN, -74.5, 480).is_err());
        assert!(area.to_screen(40.5, f32::NAN, 480).is_err());
    }

    #[test]
    fn test_draw_plots_and_skips() {
        let feed = Feed::ok(vec![
            Aircraft::new(Some("UAL123"), Some(40.5), Some(-74.5)),
            Aircraft::new(None, Some(40.75), Some(-74.75)),
            Aircraft::new(Some("DAL1"), Some(45.0), Some(-74.5)),
            Aircraft::new(Some("SWA9"), None, Some(-74.5)),
            Aircraft::new(Some("JBU6"), Some(f32::NAN), Some(-74.5)),
        ]);
        let mut radar = OpenSky::new(feed, area(), 480).unwrap();
        let mut frame = Frame::new();
        let mut log = DebugLog::new();
        assert_eq!(radar.draw(100, &mut frame, &mut log), Ok(OPENSKY_REQUEST_TTL));

        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame[0],
            Shape::Circle {
                center: Point::new(240, 240),
                radius: 4,
                stroke: 1,
                outline: rgb(0x03_3e46),
                fill: Some(rgb(0x03_3e46)),
            }
        );
        assert!(matches!(frame[1], Shape::Circle { center, .. } if center == Point::new(120, 120)));

        let entry = log.last().unwrap();
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message.as_str(), "opensky 2 aircraft, 3 skipped");
    }

    #[test]
    fn test_cached_between_requests() {
        let feed = Feed::ok(vec![Aircraft::new(Some("UAL1"), Some(40.5), Some(-74.5))]);
        let mut radar = OpenSky::new(feed, area(), 480).unwrap();
        let mut log = DebugLog::new();
        radar.draw(100, &mut Frame::new(), &mut log).unwrap();
        let mut frame = Frame::new();
        radar.draw(100 + OPENSKY_REQUEST_TTL, &mut frame, &mut log).unwrap();
        assert_eq!(radar.source.calls, 1);
        assert_eq!(frame.len(), 1);
        radar.draw(101 + OPENSKY_REQUEST_TTL, &mut Frame::new(), &mut log).unwrap();
        assert_eq!(radar.source.calls, 2);
    }

    #[test]
    fn test_fetch_failure() {
        let feed = Feed {
            reply: Err(SourceError::Unavailable),
            calls: 0,
        };
        let mut radar = OpenSky::new(feed, area(), 480).unwrap();
        let mut frame = Frame::new();
        let mut log = DebugLog::new();
        assert_eq!(radar.draw(0, &mut frame, &mut log), Ok(OPENSKY_ERROR_TTL));
        assert!(frame.is_empty());
        assert_eq!(log.last().map(|e| e.level), Some(LogLevel::Error));
    }

    #[test]
    fn test_tap_replays_blips() {
        let feed = Feed::ok(vec![Aircraft::new(Some("UAL1"), Some(40.5), Some(-74.5))]);
        let mut radar = OpenSky::new(feed, area(), 480).unwrap();
        let mut log = DebugLog::new();
        let mut drawn = Frame::new();
        radar.draw(0, &mut drawn, &mut log).unwrap();
        let mut tapped = Frame::new();
        assert_eq!(radar.tap(240, 240, &mut tapped, &mut log), Ok(OPENSKY_REQUEST_TTL));
        assert_eq!(drawn, tapped);
        assert_eq!(radar.source.calls, 1);
    }

    #[test]
    fn test_full_feed_fits_frame() {
        let aircraft = (0..MAX_AIRCRAFT)
            .map(|i| Aircraft::new(Some("JBU1"), Some(40.0 + i as f32 / 100.0), Some(-74.5)))
            .collect();
        let mut radar = OpenSky::new(Feed::ok(aircraft), area(), 480).unwrap();
        let mut frame = Frame::new();
        radar.draw(0, &mut frame, &mut DebugLog::new()).unwrap();
        assert_eq!(frame.len(), MAX_AIRCRAFT);
        assert_eq!(radar.blips().len(), MAX_AIRCRAFT);
    }

    proptest! {
        #[test]
        fn prop_inside_area_lands_on_screen(
            lat in 40.0f32..=41.0,
            lon in -75.0f32..=-74.0,
        ) {
            let p = area().to_screen(lat, lon, 480).unwrap();
            prop_assert!((0..=480).contains(&p.x));
            prop_assert!((0..=480).contains(&p.y));
        }
    }
}
