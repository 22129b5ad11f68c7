//! Weather station readings as a face.
//!
//! | Reading | Feature |
//! |---------|---------|
//! | AQI color | face color |
//! | AQI category | mouth, from `HAPPY_3` (good) down to `SAD_3` (hazardous) |
//! | temperature | nose: taller when warm, wider when cold |
//! | wind | eyebrows splay 15 degrees per 10 mph, up to 3 steps |
//! | humidity | pupils slide from the left rim (0%) to the right rim (100%) |
//!
//! The station itself is a [`WeatherSource`]; fetching and JSON decoding
//! live with the platform.

use core::fmt;
use core::ops::RangeInclusive;

use embedded_graphics::pixelcolor::Rgb888;

use super::{Module, Ttl};
use crate::colors::{YELLOW, parse_hex};
use crate::config::{
    NOSE_MAX_SIZE,
    NOSE_MIN_SIZE,
    WEATHER_EMPTY_TTL,
    WEATHER_TTL,
    WIND_BROW_STEP,
    WIND_MAX_STEPS,
};
use crate::emotion::Emotion;
use crate::error::{Error, SourceError};
use crate::face::Face;
use crate::geometry::round;
use crate::log::DebugLog;
use crate::sink::ShapeSink;
use crate::{log_error, log_info};

/// Fraction of the air temperature below which wind chill takes over.
const WIND_CHILL_FACTOR: f32 = 0.9;
/// Fraction of the air temperature above which heat index takes over.
const HEAT_INDEX_FACTOR: f32 = 1.1;

/// Readings outside these ranges are treated as garbage from the station.
const TEMPERATURE_RANGE: RangeInclusive<f32> = -200.0..=200.0;
const HUMIDITY_RANGE: RangeInclusive<f32> = 0.0..=100.0;
const WIND_RANGE: RangeInclusive<f32> = 0.0..=500.0;

// =============================================================================
// Report
// =============================================================================

/// EPA air quality category for PM 2.5.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub const ALL: [Self; 6] = [
        Self::Good,
        Self::Moderate,
        Self::UnhealthyForSensitiveGroups,
        Self::Unhealthy,
        Self::VeryUnhealthy,
        Self::Hazardous,
    ];

    /// Station label for this category.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Position on the station's scale. Index 3 is reserved and unused.
    pub const fn index(self) -> u8 {
        match self {
            Self::Good => 0,
            Self::Moderate => 1,
            Self::UnhealthyForSensitiveGroups => 2,
            Self::Unhealthy => 4,
            Self::VeryUnhealthy => 5,
            Self::Hazardous => 6,
        }
    }

    /// Mouth for this category: emotion code `3 - index`.
    pub const fn mouth(self) -> Emotion {
        match self {
            Self::Good => Emotion::HAPPY_3,
            Self::Moderate => Emotion::HAPPY_2,
            Self::UnhealthyForSensitiveGroups => Emotion::HAPPY_1,
            Self::Unhealthy => Emotion::SAD_1,
            Self::VeryUnhealthy => Emotion::SAD_2,
            Self::Hazardous => Emotion::SAD_3,
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw station fields, as formatted by the station.
///
/// Temperatures look like `"72.3&deg;F"`, humidity like `"45%"`, wind like
/// `"12 mph"` and the AQI color like `"#00e400"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WeatherFields<'a> {
    pub outside_temperature: &'a str,
    pub wind_chill: &'a str,
    pub heat_index: &'a str,
    pub humidity: &'a str,
    pub wind: &'a str,
    pub aqi_color: &'a str,
    pub aqi_category: &'a str,
}

/// One decoded station reading.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WeatherReport {
    /// Degrees Fahrenheit.
    pub air_temp: f32,
    pub wind_chill: f32,
    pub heat_index: f32,
    /// Relative humidity, 0 to 100.
    pub humidity: f32,
    pub wind_mph: f32,
    pub aqi_color: Rgb888,
    /// `None` when the station reports a category we don't know.
    pub aqi_category: Option<AqiCategory>,
}

/// Number before the first `sep`, e.g. `72.3` from `"72.3&deg;F"`.
///
/// Anything that doesn't parse or falls outside `range` (NaN included) is
/// malformed.
fn leading_number(
    text: &str,
    sep: char,
    range: RangeInclusive<f32>,
    field: &'static str,
) -> Result<f32, SourceError> {
    text.split(sep)
        .next()
        .and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|value| range.contains(value))
        .ok_or(SourceError::Malformed(field))
}

impl WeatherReport {
    pub fn from_fields(fields: &WeatherFields<'_>) -> Result<Self, SourceError> {
        Ok(Self {
            air_temp: leading_number(fields.outside_temperature, '&', TEMPERATURE_RANGE, "Outside Temperature")?,
            wind_chill: leading_number(fields.wind_chill, '&', TEMPERATURE_RANGE, "Wind Chill")?,
            heat_index: leading_number(fields.heat_index, '&', TEMPERATURE_RANGE, "Heat Index")?,
            humidity: leading_number(fields.humidity, '%', HUMIDITY_RANGE, "Humidity")?,
            wind_mph: leading_number(fields.wind.trim(), ' ', WIND_RANGE, "Wind")?,
            aqi_color: parse_hex(fields.aqi_color).ok_or(SourceError::Malformed("AQI color"))?,
            aqi_category: AqiCategory::parse(fields.aqi_category),
        })
    }

    /// Temperature that best matches how it feels.
    ///
    /// Wind chill wins when it is more than 10% below the air temperature,
    /// otherwise heat index wins when it is more than 10% above.
    pub fn effective_temperature(&self) -> i32 {
        let air = round(self.air_temp);
        let chill = round(self.wind_chill);
        let heat = round(self.heat_index);
        if (chill as f32) < air as f32 * WIND_CHILL_FACTOR {
            chill
        } else if heat as f32 > air as f32 * HEAT_INDEX_FACTOR {
            heat
        } else {
            air
        }
    }

    /// Mouth for the current air quality. Unknown categories are neutral.
    pub fn mouth(&self) -> Emotion { self.aqi_category.map_or(Emotion::Neutral, AqiCategory::mouth) }
}

/// Source of weather reports.
pub trait WeatherSource {
    fn fetch(&mut self) -> Result<WeatherReport, SourceError>;
}

// =============================================================================
// Mappings
// =============================================================================

/// Nose `(width, height)` for a temperature in Fahrenheit.
///
/// Above 0 the nose grows taller, otherwise it grows wider.
/// Growth past `NOSE_MAX_SIZE` spills into the other axis.
pub fn nose_size(temperature: i32) -> (i32, i32) {
    let mut width = NOSE_MIN_SIZE;
    let mut height = NOSE_MIN_SIZE;
    if temperature > 0 {
        height = temperature + NOSE_MIN_SIZE;
        if height > NOSE_MAX_SIZE {
            width += height - NOSE_MAX_SIZE;
            height = NOSE_MAX_SIZE;
        }
    } else {
        width = -temperature + NOSE_MIN_SIZE;
        if width > NOSE_MAX_SIZE {
            height += width - NOSE_MAX_SIZE;
            width = NOSE_MAX_SIZE;
        }
    }
    (width, height)
}

/// Left and right eyebrow angles for a wind speed.
pub fn wind_brows(mph: f32) -> [i32; 2] {
    let steps = round(mph).div_euclid(10).clamp(0, WIND_MAX_STEPS);
    [WIND_BROW_STEP * steps, -WIND_BROW_STEP * steps]
}

/// Pupil x offset from the eye's left rim for a humidity percentage.
fn humidity_offset(
    humidity: f32,
    eye_radius: i32,
) -> i32 {
    round(humidity / 100.0 * (2 * eye_radius) as f32)
}

// =============================================================================
// Module
// =============================================================================

pub struct Weather<S: WeatherSource> {
    source: S,
    face: Face,
    report: Option<WeatherReport>,
    last_update: Option<u32>,
}

impl<S: WeatherSource> Weather<S> {
    pub fn new(
        source: S,
        face_size: i32,
    ) -> Result<Self, Error> {
        Ok(Self {
            source,
            face: Face::new(face_size)?,
            report: None,
            last_update: None,
        })
    }

    #[inline]
    pub const fn report(&self) -> Option<&WeatherReport> { self.report.as_ref() }

    #[inline]
    pub const fn face(&self) -> &Face { &self.face }

    fn is_due(
        &self,
        now: u32,
    ) -> bool {
        self.last_update.is_none_or(|t| t.saturating_add(WEATHER_TTL) < now)
    }

    /// Pose the face from a report. Leaves `face.emotion` unset so the
    /// computed features are drawn as they are.
    fn apply(
        &mut self,
        report: &WeatherReport,
    ) -> Result<(), Error> {
        let face = &mut self.face;
        face.emotion = None;
        face.reset_pupils();
        face.reset_eyebrows();

        face.color = Some(report.aqi_color);
        face.reset_color();
        face.mouth.emotion = report.mouth();

        let (width, height) = nose_size(report.effective_temperature());
        face.nose.width = width;
        face.nose.height = height;

        for (brow, angle) in face.eyebrows.iter_mut().zip(wind_brows(report.wind_mph)) {
            brow.angle = angle;
        }

        for (pupil, eye) in face.pupils.iter_mut().zip(&face.eyes) {
            pupil.center.x = eye.center.x - eye.radius + humidity_offset(report.humidity, eye.radius);
        }
        face.bound_pupils()
    }

    fn make_confused(&mut self) {
        self.face.reset_pupils();
        self.face.reset_eyebrows();
        self.face.emotion = Some(Emotion::Confused);
        self.face.color = Some(YELLOW);
        self.face.reset_color();
    }
}

impl<S: WeatherSource> Module for Weather<S> {
    fn name(&self) -> &'static str { "weather" }

    fn draw(
        &mut self,
        now: u32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        if self.is_due(now) {
            match self.source.fetch() {
                Ok(report) => {
                    self.apply(&report)?;
                    log_info!(
                        log,
                        "weather {}F {}% aqi {}",
                        report.effective_temperature(),
                        round(report.humidity),
                        report.aqi_category.map_or("?", AqiCategory::label)
                    );
                    self.report = Some(report);
                    self.last_update = Some(now);
                }
                Err(err) => {
                    log_error!(log, "weather fetch failed: {}", err);
                    self.make_confused();
                }
            }
        }

        self.face.draw(sink)?;
        Ok(WEATHER_TTL)
    }

    fn tap(
        &mut self,
        _x: i32,
        _y: i32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error> {
        self.face.draw(sink)?;
        if self.report.is_none() {
            log_info!(log, "weather: nothing fetched");
            return Ok(WEATHER_EMPTY_TTL);
        }
        Ok(WEATHER_TTL)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::Point;

    use super::*;
    use crate::colors::rgb;
    use crate::log::LogLevel;
    use crate::shapes::Shape;
    use crate::sink::ShapeList;

    type Frame = ShapeList<16>;

    const FIELDS: WeatherFields<'static> = WeatherFields {
        outside_temperature: "72.3&deg;F",
        wind_chill: "72.3&deg;F",
        heat_index: "74.0&deg;F",
        humidity: "45%",
        wind: "12 mph",
        aqi_color: "#00e400",
        aqi_category: "Good",
    };

    struct Station {
        replies: Vec<Result<WeatherReport, SourceError>>,
        calls: usize,
    }

    impl Station {
        fn new(replies: Vec<Result<WeatherReport, SourceError>>) -> Self { Self { replies, calls: 0 } }
    }

    impl WeatherSource for Station {
        fn fetch(&mut self) -> Result<WeatherReport, SourceError> {
            let reply = self.replies[self.calls.min(self.replies.len() - 1)];
            self.calls += 1;
            reply
        }
    }

    fn report() -> WeatherReport { WeatherReport::from_fields(&FIELDS).unwrap() }

    fn with_temps(
        air: f32,
        chill: f32,
        heat: f32,
    ) -> WeatherReport {
        WeatherReport {
            air_temp: air,
            wind_chill: chill,
            heat_index: heat,
            ..report()
        }
    }

    #[test]
    fn test_from_fields() {
        let report = report();
        assert_eq!(report.air_temp, 72.3);
        assert_eq!(report.heat_index, 74.0);
        assert_eq!(report.humidity, 45.0);
        assert_eq!(report.wind_mph, 12.0);
        assert_eq!(report.aqi_color, rgb(0x00e400));
        assert_eq!(report.aqi_category, Some(AqiCategory::Good));
    }

    #[test]
    fn test_from_fields_malformed() {
        let fields = WeatherFields {
            humidity: "damp",
            ..FIELDS
        };
        assert_eq!(WeatherReport::from_fields(&fields), Err(SourceError::Malformed("Humidity")));

        let fields = WeatherFields {
            aqi_color: "green",
            ..FIELDS
        };
        assert_eq!(WeatherReport::from_fields(&fields), Err(SourceError::Malformed("AQI color")));
    }

    #[test]
    fn test_from_fields_out_of_range() {
        for (fields, field) in [
            (
                WeatherFields {
                    outside_temperature: "inf&deg;F",
                    ..FIELDS
                },
                "Outside Temperature",
            ),
            (
                WeatherFields {
                    wind_chill: "NaN&deg;F",
                    ..FIELDS
                },
                "Wind Chill",
            ),
            (
                WeatherFields {
                    heat_index: "1e30&deg;F",
                    ..FIELDS
                },
                "Heat Index",
            ),
            (
                WeatherFields {
                    humidity: "140%",
                    ..FIELDS
                },
                "Humidity",
            ),
            (
                WeatherFields {
                    wind: "-3 mph",
                    ..FIELDS
                },
                "Wind",
            ),
        ] {
            assert_eq!(WeatherReport::from_fields(&fields), Err(SourceError::Malformed(field)));
        }
    }

    #[test]
    fn test_unknown_category_is_neutral() {
        let fields = WeatherFields {
            aqi_category: "NOT USED",
            ..FIELDS
        };
        let report = WeatherReport::from_fields(&fields).unwrap();
        assert_eq!(report.aqi_category, None);
        assert_eq!(report.mouth(), Emotion::Neutral);
    }

    #[test]
    fn test_category_mouths_follow_index() {
        for category in AqiCategory::ALL {
            assert_eq!(i8::from(category.mouth()), 3 - category.index() as i8);
            assert_eq!(AqiCategory::parse(category.label()), Some(category));
        }
    }

    #[test]
    fn test_effective_temperature() {
        assert_eq!(report().effective_temperature(), 72);
        // Heat index more than 10% over
        assert_eq!(with_temps(95.0, 95.0, 110.0).effective_temperature(), 110);
        // Wind chill more than 10% under
        assert_eq!(with_temps(-30.0, -45.0, -30.0).effective_temperature(), -45);
        assert_eq!(with_temps(40.0, 30.0, 40.0).effective_temperature(), 30);
    }

    #[test]
    fn test_nose_size() {
        assert_eq!(nose_size(72), (20, 92));
        assert_eq!(nose_size(110), (50, 100));
        assert_eq!(nose_size(0), (20, 20));
        assert_eq!(nose_size(-45), (65, 20));
        assert_eq!(nose_size(-100), (100, 40));
    }

    #[test]
    fn test_wind_brows() {
        assert_eq!(wind_brows(0.0), [0, 0]);
        assert_eq!(wind_brows(9.4), [0, 0]);
        assert_eq!(wind_brows(12.0), [15, -15]);
        assert_eq!(wind_brows(29.6), [45, -45]);
        assert_eq!(wind_brows(80.0), [45, -45]);
    }

    #[test]
    fn test_face_from_report() {
        let mut weather = Weather::new(Station::new(vec![Ok(report())]), 400).unwrap();
        let mut frame = Frame::new();
        let mut log = DebugLog::new();
        assert_eq!(weather.draw(1000, &mut frame, &mut log), Ok(WEATHER_TTL));

        let face = weather.face();
        assert_eq!(face.emotion, None);
        assert_eq!(face.color, Some(rgb(0x00e400)));
        assert_eq!(face.mouth.emotion, Emotion::HAPPY_3);
        assert_eq!((face.nose.width, face.nose.height), (20, 92));
        assert_eq!(face.eyebrows[0].angle, 15);
        assert_eq!(face.eyebrows[1].angle, -15);
        // 45% of a 66 px eye, measured from the left rim
        assert_eq!(face.pupils[0].center, Point::new(115, 118));
        assert_eq!(face.pupils[1].center, Point::new(279, 118));

        assert_eq!(frame.len(), 8);
        assert!(matches!(frame[7], Shape::Arc { direction: 270, .. }));
        assert_eq!(log.last().map(|e| e.level), Some(LogLevel::Info));
        assert!(weather.report().is_some());
    }

    #[test]
    fn test_gale_brows_kept_wide() {
        let report = WeatherReport {
            wind_mph: 35.0,
            ..report()
        };
        let mut weather = Weather::new(Station::new(vec![Ok(report)]), 400).unwrap();
        let mut frame = Frame::new();
        weather.draw(0, &mut frame, &mut DebugLog::new()).unwrap();

        let face = weather.face();
        assert_eq!(face.eyebrows[0].angle, 45);
        assert_eq!(face.eyebrows[1].angle, -45);
        assert_eq!(frame[2], face.eyebrows[0].shape().unwrap());
    }

    #[test]
    fn test_full_humidity_bounded() {
        let report = WeatherReport {
            humidity: 100.0,
            ..report()
        };
        let mut weather = Weather::new(Station::new(vec![Ok(report)]), 400).unwrap();
        weather.draw(0, &mut Frame::new(), &mut DebugLog::new()).unwrap();
        assert_eq!(weather.face().pupils[0].center, Point::new(143, 118));
    }

    #[test]
    fn test_fetch_failure_is_confused_yellow() {
        let mut weather = Weather::new(Station::new(vec![Err(SourceError::Unavailable)]), 400).unwrap();
        let mut frame = Frame::new();
        let mut log = DebugLog::new();
        assert_eq!(weather.draw(0, &mut frame, &mut log), Ok(WEATHER_TTL));

        let face = weather.face();
        assert_eq!(face.emotion, Some(Emotion::Confused));
        assert_eq!(face.color, Some(YELLOW));
        assert_eq!(face.mouth.emotion, Emotion::SAD_1);
        assert!(matches!(frame[0], Shape::Circle { outline, .. } if outline == YELLOW));

        let entry = log.last().unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert!(entry.message.contains("source unavailable"));
    }

    #[test]
    fn test_refetch_after_ttl() {
        let mut weather = Weather::new(Station::new(vec![Ok(report())]), 400).unwrap();
        let mut log = DebugLog::new();
        weather.draw(1000, &mut Frame::new(), &mut log).unwrap();
        weather.draw(1000 + WEATHER_TTL, &mut Frame::new(), &mut log).unwrap();
        assert_eq!(weather.source.calls, 1);
        weather.draw(1001 + WEATHER_TTL, &mut Frame::new(), &mut log).unwrap();
        assert_eq!(weather.source.calls, 2);
    }

    #[test]
    fn test_recovers_after_failure() {
        let station = Station::new(vec![Err(SourceError::Unavailable), Ok(report())]);
        let mut weather = Weather::new(station, 400).unwrap();
        let mut log = DebugLog::new();
        weather.draw(0, &mut Frame::new(), &mut log).unwrap();
        weather.draw(1, &mut Frame::new(), &mut log).unwrap();

        let face = weather.face();
        assert_eq!(face.emotion, None);
        assert_eq!(face.mouth.emotion, Emotion::HAPPY_3);
        assert_eq!(face.eyebrows[0].angle, 15);
    }

    #[test]
    fn test_tap_without_data() {
        let mut weather = Weather::new(Station::new(vec![Err(SourceError::Unavailable)]), 400).unwrap();
        let mut frame = Frame::new();
        assert_eq!(weather.tap(240, 240, &mut frame, &mut DebugLog::new()), Ok(WEATHER_EMPTY_TTL));
        assert_eq!(weather.source.calls, 0);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_tap_with_data() {
        let mut weather = Weather::new(Station::new(vec![Ok(report())]), 400).unwrap();
        let mut log = DebugLog::new();
        weather.draw(0, &mut Frame::new(), &mut log).unwrap();
        let mut frame = Frame::new();
        assert_eq!(weather.tap(240, 240, &mut frame, &mut log), Ok(WEATHER_TTL));
        assert_eq!(frame.len(), 8);
        assert_eq!(weather.source.calls, 1);
    }
}
