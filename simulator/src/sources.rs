//! Canned data sources so every module has something to show offline.
//!
//! The station produces the same formatted strings a real station page
//! does and goes through [`WeatherReport::from_fields`]. The feed flies a
//! handful of aircraft in circles around the middle of the watched area,
//! with a few that stray outside it or have no position.

use guy_common::error::SourceError;
use guy_common::modules::{
    Aircraft,
    AqiCategory,
    BoundingBox,
    FlightSource,
    Flights,
    WeatherFields,
    WeatherReport,
    WeatherSource,
};

use crate::timing::Clock;

// =============================================================================
// Weather
// =============================================================================

/// Every this many fetches the station is unreachable.
const STATION_OUTAGE_EVERY: u32 = 7;

/// AQI colors as the station reports them.
const fn aqi_color(category: AqiCategory) -> &'static str {
    match category {
        AqiCategory::Good => "#00e400",
        AqiCategory::Moderate => "#ffff00",
        AqiCategory::UnhealthyForSensitiveGroups => "#ff7e00",
        AqiCategory::Unhealthy => "#ff0000",
        AqiCategory::VeryUnhealthy => "#8f3f97",
        AqiCategory::Hazardous => "#7e0023",
    }
}

/// Weather that drifts a little on every fetch.
pub struct DemoStation {
    fetches: u32,
}

impl DemoStation {
    pub const fn new() -> Self { Self { fetches: 0 } }
}

impl WeatherSource for DemoStation {
    fn fetch(&mut self) -> Result<WeatherReport, SourceError> {
        self.fetches += 1;
        if self.fetches.is_multiple_of(STATION_OUTAGE_EVERY) {
            return Err(SourceError::Unavailable);
        }

        let t = self.fetches as f32;
        let air = 45.0 + 50.0 * (t * 0.9).sin();
        let chill = air - 8.0 * (t * 0.4).cos().max(0.0);
        let heat = air + 12.0 * (t * 0.3).sin().max(0.0);
        let humidity = 50.0 + 45.0 * (t * 1.3).sin();
        let wind = 15.0 + 15.0 * (t * 0.6).cos();
        let category = AqiCategory::ALL[self.fetches as usize % AqiCategory::ALL.len()];

        let air = format!("{air:.1}&deg;F");
        let chill = format!("{chill:.1}&deg;F");
        let heat = format!("{heat:.1}&deg;F");
        let humidity = format!("{humidity:.0}%");
        let wind = format!("{wind:.0} mph");

        WeatherReport::from_fields(&WeatherFields {
            outside_temperature: &air,
            wind_chill: &chill,
            heat_index: &heat,
            humidity: &humidity,
            wind: &wind,
            aqi_color: aqi_color(category),
            aqi_category: category.label(),
        })
    }
}

impl Default for DemoStation {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Flights
// =============================================================================

/// Callsigns flown by the demo feed. Blank and missing ones are deliberate.
const CALLSIGNS: [Option<&str>; 12] = [
    Some("UAL123"),
    Some("DAL45"),
    Some("SWA2201"),
    Some("N172SP"),
    None,
    Some("AAL9"),
    Some("JBU611"),
    Some("FDX3"),
    Some("   "),
    Some("UAL88"),
    Some("ASA1321"),
    Some("SKW5590"),
];

/// Aircraft at this index report no position.
const NO_POSITION: usize = 5;

/// Aircraft circling the middle of the area.
pub struct DemoFeed {
    clock: Clock,
}

impl DemoFeed {
    pub fn new() -> Self { Self { clock: Clock::new() } }
}

impl FlightSource for DemoFeed {
    fn fetch(
        &mut self,
        area: &BoundingBox,
    ) -> Result<Flights, SourceError> {
        let t = self.clock.seconds();
        let mid_lat = (area.lat_min + area.lat_max) / 2.0;
        let mid_lon = (area.lon_min + area.lon_max) / 2.0;
        let half_lat = (area.lat_max - area.lat_min) / 2.0;
        let half_lon = (area.lon_max - area.lon_min) / 2.0;

        let mut flights = Flights::new();
        for (i, callsign) in CALLSIGNS.iter().enumerate() {
            let i_f = i as f32;
            let angle = t * 0.01 * (1.0 + i_f * 0.2) + i_f * 0.6;
            // The outermost ring is always outside the area.
            let reach = 0.1 + 0.12 * i_f;
            let lat = mid_lat + half_lat * reach * angle.sin();
            let lon = mid_lon + half_lon * reach * angle.cos();

            let aircraft = if i == NO_POSITION {
                Aircraft::new(*callsign, None, None)
            } else {
                Aircraft::new(*callsign, Some(lat), Some(lon))
            };
            if flights.push(aircraft).is_err() {
                break;
            }
        }
        Ok(flights)
    }
}

impl Default for DemoFeed {
    fn default() -> Self { Self::new() }
}
