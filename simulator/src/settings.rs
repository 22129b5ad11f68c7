//! Environment overrides for the simulator.
//!
//! The watched area comes from `OPENSKY_LAT_MIN`, `OPENSKY_LAT_MAX`,
//! `OPENSKY_LONG_MIN` and `OPENSKY_LONG_MAX`. Anything missing falls back to
//! the default box; a box that doesn't validate is replaced as a whole.

use std::env;

use guy_common::modules::BoundingBox;
use guy_common::{DebugLog, log_warn};

const DEFAULT_LAT_MIN: f32 = 37.0;
const DEFAULT_LAT_MAX: f32 = 38.5;
const DEFAULT_LON_MIN: f32 = -123.0;
const DEFAULT_LON_MAX: f32 = -121.5;

fn coordinate(
    name: &str,
    default: f32,
    log: &mut DebugLog,
) -> f32 {
    let Ok(value) = env::var(name) else {
        return default;
    };
    match value.trim().parse::<f32>() {
        Ok(parsed) => parsed,
        Err(_) => {
            log_warn!(log, "{name}: bad value '{value}'");
            default
        }
    }
}

fn default_area() -> BoundingBox {
    BoundingBox {
        lat_min: DEFAULT_LAT_MIN,
        lat_max: DEFAULT_LAT_MAX,
        lon_min: DEFAULT_LON_MIN,
        lon_max: DEFAULT_LON_MAX,
    }
}

/// Area for the OpenSky module.
pub fn opensky_area(log: &mut DebugLog) -> BoundingBox {
    let lat_min = coordinate("OPENSKY_LAT_MIN", DEFAULT_LAT_MIN, log);
    let lat_max = coordinate("OPENSKY_LAT_MAX", DEFAULT_LAT_MAX, log);
    let lon_min = coordinate("OPENSKY_LONG_MIN", DEFAULT_LON_MIN, log);
    let lon_max = coordinate("OPENSKY_LONG_MAX", DEFAULT_LON_MAX, log);

    BoundingBox::new(lat_min, lat_max, lon_min, lon_max).unwrap_or_else(|err| {
        log_warn!(log, "opensky area: {err}");
        default_area()
    })
}
