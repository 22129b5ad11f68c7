//! Pluggable screens.
//!
//! A module turns some data into shapes. The driver calls [`Module::draw`]
//! when the previous result's TTL has run out, and [`Module::tap`] when the
//! center of the screen is touched. Both emit a full frame into the sink and
//! return how many seconds the frame stays valid.
//!
//! - [`FaceAnimation`]: cycles through every emotion and color
//! - [`Weather`]: weather station readings as a face
//! - [`OpenSky`]: aircraft over an area as colored dots

mod animation;
mod opensky;
mod weather;

pub use animation::{COLORS, EMOTIONS, FaceAnimation};
pub use opensky::{
    Aircraft,
    Blip,
    BoundingBox,
    CALLSIGN_LEN,
    CallsignFields,
    FlightSource,
    Flights,
    OpenSky,
    UNKNOWN_CALLSIGN,
    callsign_color,
    callsign_fields,
};
pub use weather::{AqiCategory, Weather, WeatherFields, WeatherReport, WeatherSource, nose_size, wind_brows};

use crate::error::Error;
use crate::log::DebugLog;
use crate::sink::ShapeSink;

/// Seconds until a module wants to be drawn again.
pub type Ttl = u32;

/// A screen the carousel can show.
pub trait Module {
    /// Short name for overlays and logs.
    fn name(&self) -> &'static str;

    /// Emit the current frame. `now` is the caller's clock in seconds.
    fn draw(
        &mut self,
        now: u32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error>;

    /// React to a touch at (`x`, `y`) and emit the resulting frame.
    fn tap(
        &mut self,
        x: i32,
        y: i32,
        sink: &mut dyn ShapeSink,
        log: &mut DebugLog,
    ) -> Result<Ttl, Error>;
}
