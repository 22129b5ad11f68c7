//! Display, face-proportion and scheduling constants.
//!
//! Everything is a compile-time `const`. Ordering constraints between related
//! values are checked with `const` assertions so a bad edit fails the build
//! instead of producing a broken face.

// =============================================================================
// Display Configuration
// =============================================================================

/// Width and height of the round panel in pixels (2.1" 480x480 round TFT).
pub const SCREEN_SIZE: u32 = 480;

/// Background color behind the face (24-bit RGB).
pub const BACKGROUND_RGB: u32 = 0x10_32_60;

// =============================================================================
// Face Proportions
// =============================================================================

/// Eye radius as a fraction of the face radius.
pub const EYE_RADIUS_RATIO: f32 = 0.1667;

/// Pupil radius is the eye radius divided by this.
pub const PUPIL_DIVISOR: i32 = 4;

/// Distance between eye centers, in eye radii.
pub const EYE_SPACING: i32 = 5;

/// Nose width in pupil radii.
pub const NOSE_WIDTH_RATIO: f32 = 2.5;

/// Nose height is this many nose widths.
pub const NOSE_ASPECT: i32 = 3;

/// Eyebrow rotation limit in degrees (applies to both directions).
pub const EYEBROW_MAX_ANGLE: i32 = 30;

/// Eyebrow height before any data mapping changes it.
pub const EYEBROW_DEFAULT_HEIGHT: i32 = 2;

const _: () = assert!(PUPIL_DIVISOR > 1);
const _: () = assert!(EYEBROW_MAX_ANGLE > 0 && EYEBROW_MAX_ANGLE <= 90);

// =============================================================================
// Mouth
// =============================================================================

/// Half the width of the straight and teeth mouths.
pub const MOUTH_HALF_WIDTH: i32 = 105;

/// How far below the face center the straight and teeth mouths sit.
pub const MOUTH_NEUTRAL_Y_OFFSET: i32 = 100;

/// Height of the teeth frame.
pub const TEETH_HEIGHT: i32 = 40;

/// Number of teeth drawn in the teeth frame.
pub const TEETH_COUNT: i32 = 6;

/// Segments used to approximate mouth arcs.
pub const MOUTH_SEGMENTS: u32 = 10;

const _: () = assert!(TEETH_COUNT > 1);
const _: () = assert!(TEETH_HEIGHT < 2 * MOUTH_HALF_WIDTH);

// =============================================================================
// Module Scheduling (seconds)
// =============================================================================

/// Delay between frames of the face animation.
pub const ANIMATION_TTL: u32 = 1;

/// How long a weather report stays fresh.
pub const WEATHER_TTL: u32 = 5 * 60;

/// Redraw delay when the weather module has nothing to show yet.
pub const WEATHER_EMPTY_TTL: u32 = 1;

/// How often the flight feed is polled.
pub const OPENSKY_REQUEST_TTL: u32 = 15;

/// Retry delay after the flight feed fails.
pub const OPENSKY_ERROR_TTL: u32 = 60;

/// Minimum time between accepted touches.
pub const TOUCH_TTL: u32 = 1;

/// Retry delay after a module fails to produce a frame.
pub const MODULE_ERROR_TTL: u32 = 60;

const _: () = assert!(TOUCH_TTL <= ANIMATION_TTL);
const _: () = assert!(OPENSKY_REQUEST_TTL < OPENSKY_ERROR_TTL);

// =============================================================================
// Weather Mapping
// =============================================================================

/// Smallest nose side length produced by the temperature mapping.
pub const NOSE_MIN_SIZE: i32 = 20;

/// Largest nose side length; any excess spills into the other axis.
pub const NOSE_MAX_SIZE: i32 = 100;

/// Eyebrow degrees per 10 mph of wind.
pub const WIND_BROW_STEP: i32 = 15;

/// Wind is bucketed in 10 mph steps, capped at this many steps.
pub const WIND_MAX_STEPS: i32 = 3;

const _: () = assert!(NOSE_MIN_SIZE < NOSE_MAX_SIZE);

// =============================================================================
// Radar (OpenSky)
// =============================================================================

/// Radius of an aircraft dot.
pub const AIRCRAFT_RADIUS: i32 = 4;

/// Most aircraft kept from a single feed response.
pub const MAX_AIRCRAFT: usize = 48;

// =============================================================================
// Capacities
// =============================================================================

/// Shape records produced by one face: 3 per eye side, nose, and up to 7 mouth parts.
pub const FACE_SHAPES: usize = 6 + 1 + 7;

/// Capacity of a frame's shape list. Enough for a full radar.
pub const FRAME_SHAPES: usize = MAX_AIRCRAFT + FACE_SHAPES;

const _: () = assert!(FRAME_SHAPES >= FACE_SHAPES);
