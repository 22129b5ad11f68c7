//! Color constants and conversions.
//!
//! Faces are colored in 24-bit RGB (`Rgb888`), which is what data sources
//! hand us (AQI colors, callsign hashes). The panel itself is RGB565, so the
//! render adapter narrows with [`to_display`] at the last moment.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

/// Pure white. Default face color.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure yellow. Used for the "can't fetch" confused face.
pub const YELLOW: Rgb888 = Rgb888::YELLOW;

/// Magenta.
pub const MAGENTA: Rgb888 = Rgb888::MAGENTA;

/// Cyan.
pub const CYAN: Rgb888 = Rgb888::CYAN;

/// Pure red.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure green.
pub const GREEN: Rgb888 = Rgb888::GREEN;

/// Pure blue.
pub const BLUE: Rgb888 = Rgb888::BLUE;

/// Build a color from a `0xRRGGBB` integer. Bits above 24 are ignored.
#[inline]
pub const fn rgb(hex: u32) -> Rgb888 {
    Rgb888::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Pack a color back into a `0xRRGGBB` integer.
#[inline]
pub fn to_hex(color: Rgb888) -> u32 {
    (u32::from(color.r()) << 16) | (u32::from(color.g()) << 8) | u32::from(color.b())
}

/// Parse a `#RRGGBB` (or bare `RRGGBB`) string.
pub fn parse_hex(text: &str) -> Option<Rgb888> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(rgb)
}

/// Narrow a face color to the panel's RGB565 format.
#[inline]
pub fn to_display(color: Rgb888) -> Rgb565 {
    Rgb565::from(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_roundtrip_constants() {
        assert_eq!(rgb(0xff_ff_ff), WHITE);
        assert_eq!(rgb(0xff_ff_00), YELLOW);
        assert_eq!(to_hex(MAGENTA), 0xff_00_ff);
    }

    #[test]
    fn test_rgb_ignores_high_bits() {
        assert_eq!(rgb(0xab_00_00_ff), BLUE);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#00e400"), Some(Rgb888::new(0x00, 0xe4, 0x00)));
        assert_eq!(parse_hex("ff0000"), Some(RED));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex("#+fffff"), None);
        assert_eq!(parse_hex("-00000"), None);
    }

    #[test]
    fn test_to_display_extremes() {
        assert_eq!(to_display(WHITE), Rgb565::WHITE);
        assert_eq!(to_display(rgb(0)), Rgb565::BLACK);
    }
}
