//! sRGB color value used by every color curve.
//!
//! Channels are kept as unrounded `f32` in `0.0..=255.0` so that mixing is
//! exact; rounding to bytes happens only when a color is painted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ColorParseError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255.0,
        g: 255.0,
        b: 255.0,
    };
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
        }
    }

    /// Per-channel linear mix: `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Rounded, clamped byte channels.
    pub fn to_bytes(self) -> (u8, u8, u8) {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Relative luminance approximation in `0.0..=1.0`.
    pub fn luma(self) -> f32 {
        (0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b) / 255.0
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match hex.len() {
            6 => Ok(Rgb::new(
                channel(0..2).map_err(|_| err())?,
                channel(2..4).map_err(|_| err())?,
                channel(4..6).map_err(|_| err())?,
            )),
            3 => {
                // #abc → #aabbcc
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Rgb::new(
                    short(0).map_err(|_| err())?,
                    short(1).map_err(|_| err())?,
                    short(2).map_err(|_| err())?,
                ))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_bytes();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#f8fafc", Rgb::new(0xf8, 0xfa, 0xfc))]
    #[case("#4338CA", Rgb::new(0x43, 0x38, 0xca))]
    #[case("#fff", Rgb::WHITE)]
    #[case("  #000000 ", Rgb::BLACK)]
    fn parses_hex(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(input.parse::<Rgb>().unwrap(), expected);
    }

    #[rstest]
    #[case("f8fafc")]
    #[case("#f8fa")]
    #[case("#gggggg")]
    #[case("#")]
    #[case("#ффф")]
    fn rejects_malformed(#[case] input: &str) {
        assert!(input.parse::<Rgb>().is_err());
    }

    #[test]
    fn display_round_trips_through_hex() {
        let c: Rgb = "#312e81".parse().unwrap();
        assert_eq!(c.to_string(), "#312e81");
    }

    #[test]
    fn midpoint_of_white_and_black_is_unrounded() {
        let mid = Rgb::WHITE.mix(Rgb::BLACK, 0.5);
        assert_eq!(mid, Rgb { r: 127.5, g: 127.5, b: 127.5 });
        assert_eq!(mid.to_bytes(), (128, 128, 128));
    }
}
