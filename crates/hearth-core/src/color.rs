use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when turning color text into an [`Rgb`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("color '{text}' has {found} numeric components, expected 3")]
    MissingComponents { text: String, found: usize },
    #[error("color '{text}' channel value {value} exceeds 255")]
    ChannelOutOfRange { text: String, value: u64 },
    #[error("color '{0}' is not a #rrggbb hex value")]
    InvalidHex(String),
}

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse the first three integer runs out of `text`, e.g. `"rgb(45, 13, 1)"`.
    ///
    /// Any non-digit character separates tokens, so `"45 13 1"` and
    /// `"rgba(45,13,1,0)"` parse the same way. Extra tokens are ignored.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut channels = [0u8; 3];
        let mut found = 0;
        for token in text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|t| !t.is_empty())
        {
            if found == 3 {
                break;
            }
            // Digit runs too long for u64 are out of range by definition.
            let value: u64 = token.parse().unwrap_or(u64::MAX);
            if value > 255 {
                return Err(FormatError::ChannelOutOfRange {
                    text: text.to_string(),
                    value,
                });
            }
            channels[found] = value as u8;
            found += 1;
        }

        if found < 3 {
            return Err(FormatError::MissingComponents {
                text: text.to_string(),
                found,
            });
        }
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Parse `#rrggbb` hex notation (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Result<Self, FormatError> {
        let hex = text.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FormatError::InvalidHex(text.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| FormatError::InvalidHex(text.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation per channel: `round(a + t * (b - a))`.
    ///
    /// `t` is not clamped; results outside [0, 255] saturate.
    pub fn blend(self, other: Rgb, t: f64) -> Rgb {
        Rgb::new(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        )
    }

    /// CSS text for hosts that take color strings.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Free-function form of [`Rgb::blend`].
pub fn blend(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    c1.blend(c2, t)
}

/// Free-function form of [`Rgb::parse`].
pub fn parse(text: &str) -> Result<Rgb, FormatError> {
    Rgb::parse(text)
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = a as f64;
    let value = a + t * (b as f64 - a);
    // Halves round up; the cast saturates.
    (value + 0.5).floor() as u8
}

impl FromStr for Rgb {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with('#') {
            Rgb::from_hex(s)
        } else {
            Rgb::parse(s)
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
