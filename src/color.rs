//! Packed RGB color type and its canonical hex codec.
//!
//! [`Rgb`] is the pixel and palette currency of the whole crate: an 8-bit
//! triple whose canonical textual form is a lowercase `#rrggbb` string.
//! [`FromStr`] and [`Display`] implement the two directions of the codec,
//! and serde reuses the same textual form so grids and catalogs serialize
//! the way the surrounding layer expects them on the wire.

use std::fmt;
use std::str::FromStr;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// The string does not contain exactly 6 hex digits after stripping `#`.
    #[error("invalid hex color length (expected 6 digits)")]
    InvalidLength,
    /// A character outside `[0-9a-fA-F]` was encountered.
    #[error("invalid hex digit {0:?} in color string")]
    InvalidDigit(char),
}

/// An 8-bit-per-channel RGB color.
///
/// Canonical serialized form is the 7-character lowercase `#rrggbb` string.
/// Parsing accepts an optional leading `#` and is case-insensitive;
/// formatting always emits lowercase with the leading `#`, so
/// `hex.parse::<Rgb>()` followed by `to_string()` is a bijection over the
/// full 24-bit range.
///
/// # Example
///
/// ```
/// use stitchgrid::Rgb;
///
/// let c: Rgb = "#C1272D".parse().unwrap();
/// assert_eq!(c, Rgb::new(0xc1, 0x27, 0x2d));
/// assert_eq!(c.to_string(), "#c1272d");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Opaque white, the background that transparent source pixels
    /// composite onto.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The channels as a `[R, G, B]` array.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance to another color in RGB space.
    ///
    /// Squared distances order identically to linear ones, so nearest-color
    /// scans skip the square root.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a 6-digit hex string, with or without a leading
    /// `#`. Surrounding ASCII whitespace is trimmed; parsing is
    /// case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if s.chars().count() != 6 {
            return Err(ParseColorError::InvalidLength);
        }

        let mut packed = 0u32;
        for c in s.chars() {
            let digit = c.to_digit(16).ok_or(ParseColorError::InvalidDigit(c))?;
            packed = packed << 4 | digit;
        }

        Ok(Rgb::new(
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
        ))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
