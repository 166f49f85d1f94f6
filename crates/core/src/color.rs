//! The 8-bit RGBA color type used for ink.
//!
//! Drops carry their color as four 8-bit channels; all blending operations
//! interpolate component-wise in that space. Serializes as a hex string
//! (`"#rrggbb"` for opaque colors, `"#rrggbbaa"` otherwise) for
//! human-readable formats.

use crate::error::MarblingError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit RGBA ink color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Creates a color from four 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba { r, g, b, a: 255 }
    }

    /// Parses a hex color string like `"#2d3748"` or `"#2d3748cc"`
    /// (case insensitive, leading `#` optional). Six digits imply an
    /// alpha of 255.
    ///
    /// Returns `MarblingError::InvalidColor` if the input is not a valid
    /// 6- or 8-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgba, MarblingError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(MarblingError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {:?}",
                hex
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| MarblingError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            255
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats the color as a hex string: `"#rrggbb"` when fully opaque,
    /// `"#rrggbbaa"` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Component-wise linear interpolation toward `target`.
    ///
    /// `t` is clamped to [0, 1]; each channel is rounded to the nearest
    /// 8-bit value, so `lerp(target, 1.0)` is exactly `target`.
    pub fn lerp(self, target: Rgba, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgba {
            r: mix(self.r, target.r),
            g: mix(self.g, target.g),
            b: mix(self.b, target.b),
            a: mix(self.a, target.a),
        }
    }

    /// Returns the same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba { a, ..self }
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
