use std::fmt;

use crate::foundation::error::{GlyphError, GlyphResult};

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black, the default object and background color.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white, the default lighten target.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    ///
    /// `field` names the offending parameter in the error message.
    pub fn parse_hex(s: &str, field: &str) -> GlyphResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GlyphError::validation(format!(
                "{field} must be a 6-digit hex color like #1a2b3c (got \"{s}\")"
            )));
        }

        let hex_byte = |pair: &str| {
            u8::from_str_radix(pair, 16).map_err(|_| {
                GlyphError::validation(format!("{field} has invalid hex byte \"{pair}\""))
            })
        };

        Ok(Self {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
        })
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build a color from floating-point channels, rounding and clamping into `0..=255`.
    pub(crate) fn from_f64(r: f64, g: f64, b: f64) -> Self {
        fn to_u8(x: f64) -> u8 {
            if x.is_nan() {
                return 0;
            }
            x.round().clamp(0.0, 255.0) as u8
        }
        Self {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
        }
    }

    pub(crate) fn channels(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Rec. 601 luma in `0..=255`, used to compare brightness.
    pub fn luma(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Validate a user color string and return its normalized `#rrggbb` form.
pub fn normalize_hex(s: &str, field: &str) -> GlyphResult<String> {
    Rgb::parse_hex(s, field).map(Rgb::to_hex)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
