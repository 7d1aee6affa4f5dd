//! RGBA color value.

use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, HeatmapResult};

/// Color value in RGBA format, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `"#RRGGBB"` or `"#RRGGBBAA"` (leading `#` optional).
    pub fn from_hex(hex: &str) -> HeatmapResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(HeatmapError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| HeatmapError::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Same color with a replaced alpha channel.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Blend toward `other` by `bias` in `[0, 1]`.
    ///
    /// Each channel is `other * bias + self * (1 - bias)`, rounded to the
    /// nearest integer, so a bias of 0 returns `self` exactly.
    pub fn blend(self, other: Color, bias: f64) -> Color {
        let t = bias.clamp(0.0, 1.0);
        let mix = |low: u8, high: u8| -> u8 {
            (high as f64 * t + low as f64 * (1.0 - t))
                .round()
                .clamp(0.0, 255.0) as u8
        };

        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color::new(r, g, b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}
