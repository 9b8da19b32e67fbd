//! Linear RGB color type
//!
//! Linear sRGB is where gamut membership is decided: a color is
//! displayable exactly when every linear channel lies in 0.0..=1.0.

use super::gamma;
use super::srgb::Srgb;

/// A color in linear sRGB color space.
///
/// Values are typically in the range 0.0..=1.0, but conversions from
/// Oklab routinely leave that range for colors outside the sRGB gamut.
/// Nothing is clamped until [`clamp_unit`](Self::clamp_unit) is called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Whether every channel lies within `0.0 - epsilon ..= 1.0 + epsilon`.
    ///
    /// NaN channels are never inside.
    #[inline]
    pub fn in_unit_cube(self, epsilon: f64) -> bool {
        let range = -epsilon..=1.0 + epsilon;
        range.contains(&self.r) && range.contains(&self.g) && range.contains(&self.b)
    }

    /// Clamp every channel to 0.0..=1.0.
    #[inline]
    pub fn clamp_unit(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: gamma::decode(srgb.r),
            g: gamma::decode(srgb.g),
            b: gamma::decode(srgb.b),
        }
    }
}
