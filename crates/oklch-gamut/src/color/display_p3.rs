//! Display P3 color types
//!
//! Display P3 shares the sRGB transfer curve and white point but has wider
//! primaries. Conversion goes through linear sRGB with a single 3x3 matrix.

use super::gamma;
use super::linear_rgb::LinearRgb;

/// A color in linear Display P3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDisplayP3 {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearDisplayP3 {
    /// Create a new linear Display P3 color.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Whether every channel lies within `0.0 - epsilon ..= 1.0 + epsilon`.
    #[inline]
    pub fn in_unit_cube(self, epsilon: f64) -> bool {
        LinearRgb::new(self.r, self.g, self.b).in_unit_cube(epsilon)
    }

    /// Gamma-encode to Display P3 channel values in 0.0..=1.0.
    pub fn encode(self) -> [f64; 3] {
        let c = LinearRgb::new(self.r, self.g, self.b).clamp_unit();
        [gamma::encode(c.r), gamma::encode(c.g), gamma::encode(c.b)]
    }
}

impl From<LinearRgb> for LinearDisplayP3 {
    fn from(rgb: LinearRgb) -> Self {
        Self {
            r: 0.822_462_1 * rgb.r + 0.177_538_0 * rgb.g,
            g: 0.033_194_1 * rgb.r + 0.966_805_8 * rgb.g,
            b: 0.017_082_7 * rgb.r + 0.072_397_4 * rgb.g + 0.910_519_9 * rgb.b,
        }
    }
}

impl From<LinearDisplayP3> for LinearRgb {
    fn from(p3: LinearDisplayP3) -> Self {
        Self {
            r: 1.224_940_1 * p3.r - 0.224_940_4 * p3.g,
            g: -0.042_056_9 * p3.r + 1.042_057_1 * p3.g,
            b: -0.019_637_6 * p3.r - 0.078_636_1 * p3.g + 1.098_273_5 * p3.b,
        }
    }
}
