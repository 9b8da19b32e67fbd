//! Everything known about one palette color in one gamut.

use std::fmt;

use crate::color::{to_byte, Color, Oklch};
use crate::convert::EncodedValue;
use crate::format::number;
use crate::gamut::Gamut;

/// A color report: the authored value, its fitted encodings, whether it
/// needed fitting, and how much chroma the gamut has room for at its
/// lightness and hue.
///
/// `Display` writes a single-line JSON object:
///
/// ```text
/// {"raw": "oklch(0.6 0.2 30)", "gamut": "srgb", "oklch": "oklch(0.6 0.2 30)",
///  "css": "rgb(222 62 45)", "hex": "#de3e2d", "in_gamut": true, "max_chroma": 0.2406}
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorInfo {
    /// The color as authored
    pub raw: Color,
    /// Gamut the encodings are fitted into
    pub gamut: Gamut,
    /// Fitted coordinates at printed precision
    pub oklch: Oklch,
    /// Fitted 8-bit sRGB
    pub rgb: [u8; 3],
    /// Whether `raw` was displayable without fitting
    pub in_gamut: bool,
    /// Largest displayable chroma at the authored lightness and hue,
    /// rounded down to printed precision
    pub max_chroma: f64,
}

impl ColorInfo {
    /// The fitted color in hex.
    pub fn hex(&self) -> EncodedValue {
        EncodedValue::Hex {
            rgb: self.rgb,
            alpha: self.raw.alpha().map(to_byte),
        }
    }

    /// The fitted color in CSS `rgb()` notation.
    pub fn css(&self) -> EncodedValue {
        EncodedValue::CssRgb {
            rgb: self.rgb,
            alpha: self.raw.alpha(),
        }
    }

    /// The fitted perceptual coordinates.
    pub fn fitted(&self) -> EncodedValue {
        EncodedValue::Oklch {
            lch: self.oklch,
            alpha: self.raw.alpha(),
        }
    }
}

impl fmt::Display for ColorInfo {
    // Every string field comes from our own encoders and never needs
    // JSON escaping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"raw": "{}", "gamut": "{}", "oklch": "{}", "css": "{}", "hex": "{}", "in_gamut": {}, "max_chroma": {}}}"#,
            self.raw,
            self.gamut.name(),
            self.fitted(),
            self.css(),
            self.hex(),
            self.in_gamut,
            number(self.max_chroma, 4)
        )
    }
}
