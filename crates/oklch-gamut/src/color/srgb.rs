//! sRGB color type
//!
//! sRGB is the encoding theme files expect. It applies a gamma curve to
//! linear light values for perceptual uniformity.

use std::str::FromStr;

use super::gamma;
use super::linear_rgb::LinearRgb;
use crate::error::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f64,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f64,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f64,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use oklch_gamut::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    ///
    /// Rounds and clamps values to the 0..=255 range.
    ///
    /// # Example
    /// ```
    /// use oklch_gamut::Srgb;
    /// let color = Srgb::new(1.0, 0.5, 0.0);
    /// assert_eq!(color.to_bytes(), [255, 128, 0]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }
}

#[inline]
pub(crate) fn to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<LinearRgb> for Srgb {
    /// Gamma-encode linear light.
    ///
    /// Channels are clamped to 0.0..=1.0 first; callers fit to the gamut
    /// before encoding, so the clamp only absorbs rounding noise.
    fn from(linear: LinearRgb) -> Self {
        let c = linear.clamp_unit();
        Self {
            r: gamma::encode(c.r),
            g: gamma::encode(c.g),
            b: gamma::encode(c.b),
        }
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and trims surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use oklch_gamut::Srgb;
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.g, 0.0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !matches!(s.len(), 3 | 6) {
            return Err(ParseColorError::InvalidLength);
        }
        check_hex_digits(s)?;

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

/// `from_str_radix` tolerates a leading sign, so reject anything that is
/// not a hex digit up front.
pub(crate) fn check_hex_digits(s: &str) -> Result<(), ParseColorError> {
    match s.chars().find(|c| !c.is_ascii_hexdigit()) {
        Some(c) => Err(ParseColorError::InvalidHexDigit(c)),
        None => Ok(()),
    }
}
