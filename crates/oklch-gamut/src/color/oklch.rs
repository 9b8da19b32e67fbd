//! Oklch polar color space
//!
//! Oklch is the polar form of Oklab, representing colors as:
//! - **L** (Lightness): Same as Oklab L
//! - **C** (Chroma): Colorfulness (distance from the neutral axis)
//! - **h** (Hue): Hue angle in degrees, 0.0..360.0
//!
//! Gamut fitting only ever moves C, so holding L and h fixed keeps the
//! perceived lightness and hue of a color intact.

use std::fmt;

use super::oklab::Oklab;
use crate::format::{number, round_to};

/// Fractional digits printed for lightness and chroma.
pub(crate) const LC_DECIMALS: usize = 4;
/// Fractional digits printed for hue.
pub(crate) const HUE_DECIMALS: usize = 2;

/// Oklch: Polar form of Oklab (Lightness, Chroma, Hue in degrees).
///
/// For achromatic colors (c near zero), hue is undefined. Conversion from
/// Oklab sets h to 0.0 in that case, which is harmless since a zero chroma
/// vector has no direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white)
    pub l: f64,
    /// Chroma: distance from neutral axis (0.0 = gray)
    pub c: f64,
    /// Hue: angle in degrees, normalized to 0.0..360.0
    pub h: f64,
}

impl Oklch {
    /// Create a new Oklch color. The hue is normalized modulo 360.
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self {
            l,
            c,
            h: normalize_hue(h),
        }
    }

    /// Same lightness and hue, different chroma.
    #[inline]
    pub fn with_chroma(self, c: f64) -> Self {
        Self { c, ..self }
    }

    /// Same chroma and hue, different lightness.
    #[inline]
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    /// Coordinates rounded to the precision `Display` prints, so that
    /// the printed text parses back to exactly this value.
    pub fn quantized(self) -> Self {
        Self::new(
            round_to(self.l, LC_DECIMALS),
            round_to(self.c, LC_DECIMALS),
            round_to(self.h, HUE_DECIMALS),
        )
    }

    /// Shortest angular distance between two hues, in degrees (0.0..=180.0).
    pub fn hue_distance(self, other: Oklch) -> f64 {
        let d = (self.h - other.h).rem_euclid(360.0);
        d.min(360.0 - d)
    }
}

/// Fold any hue angle into 0.0..360.0.
///
/// `-0.0` folds to `0.0` and values that round up to 360.0 wrap to 0.0,
/// so equal hues always share the same bit pattern.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0) + 0.0;
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

impl From<Oklab> for Oklch {
    /// Convert from Oklab to Oklch (Cartesian to polar).
    fn from(lab: Oklab) -> Self {
        let c = lab.a.hypot(lab.b);
        // atan2(0, 0) is 0.0, so achromatic colors get hue 0
        let h = lab.b.atan2(lab.a).to_degrees();
        Self::new(lab.l, c, h)
    }
}

impl From<Oklch> for Oklab {
    /// Convert from Oklch to Oklab (polar to Cartesian).
    fn from(lch: Oklch) -> Self {
        let h = lch.h.to_radians();
        Self::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
    }
}

impl fmt::Display for Oklch {
    /// CSS Color 4 notation, e.g. `oklch(0.6 0.2 30)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "oklch({} {} {})",
            number(self.l, LC_DECIMALS),
            number(self.c, LC_DECIMALS),
            number(self.h, HUE_DECIMALS)
        )
    }
}
