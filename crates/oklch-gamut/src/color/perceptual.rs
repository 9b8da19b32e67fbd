//! The authored color value: Oklch coordinates plus optional alpha.

use std::fmt;
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::oklab::Oklab;
use super::oklch::Oklch;
use super::srgb::{check_hex_digits, Srgb};
use crate::error::ParseColorError;
use crate::format::number;

/// An immutable perceptual color as written in a palette.
///
/// Lightness is expected in 0.0..=1.0 and chroma to be non-negative;
/// chroma has no upper bound since perceptual chroma can exceed any
/// display gamut. The hue is normalized modulo 360 on construction.
///
/// # Example
///
/// ```
/// use oklch_gamut::Color;
///
/// let red = Color::new(0.6, 0.2, 30.0);
/// let same: Color = "oklch(60% 0.2 390deg)".parse().unwrap();
/// assert_eq!(red, same);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    lch: Oklch,
    alpha: Option<f64>,
}

/// Exact-value identity of a [`Color`], usable as a hash map key.
///
/// Two colors share a key only when every coordinate has the same bit
/// pattern, so a palette that changes a color never hits a stale entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorKey {
    l: u64,
    c: u64,
    h: u64,
    alpha: Option<u64>,
}

impl Color {
    /// Create an opaque color from lightness, chroma and hue (degrees).
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        debug_assert!(c >= 0.0 || c.is_nan(), "negative chroma {c}");
        Self {
            lch: Oklch::new(l, c, h),
            alpha: None,
        }
    }

    /// Same coordinates with an alpha channel (0.0..=1.0).
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    /// Same hue and alpha with a different lightness and chroma.
    #[inline]
    pub fn with_lightness_chroma(self, l: f64, c: f64) -> Self {
        Self {
            lch: Oklch::new(l, c, self.lch.h),
            ..self
        }
    }

    /// The polar coordinates.
    #[inline]
    pub fn lch(&self) -> Oklch {
        self.lch
    }

    /// Lightness (0.0..=1.0).
    #[inline]
    pub fn lightness(&self) -> f64 {
        self.lch.l
    }

    /// Chroma (>= 0.0).
    #[inline]
    pub fn chroma(&self) -> f64 {
        self.lch.c
    }

    /// Hue in degrees (0.0..360.0).
    #[inline]
    pub fn hue(&self) -> f64 {
        self.lch.h
    }

    /// Alpha channel, if any.
    #[inline]
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    /// Bit-exact key for memoization.
    pub fn key(&self) -> ColorKey {
        ColorKey {
            l: self.lch.l.to_bits(),
            c: self.lch.c.to_bits(),
            h: self.lch.h.to_bits(),
            alpha: self.alpha.map(f64::to_bits),
        }
    }
}

impl From<Oklch> for Color {
    fn from(lch: Oklch) -> Self {
        Self::new(lch.l, lch.c, lch.h)
    }
}

impl From<Srgb> for Color {
    /// Convert an sRGB color to its perceptual coordinates.
    fn from(srgb: Srgb) -> Self {
        Self::from(Oklch::from(Oklab::from(LinearRgb::from(srgb))))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lch = self.lch;
        match self.alpha {
            Some(alpha) => write!(
                f,
                "oklch({} {} {} / {})",
                number(lch.l, 4),
                number(lch.c, 4),
                number(lch.h, 2),
                number(alpha, 3)
            ),
            None => write!(f, "{lch}"),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `oklch(L C H)`, `oklch(L C H / A)` or a hex color.
    ///
    /// Lightness and alpha accept percentages, hue accepts a `deg` suffix.
    /// Hex colors (`#rgb`, `#rrggbb`, `#rrggbbaa`) are converted from sRGB.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(body) = s
            .strip_prefix("oklch(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return parse_hex(s);
        };

        let (coords, alpha) = match body.split_once('/') {
            Some((coords, alpha)) => (coords, Some(alpha.trim())),
            None => (body, None),
        };
        let parts: Vec<&str> = coords.split_whitespace().collect();
        let [l, c, h] = parts[..] else {
            return Err(ParseColorError::InvalidSyntax(s.to_string()));
        };

        let l = checked("lightness", percentage(l)?, 0.0, 1.0)?;
        let c = checked("chroma", c.parse::<f64>()?, 0.0, f64::INFINITY)?;
        let h = checked(
            "hue",
            h.strip_suffix("deg").unwrap_or(h).parse::<f64>()?,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )?;

        let color = Self::new(l, c, h);
        match alpha {
            Some(a) => Ok(color.with_alpha(checked("alpha", percentage(a)?, 0.0, 1.0)?)),
            None => Ok(color),
        }
    }
}

fn parse_hex(s: &str) -> Result<Color, ParseColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() == 8 {
        check_hex_digits(digits)?;
        let alpha = u8::from_str_radix(&digits[6..8], 16)?;
        let srgb: Srgb = digits[..6].parse()?;
        return Ok(Color::from(srgb).with_alpha(f64::from(alpha) / 255.0));
    }
    // Without a '#' the input may be any unknown notation
    let srgb: Srgb = s.parse().map_err(|e| match e {
        ParseColorError::InvalidLength | ParseColorError::InvalidHexDigit(_)
            if !s.starts_with('#') =>
        {
            ParseColorError::InvalidSyntax(s.to_string())
        }
        other => other,
    })?;
    Ok(Color::from(srgb))
}

fn percentage(s: &str) -> Result<f64, ParseColorError> {
    match s.strip_suffix('%') {
        Some(pct) => Ok(pct.parse::<f64>()? / 100.0),
        None => Ok(s.parse()?),
    }
}

fn checked(component: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ParseColorError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParseColorError::OutOfRange { component, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_oklch() {
        let color: Color = "oklch(0.6 0.2 30)".parse().unwrap();
        assert_eq!(color, Color::new(0.6, 0.2, 30.0));
        assert_eq!(color.alpha(), None);
    }

    #[test]
    fn test_parse_percent_deg_and_alpha() {
        let color: Color = " oklch(60% 0.2 -330deg / 50%) ".parse().unwrap();
        assert!((color.lightness() - 0.6).abs() < 1e-12);
        assert!((color.hue() - 30.0).abs() < 1e-9);
        assert_eq!(color.alpha(), Some(0.5));
    }

    #[test]
    fn test_parse_hex() {
        let white: Color = "#ffffff".parse().unwrap();
        assert!((white.lightness() - 1.0).abs() < 1e-6);
        assert!(white.chroma() < 1e-6);

        let translucent: Color = "#ff000080".parse().unwrap();
        assert!((translucent.alpha().unwrap() - 128.0 / 255.0).abs() < 1e-12);
        assert!((translucent.hue() - 29.23).abs() < 0.1);
    }

    #[test]
    fn test_parse_hex_rejects_signs() {
        assert!(matches!(
            "#+f+f+f".parse::<Color>(),
            Err(ParseColorError::InvalidHexDigit('+'))
        ));
        assert!(matches!(
            "#ffffff+f".parse::<Color>(),
            Err(ParseColorError::InvalidHexDigit('+'))
        ));
        assert!(matches!(
            "#ff00".parse::<Color>(),
            Err(ParseColorError::InvalidLength)
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            "oklch(1.2 0.1 30)".parse::<Color>(),
            Err(ParseColorError::OutOfRange {
                component: "lightness",
                ..
            })
        ));
        assert!(matches!(
            "oklch(0.5 -0.1 30)".parse::<Color>(),
            Err(ParseColorError::OutOfRange {
                component: "chroma",
                ..
            })
        ));
        assert!(matches!(
            "oklch(0.5 0.1 NaN)".parse::<Color>(),
            Err(ParseColorError::OutOfRange { component: "hue", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "oklch(0.5 0.1)".parse::<Color>(),
            Err(ParseColorError::InvalidSyntax(_))
        ));
        assert!(matches!(
            "rebeccapurple".parse::<Color>(),
            Err(ParseColorError::InvalidSyntax(_))
        ));
        assert!(matches!(
            "oklch(0.5 abc 30)".parse::<Color>(),
            Err(ParseColorError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_key_is_exact() {
        let a = Color::new(0.6, 0.2, 30.0);
        assert_eq!(a.key(), Color::new(0.6, 0.2, 390.0).key());
        assert_ne!(a.key(), Color::new(0.6, 0.2000001, 30.0).key());
        assert_ne!(a.key(), a.with_alpha(1.0).key());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Color::new(0.6, 0.2, 30.0).with_alpha(0.5);
        assert_eq!(color.to_string(), "oklch(0.6 0.2 30 / 0.5)");
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }
}
