//! Pure conversion of a [`Color`] into an encoded, in-gamut value.

use std::fmt;

use crate::color::{to_byte, Color, LinearDisplayP3, LinearRgb, Oklab, Oklch, Srgb, LC_DECIMALS};
use crate::format::number;
use crate::gamut::{fit, Fit, FitOutcome, Gamut};
use crate::info::ColorInfo;
use crate::representation::Representation;

/// A color encoded for one [`Representation`].
///
/// `Display` renders the text that ends up in a theme file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodedValue {
    /// 8-bit sRGB with optional 8-bit alpha, shown as hex
    Hex { rgb: [u8; 3], alpha: Option<u8> },
    /// 8-bit sRGB shown as a comma separated triple
    Rgb8([u8; 3]),
    /// 8-bit sRGB in CSS functional notation
    CssRgb { rgb: [u8; 3], alpha: Option<f64> },
    /// Gamma-encoded Display P3 channels in 0.0..=1.0
    DisplayP3 { rgb: [f64; 3], alpha: Option<f64> },
    /// Perceptual coordinates, fitted or raw
    Oklch { lch: Oklch, alpha: Option<f64> },
    /// Full report on the color, shown as a JSON object
    Info(ColorInfo),
}

impl EncodedValue {
    /// The sRGB bytes, for the byte-based encodings.
    pub fn rgb8(&self) -> Option<[u8; 3]> {
        match *self {
            EncodedValue::Hex { rgb, .. }
            | EncodedValue::Rgb8(rgb)
            | EncodedValue::CssRgb { rgb, .. } => Some(rgb),
            EncodedValue::Info(info) => Some(info.rgb),
            EncodedValue::DisplayP3 { .. } | EncodedValue::Oklch { .. } => None,
        }
    }
}

impl fmt::Display for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EncodedValue::Hex { rgb: [r, g, b], alpha } => {
                write!(f, "#{r:02x}{g:02x}{b:02x}")?;
                if let Some(a) = alpha {
                    write!(f, "{a:02x}")?;
                }
                Ok(())
            }
            EncodedValue::Rgb8([r, g, b]) => write!(f, "{r}, {g}, {b}"),
            EncodedValue::CssRgb { rgb: [r, g, b], alpha } => match alpha {
                Some(a) => write!(f, "rgb({r} {g} {b} / {})", number(a, 3)),
                None => write!(f, "rgb({r} {g} {b})"),
            },
            EncodedValue::DisplayP3 { rgb: [r, g, b], alpha } => {
                write!(
                    f,
                    "color(display-p3 {} {} {}",
                    number(r, 4),
                    number(g, 4),
                    number(b, 4)
                )?;
                if let Some(a) = alpha {
                    write!(f, " / {}", number(a, 3))?;
                }
                f.write_str(")")
            }
            EncodedValue::Oklch { lch, alpha } => match alpha {
                Some(a) => write!(f, "{}", Color::from(lch).with_alpha(a)),
                None => write!(f, "{lch}"),
            },
            EncodedValue::Info(info) => write!(f, "{info}"),
        }
    }
}

/// An encoded value together with what fitting had to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// The encoded, in-gamut value
    pub value: EncodedValue,
    /// `None` for [`Representation::Raw`], which is never fitted
    pub outcome: Option<FitOutcome>,
}

/// Convert `color` into `representation`, fitting it into the
/// representation's gamut first.
///
/// # Example
///
/// ```
/// use oklch_gamut::{convert, Color, Representation};
///
/// let red = Color::new(0.6, 0.2, 30.0);
/// let hex = convert(&red, Representation::Hex).to_string();
/// assert_eq!(hex.len(), 7);
/// assert!(hex.starts_with('#'));
/// ```
#[inline]
pub fn convert(color: &Color, representation: Representation) -> EncodedValue {
    convert_with_outcome(color, representation).value
}

/// Like [`convert`], but also report the [`FitOutcome`] so callers can
/// warn about lossy fits.
pub fn convert_with_outcome(color: &Color, representation: Representation) -> Conversion {
    let alpha = color.alpha();
    let Some(gamut) = representation.gamut() else {
        return Conversion {
            value: EncodedValue::Oklch {
                lch: color.lch(),
                alpha,
            },
            outcome: None,
        };
    };

    let fitted = match representation {
        Representation::Oklch | Representation::Info => fit_printed(color.lch(), gamut),
        _ => fit(color.lch(), gamut),
    };
    let linear = LinearRgb::from(Oklab::from(fitted.lch));
    let value = match representation {
        Representation::Hex => EncodedValue::Hex {
            rgb: Srgb::from(linear).to_bytes(),
            alpha: alpha.map(to_byte),
        },
        Representation::Rgb8 => EncodedValue::Rgb8(Srgb::from(linear).to_bytes()),
        Representation::Css => EncodedValue::CssRgb {
            rgb: Srgb::from(linear).to_bytes(),
            alpha,
        },
        Representation::DisplayP3 => EncodedValue::DisplayP3 {
            rgb: LinearDisplayP3::from(linear).encode(),
            alpha,
        },
        Representation::Oklch | Representation::Raw => EncodedValue::Oklch {
            lch: fitted.lch,
            alpha,
        },
        Representation::Info => EncodedValue::Info(ColorInfo {
            raw: *color,
            gamut,
            oklch: fitted.lch,
            rgb: Srgb::from(linear).to_bytes(),
            in_gamut: gamut.contains(color.lch()),
            max_chroma: round_down(gamut.max_chroma(color.lightness(), color.hue())),
        }),
    };

    Conversion {
        value,
        outcome: Some(fitted.outcome),
    }
}

/// Fit `lch` so that its printed coordinates are in gamut as well.
///
/// Lightness is clamped to 0.0..=1.0 and rounded together with hue before
/// fitting. The fitted chroma is rounded and then stepped down one printed
/// unit at a time until the rounded value is inside.
fn fit_printed(lch: Oklch, gamut: Gamut) -> Fit {
    let target = Oklch::new(lch.l.clamp(0.0, 1.0), lch.c, lch.h).quantized();
    let fitted = fit(target, gamut);

    let scale = 10f64.powi(LC_DECIMALS as i32);
    let mut units = (fitted.lch.c * scale).round();
    let mut printed = fitted.lch.quantized();
    while units > 0.0 && !gamut.contains(printed) {
        units -= 1.0;
        printed = printed.with_chroma(units / scale);
    }

    let outcome = if !(0.0..=1.0).contains(&lch.l) {
        FitOutcome::LightnessClamped {
            original_lightness: lch.l,
            fitted_lightness: printed.l,
        }
    } else if printed.c < target.c {
        FitOutcome::ChromaReduced {
            original: lch.c,
            fitted: printed.c,
        }
    } else {
        FitOutcome::InGamut
    };

    Fit {
        lch: printed,
        outcome,
    }
}

fn round_down(value: f64) -> f64 {
    let scale = 10f64.powi(LC_DECIMALS as i32);
    (value * scale).floor() / scale
}
