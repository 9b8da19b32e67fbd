#![allow(clippy::excessive_precision)]

//! oklch-gamut: OKLCH colors fitted into displayable gamuts
//!
//! Colors are authored in Oklch, a perceptually uniform polar space, and
//! converted into the encodings theme files need (hex, CSS, Display P3,
//! ...). Colors that the target gamut cannot show are fitted by reducing
//! chroma while holding lightness and hue fixed.
//!
//! # Quick Start
//!
//! ```
//! use oklch_gamut::{convert, Color, Representation};
//!
//! let red: Color = "oklch(0.6 0.2 30)".parse().unwrap();
//! let hex = convert(&red, Representation::Hex);
//! assert_eq!(hex.to_string().len(), 7);
//! ```
//!
//! # Gamut Fitting
//!
//! [`fit`] bisects chroma between zero and the requested value, testing
//! membership in linear light at every step, and returns the in-gamut end
//! of the final bracket:
//!
//! ```
//! use oklch_gamut::{fit, FitOutcome, Gamut, Oklch};
//!
//! let fitted = fit(Oklch::new(0.6, 0.4, 140.0), Gamut::Srgb);
//! assert!(Gamut::Srgb.contains(fitted.lch));
//! assert!(matches!(fitted.outcome, FitOutcome::ChromaReduced { .. }));
//! ```
//!
//! Clipping each RGB channel independently would be cheaper, but it moves
//! hue (an orange drifts toward yellow as red saturates). Lightness and
//! hue are what a palette author actually designs, so chroma gives way.
//!
//! When even zero chroma is outside the gamut (lightness beyond 0 or 1),
//! lightness is pulled toward mid grey instead and the outcome is reported
//! as [`FitOutcome::LightnessClamped`].
//!
//! Printed `oklch(...)` values are rounded to four decimals; the fitted
//! chroma is stepped down after rounding so the text itself stays inside.
//!
//! # Color Spaces
//!
//! - [`Color`]: authored value, Oklch plus optional alpha
//! - [`Oklch`] / [`Oklab`]: perceptual coordinates
//! - [`LinearRgb`] / [`LinearDisplayP3`]: linear light, where gamut
//!   membership is tested
//! - [`Srgb`]: gamma-encoded output

pub mod color;
pub mod convert;
pub mod error;
mod format;
pub mod gamut;
pub mod info;
pub mod representation;


pub use color::{normalize_hue, Color, ColorKey, LinearDisplayP3, LinearRgb, Oklab, Oklch, Srgb};
pub use convert::{convert, convert_with_outcome, Conversion, EncodedValue};
pub use error::{ParseColorError, ParseRepresentationError};
pub use gamut::{
    fit, Fit, FitOutcome, Gamut, CHROMA_TOLERANCE, GAMUT_EPSILON, MAX_CHROMA_SEARCH, MAX_ITERATIONS,
};
pub use info::ColorInfo;
pub use representation::Representation;
