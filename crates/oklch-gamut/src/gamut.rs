//! Gamut membership and hue-preserving gamut fitting.
//!
//! An Oklch color is inside a gamut when its linear channels in that
//! gamut's RGB space all land in 0.0..=1.0. Fitting an outside color holds
//! lightness and hue fixed and bisects chroma down toward zero until the
//! largest in-gamut chroma is bracketed within [`CHROMA_TOLERANCE`].
//! Per-channel clipping would be cheaper but shifts hue.

use crate::color::{LinearDisplayP3, LinearRgb, Oklab, Oklch};

/// Slack allowed on each linear channel before a color counts as outside.
pub const GAMUT_EPSILON: f64 = 1e-6;

/// Width of the chroma bracket at which bisection stops.
pub const CHROMA_TOLERANCE: f64 = 1e-5;

/// Hard cap on bisection steps for both the chroma search and the
/// lightness fallback.
pub const MAX_ITERATIONS: u32 = 20;

/// Lightness that is always in gamut at zero chroma (mid grey).
const NEUTRAL_LIGHTNESS: f64 = 0.5;

/// Upper end of the search in [`Gamut::max_chroma`]; above anything
/// Display P3 can show.
pub const MAX_CHROMA_SEARCH: f64 = 0.4;

/// A bounded RGB output gamut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gamut {
    /// Standard sRGB primaries
    Srgb,
    /// Display P3 primaries (wider than sRGB)
    DisplayP3,
}

impl Gamut {
    /// Whether `lch` is displayable in this gamut.
    pub fn contains(self, lch: Oklch) -> bool {
        let linear = LinearRgb::from(Oklab::from(lch));
        match self {
            Gamut::Srgb => linear.in_unit_cube(GAMUT_EPSILON),
            Gamut::DisplayP3 => LinearDisplayP3::from(linear).in_unit_cube(GAMUT_EPSILON),
        }
    }

    /// Largest chroma this gamut can show at lightness `l` and hue `h`,
    /// searched up to [`MAX_CHROMA_SEARCH`]. Zero when `l` is outside the
    /// gamut altogether.
    pub fn max_chroma(self, l: f64, h: f64) -> f64 {
        let widest = fit(Oklch::new(l, MAX_CHROMA_SEARCH, h), self);
        match widest.outcome {
            FitOutcome::LightnessClamped { .. } => 0.0,
            FitOutcome::InGamut | FitOutcome::ChromaReduced { .. } => widest.lch.c,
        }
    }

    /// The CSS color space name.
    pub fn name(self) -> &'static str {
        match self {
            Gamut::Srgb => "srgb",
            Gamut::DisplayP3 => "display-p3",
        }
    }
}

/// What fitting had to do to bring a color into gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// Already in gamut; coordinates untouched.
    InGamut,
    /// Chroma was reduced; lightness and hue are unchanged.
    ChromaReduced {
        /// Requested chroma
        original: f64,
        /// Largest in-gamut chroma found
        fitted: f64,
    },
    /// Even zero chroma was outside the gamut, so lightness was pulled
    /// toward mid grey. Degraded, but still deterministic.
    LightnessClamped {
        /// Requested lightness
        original_lightness: f64,
        /// Lightness actually used
        fitted_lightness: f64,
    },
}

impl FitOutcome {
    /// Whether the degraded lightness fallback was used.
    pub fn is_degraded(&self) -> bool {
        matches!(self, FitOutcome::LightnessClamped { .. })
    }
}

/// An in-gamut color together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// In-gamut coordinates
    pub lch: Oklch,
    /// What was changed
    pub outcome: FitOutcome,
}

/// Fit `lch` into `gamut`, preserving lightness and hue.
///
/// In-gamut input is returned bit-for-bit. Otherwise chroma is bisected
/// between 0.0 (known inside) and the requested value (known outside); the
/// inside end of the final bracket is returned, so the result is always
/// in gamut. If zero chroma is already outside, lightness is bisected
/// toward mid grey instead and the chroma is dropped to zero.
///
/// The function is pure and deterministic.
///
/// # Example
///
/// ```
/// use oklch_gamut::{fit, FitOutcome, Gamut, Oklch};
///
/// let vivid_green = Oklch::new(0.6, 0.4, 140.0);
/// let fitted = fit(vivid_green, Gamut::Srgb);
///
/// assert!(fitted.lch.c < 0.4);
/// assert_eq!(fitted.lch.l, 0.6);
/// assert_eq!(fitted.lch.h, 140.0);
/// assert!(matches!(fitted.outcome, FitOutcome::ChromaReduced { .. }));
/// ```
pub fn fit(lch: Oklch, gamut: Gamut) -> Fit {
    if gamut.contains(lch) {
        return Fit {
            lch,
            outcome: FitOutcome::InGamut,
        };
    }

    let gray = lch.with_chroma(0.0);
    if !gamut.contains(gray) {
        let l = fit_lightness(lch.l, gamut);
        return Fit {
            lch: gray.with_lightness(l),
            outcome: FitOutcome::LightnessClamped {
                original_lightness: lch.l,
                fitted_lightness: l,
            },
        };
    }

    let mut inside = 0.0;
    let mut outside = lch.c;
    for _ in 0..MAX_ITERATIONS {
        if outside - inside <= CHROMA_TOLERANCE {
            break;
        }
        let mid = (inside + outside) / 2.0;
        if gamut.contains(lch.with_chroma(mid)) {
            inside = mid;
        } else {
            outside = mid;
        }
    }

    Fit {
        lch: lch.with_chroma(inside),
        outcome: FitOutcome::ChromaReduced {
            original: lch.c,
            fitted: inside,
        },
    }
}

/// Bisect achromatic lightness between `l` (outside) and mid grey (inside).
fn fit_lightness(l: f64, gamut: Gamut) -> f64 {
    let mut inside = NEUTRAL_LIGHTNESS;
    let mut outside = l;
    for _ in 0..MAX_ITERATIONS {
        let mid = (inside + outside) / 2.0;
        if gamut.contains(Oklch::new(mid, 0.0, 0.0)) {
            inside = mid;
        } else {
            outside = mid;
        }
    }
    inside
}
