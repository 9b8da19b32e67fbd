//! The closed set of output encodings a palette color can be rendered in.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseRepresentationError;
use crate::gamut::Gamut;

/// A target encoding for a color.
///
/// Every variant knows its gamut; [`Representation::Raw`] has none and is
/// passed through unfitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Representation {
    /// `#rrggbb`, or `#rrggbbaa` when the color has alpha
    #[default]
    Hex,
    /// `r, g, b` as decimal bytes
    Rgb8,
    /// CSS `rgb(r g b)` / `rgb(r g b / a)`
    Css,
    /// CSS `color(display-p3 r g b)`
    DisplayP3,
    /// Gamut-fitted `oklch(L C H)`
    Oklch,
    /// The authored `oklch(L C H)` coordinates, untouched
    Raw,
    /// A JSON object with the authored value, the fitted encodings,
    /// gamut membership and the largest displayable chroma
    Info,
}

impl Representation {
    /// Every representation, in declaration order.
    pub const ALL: [Representation; 7] = [
        Representation::Hex,
        Representation::Rgb8,
        Representation::Css,
        Representation::DisplayP3,
        Representation::Oklch,
        Representation::Raw,
        Representation::Info,
    ];

    /// The accepted names, parallel to [`Representation::ALL`].
    pub const NAMES: [&'static str; 7] = ["hex", "rgb8", "css", "display-p3", "oklch", "raw", "info"];

    /// The kebab-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Representation::Hex => "hex",
            Representation::Rgb8 => "rgb8",
            Representation::Css => "css",
            Representation::DisplayP3 => "display-p3",
            Representation::Oklch => "oklch",
            Representation::Raw => "raw",
            Representation::Info => "info",
        }
    }

    /// The gamut values are fitted into, or `None` for passthrough.
    pub fn gamut(self) -> Option<Gamut> {
        match self {
            Representation::Hex
            | Representation::Rgb8
            | Representation::Css
            | Representation::Oklch
            | Representation::Info => Some(Gamut::Srgb),
            Representation::DisplayP3 => Some(Gamut::DisplayP3),
            Representation::Raw => None,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Representation {
    type Err = ParseRepresentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Representation::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| ParseRepresentationError {
                name: s.to_string(),
            })
    }
}
