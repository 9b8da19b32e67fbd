//! Error types for color and representation parsing
//!
//! The crate has no dependencies, so these carry hand-written `Display`
//! and `Error` impls.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

/// Error type for parsing color strings.
///
/// Returned when a hex (`#rrggbb`) or functional (`oklch(L C H)`) color
/// string cannot be turned into a [`Color`](crate::Color).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length: 3 or 6 digits after stripping '#',
    /// or 8 with alpha where a [`Color`](crate::Color) is parsed
    InvalidLength,
    /// A character that is not a hex digit
    InvalidHexDigit(char),
    /// Hex digits that do not form a byte
    InvalidHex(ParseIntError),
    /// Not a recognized `oklch(...)` form
    InvalidSyntax(String),
    /// A numeric component could not be parsed
    InvalidNumber(ParseFloatError),
    /// A component is outside its valid range
    OutOfRange {
        /// Component name (lightness, chroma, hue, alpha)
        component: &'static str,
        /// Offending value
        value: f64,
    },
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl From<ParseFloatError> for ParseColorError {
    fn from(err: ParseFloatError) -> Self {
        ParseColorError::InvalidNumber(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3, 6 or 8 digits)")
            }
            ParseColorError::InvalidHexDigit(c) => write!(f, "invalid hex digit `{}`", c),
            ParseColorError::InvalidHex(err) => write!(f, "invalid hex byte: {}", err),
            ParseColorError::InvalidSyntax(s) => {
                write!(f, "expected `oklch(L C H)` or a hex color, got `{}`", s)
            }
            ParseColorError::InvalidNumber(err) => write!(f, "invalid number: {}", err),
            ParseColorError::OutOfRange { component, value } => {
                write!(f, "{} out of range: {}", component, value)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            ParseColorError::InvalidNumber(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for unregistered representation names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRepresentationError {
    /// The name that did not match any representation
    pub name: String,
}

impl fmt::Display for ParseRepresentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown representation `{}` (expected one of: {})",
            self.name,
            crate::Representation::NAMES.join(", ")
        )
    }
}

impl std::error::Error for ParseRepresentationError {}
