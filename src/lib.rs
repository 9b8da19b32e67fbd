//! Themeforge - editor and terminal themes from OKLCH palettes
//!
//! Palettes are authored in Oklch and rendered through plain-text
//! templates into per-application theme files. Colors are converted to the
//! encoding each target needs and fitted into its gamut by reducing chroma.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;

pub use error::{ConfigError, PaletteError, TemplateError};
pub use oklch_gamut::{Color, EncodedValue, Representation};
