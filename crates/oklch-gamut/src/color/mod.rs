//! Color types and conversion utilities
//!
//! Each color space gets its own type so a value can only be used in the
//! space it belongs to:
//!
//! - [`Color`]: the authored perceptual value (Oklch plus optional alpha)
//! - [`Oklch`] / [`Oklab`]: polar and Cartesian perceptual coordinates
//! - [`LinearRgb`] / [`LinearDisplayP3`]: linear light, where gamut
//!   membership is decided
//! - [`Srgb`]: gamma-encoded output
//!
//! # Example
//!
//! ```
//! use oklch_gamut::{LinearRgb, Oklab, Oklch, Srgb};
//!
//! let lch = Oklch::new(0.6, 0.1, 30.0);
//! let linear = LinearRgb::from(Oklab::from(lch));
//! let bytes = Srgb::from(linear).to_bytes();
//! assert!(bytes[0] > bytes[2]);
//! ```

mod display_p3;
pub(crate) mod gamma;
mod linear_rgb;
mod oklab;
mod oklch;
mod perceptual;
mod srgb;

pub use display_p3::LinearDisplayP3;
pub use linear_rgb::LinearRgb;
pub use oklab::Oklab;
pub use oklch::{normalize_hue, Oklch};
pub use perceptual::{Color, ColorKey};
pub use srgb::Srgb;

pub(crate) use oklch::LC_DECIMALS;
pub(crate) use srgb::to_byte;
