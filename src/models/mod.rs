pub mod builtin;
pub mod config;
pub mod palette;
pub mod target;

pub use builtin::builtin_palettes;
pub use config::{AppConfig, BindingConfig, PaletteConfig, TargetConfig};
pub use palette::{Mode, Palette, PaletteSet};
pub use target::{is_reserved, Binding, BuildConfig, BuildOptions, BuildTarget, Scope, RESERVED_PLACEHOLDERS};
