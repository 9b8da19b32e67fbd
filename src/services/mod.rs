pub mod conversion_cache;
pub mod template_service;
pub mod theme_builder;

pub use conversion_cache::{CacheStats, ConversionCache, Converter, GamutConverter, DEFAULT_CHROMA_WARNING};
pub use template_service::Template;
pub use theme_builder::{BuildReport, RenderedTarget, TargetReport, TargetStatus, ThemeBuilder};
