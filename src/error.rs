use oklch_gamut::ParseColorError;
use thiserror::Error;

/// Configuration problems. All of these surface before any output is
/// written, and abort the whole build.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown target(s): {}", names.join(", "))]
    UnknownTargets { names: Vec<String> },

    #[error("Target `{target}` references missing color(s): {}", colors.join(", "))]
    MissingColors { target: String, colors: Vec<String> },

    #[error("Target `{target}`: {source}")]
    UnknownRepresentation {
        target: String,
        #[source]
        source: oklch_gamut::ParseRepresentationError,
    },

    #[error("Unknown palette `{palette}` (referenced by `{referenced_by}`)")]
    UnknownPalette {
        palette: String,
        referenced_by: String,
    },

    #[error("Duplicate target name: {0}")]
    DuplicateTarget(String),

    #[error("Target `{target}` cannot rebind reserved placeholder `{placeholder}`")]
    ReservedPlaceholder { target: String, placeholder: String },

    #[error("Invalid color `{color}` in palette `{palette}`: {source}")]
    InvalidColor {
        palette: String,
        color: String,
        #[source]
        source: ParseColorError,
    },

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Target `{target}`: {source}")]
    Template {
        target: String,
        #[source]
        source: TemplateError,
    },

    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Palette `{0}` has no colors")]
    Empty(String),

    #[error("Palette `{palette}` defines color `{color}` more than once")]
    DuplicateColor { palette: String, color: String },

    #[error("Palette name or alias `{0}` is already taken")]
    DuplicateName(String),
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("Placeholder `{0}` has no value")]
    Unbound(String),

    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),
}
