use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use oklch_gamut::Representation;
use serde::Deserialize;

use super::palette::Palette;
use crate::error::ConfigError;

/// Placeholders that bind to palette metadata instead of a color.
pub const RESERVED_PLACEHOLDERS: [&str; 3] = ["palette.name", "palette.mode", "palette.description"];

/// Whether `placeholder` is bound to palette metadata.
pub fn is_reserved(placeholder: &str) -> bool {
    RESERVED_PLACEHOLDERS.contains(&placeholder)
}

/// An explicit placeholder binding: which palette color, in which encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub color: String,
    pub representation: Representation,
}

/// Which palettes a target renders and into how many files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One file, `<name>.<extension>`, from the target's palette
    #[default]
    Palette,
    /// One file per palette, `<name>/<palette>.<extension>`
    Each,
    /// One file in which `{{ <palette>.<color> }}` reaches any palette
    Full,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Palette => "palette",
            Scope::Each => "each",
            Scope::Full => "full",
        }
    }
}

/// One destination application: template text, palette and bindings.
///
/// Placeholders without an explicit binding bind to the same-named
/// palette color in the target's default representation.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    name: String,
    palette: Arc<Palette>,
    template: String,
    extension: String,
    representation: Representation,
    bindings: IndexMap<String, Binding>,
    scope: Scope,
    palettes: Vec<Arc<Palette>>,
}

impl BuildTarget {
    /// Create a target with `hex` as the default representation.
    pub fn new(
        name: impl Into<String>,
        palette: Arc<Palette>,
        template: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            palette,
            template: template.into(),
            extension: extension.into(),
            representation: Representation::default(),
            bindings: IndexMap::new(),
            scope: Scope::Palette,
            palettes: Vec::new(),
        }
    }

    /// Render over `palettes` instead of the target's palette alone.
    ///
    /// The target's own palette stays the default for unqualified
    /// placeholders in [`Scope::Full`].
    pub fn with_scope(mut self, scope: Scope, palettes: impl IntoIterator<Item = Arc<Palette>>) -> Self {
        self.scope = scope;
        self.palettes = palettes.into_iter().collect();
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    /// Bind `placeholder` to `color` in `representation`.
    pub fn bind(
        mut self,
        placeholder: impl Into<String>,
        color: impl Into<String>,
        representation: Representation,
    ) -> Result<Self, ConfigError> {
        let placeholder = placeholder.into();
        if is_reserved(&placeholder) {
            return Err(ConfigError::ReservedPlaceholder {
                target: self.name,
                placeholder,
            });
        }
        self.bindings.insert(
            placeholder,
            Binding {
                color: color.into(),
                representation,
            },
        );
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn bindings(&self) -> &IndexMap<String, Binding> {
        &self.bindings
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Palettes reachable in [`Scope::Each`] and [`Scope::Full`].
    pub fn palettes(&self) -> &[Arc<Palette>] {
        &self.palettes
    }

    /// A palette reachable by a qualified placeholder in [`Scope::Full`].
    pub fn scoped_palette(&self, name: &str) -> Option<&Arc<Palette>> {
        match self.scope {
            Scope::Full => self.palettes.iter().find(|p| p.answers_to(name)),
            Scope::Palette | Scope::Each => None,
        }
    }

    /// The binding used for a (non-reserved) placeholder.
    pub fn binding_for(&self, placeholder: &str) -> Binding {
        self.bindings.get(placeholder).cloned().unwrap_or_else(|| Binding {
            color: placeholder.to_string(),
            representation: self.representation,
        })
    }

    /// `<name>.<extension>`, or just the name without an extension.
    pub fn file_name(&self) -> String {
        self.with_extension(&self.name)
    }

    /// Every file this target renders: the palette it is rendered from and
    /// its path relative to the output directory.
    pub fn outputs(&self) -> Vec<(Arc<Palette>, PathBuf)> {
        match self.scope {
            Scope::Palette | Scope::Full => vec![(self.palette.clone(), PathBuf::from(self.file_name()))],
            Scope::Each => self
                .palettes
                .iter()
                .map(|p| {
                    let path = PathBuf::from(&self.name).join(self.with_extension(p.name()));
                    (p.clone(), path)
                })
                .collect(),
        }
    }

    fn with_extension(&self, stem: &str) -> String {
        if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{}", self.extension)
        }
    }
}

/// Global build options. Every field has a documented default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Where rendered files go (default `build`)
    pub output_dir: PathBuf,
    /// Render and report without touching the file system (default off)
    pub dry_run: bool,
    /// Targets to build; empty means all (default empty)
    pub selected: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            dry_run: false,
            selected: Vec::new(),
        }
    }
}

/// Targets plus options: everything a build needs.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    targets: Vec<BuildTarget>,
    pub options: BuildOptions,
}

impl BuildConfig {
    /// Target names must be unique.
    pub fn new(targets: Vec<BuildTarget>, options: BuildOptions) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.name()) {
                return Err(ConfigError::DuplicateTarget(target.name().to_string()));
            }
        }
        Ok(Self { targets, options })
    }

    pub fn targets(&self) -> &[BuildTarget] {
        &self.targets
    }

    pub fn target(&self, name: &str) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| t.name() == name)
    }
}
