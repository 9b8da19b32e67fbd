use crate::assets::AssetLoader;
use crate::error::ConfigError;
use crate::models::builtin::builtin_palettes;
use crate::models::{BuildTarget, Mode, Palette, PaletteSet, Scope};
use indexmap::IndexMap;
use oklch_gamut::{Color, Representation};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Extra palettes, added after the built-in ones
    #[serde(default)]
    pub palettes: IndexMap<String, PaletteConfig>,

    /// Build targets, in build order
    #[serde(default)]
    pub targets: IndexMap<String, TargetConfig>,
}

/// A palette defined in the config file.
///
/// With `base`, the palette is a variant of an earlier (or built-in)
/// palette and `colors` are overrides.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to the base palette's mode, or dark
    #[serde(default)]
    pub mode: Option<Mode>,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Color name to `oklch(...)` or hex string
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

/// A build target defined in the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    /// Template path (relative to the templates directory)
    pub template: PathBuf,

    /// Palette name or alias
    #[serde(default = "default_palette")]
    pub palette: String,

    /// `palette` (default), `each` or `full`
    #[serde(default)]
    pub scope: Scope,

    /// Palettes for `each` and `full`; all palettes if unset
    #[serde(default)]
    pub palettes: Option<Vec<String>>,

    /// Default representation for implicit bindings (`hex` if unset)
    #[serde(default)]
    pub representation: Option<String>,

    /// Output extension; defaults to the template's extension
    #[serde(default)]
    pub extension: Option<String>,

    /// Placeholder overrides
    #[serde(default)]
    pub bindings: IndexMap<String, BindingConfig>,
}

fn default_palette() -> String {
    "dark".to_string()
}

/// Either a bare color name or a color with its representation.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BindingConfig {
    Color(String),
    Full {
        color: String,
        #[serde(rename = "as", default)]
        representation: Option<String>,
    },
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let content = loader.read_config_string()?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            palettes = config.palettes.len(),
            targets = config.targets.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Built-in palettes followed by the configured ones.
    pub fn palettes(&self) -> Result<PaletteSet, ConfigError> {
        let mut set = builtin_palettes()?;

        for (name, def) in &self.palettes {
            let colors = def
                .colors
                .iter()
                .map(|(color, value)| {
                    value
                        .parse::<Color>()
                        .map(|c| (color.clone(), c))
                        .map_err(|source| ConfigError::InvalidColor {
                            palette: name.clone(),
                            color: color.clone(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let palette = match &def.base {
                Some(base) => {
                    let base = set.get(base).ok_or_else(|| ConfigError::UnknownPalette {
                        palette: base.clone(),
                        referenced_by: name.clone(),
                    })?;
                    let mut variant = base.variant(name.clone(), colors);
                    if let Some(mode) = def.mode {
                        variant = variant.with_mode(mode);
                    }
                    variant
                }
                None => Palette::new(name.clone(), def.mode.unwrap_or_default(), colors)?,
            };
            let palette = match &def.description {
                Some(description) => palette.with_description(description.clone()),
                None => palette,
            };

            tracing::debug!(palette = %name, colors = palette.len(), "Defined palette");
            set.insert(palette.with_aliases(def.aliases.clone()))?;
        }

        Ok(set)
    }

    /// Resolve every configured target against `palettes`, reading its
    /// template through `loader`.
    pub fn targets(
        &self,
        palettes: &PaletteSet,
        loader: &AssetLoader,
    ) -> Result<Vec<BuildTarget>, ConfigError> {
        self.targets
            .iter()
            .map(|(name, def)| def.resolve(name, palettes, loader))
            .collect()
    }
}

impl TargetConfig {
    fn resolve(
        &self,
        name: &str,
        palettes: &PaletteSet,
        loader: &AssetLoader,
    ) -> Result<BuildTarget, ConfigError> {
        let lookup = |palette: &String| {
            palettes
                .get(palette)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownPalette {
                    palette: palette.clone(),
                    referenced_by: name.to_string(),
                })
        };
        let palette = lookup(&self.palette)?;
        let scoped: Vec<Arc<Palette>> = match (self.scope, &self.palettes) {
            (Scope::Palette, _) => Vec::new(),
            (_, Some(names)) => names.iter().map(lookup).collect::<Result<_, _>>()?,
            (_, None) => palettes.iter().cloned().collect(),
        };

        let representation = match &self.representation {
            Some(r) => parse_representation(name, r)?,
            None => Representation::default(),
        };

        let template = loader
            .read_template_string(&self.template)
            .map_err(|source| ConfigError::Template {
                target: name.to_string(),
                source,
            })?;

        let extension = self
            .extension
            .clone()
            .unwrap_or_else(|| extension_of(&self.template));

        let mut target = BuildTarget::new(name, palette, template, extension)
            .with_representation(representation)
            .with_scope(self.scope, scoped);
        for (placeholder, binding) in &self.bindings {
            let (color, repr) = match binding {
                BindingConfig::Color(color) => (color, representation),
                BindingConfig::Full {
                    color,
                    representation: repr,
                } => match repr {
                    Some(r) => (color, parse_representation(name, r)?),
                    None => (color, representation),
                },
            };
            target = target.bind(placeholder.clone(), color.clone(), repr)?;
        }

        Ok(target)
    }
}

fn parse_representation(target: &str, name: &str) -> Result<Representation, ConfigError> {
    name.parse()
        .map_err(|source| ConfigError::UnknownRepresentation {
            target: target.to_string(),
            source,
        })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}
