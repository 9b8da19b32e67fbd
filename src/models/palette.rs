use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use oklch_gamut::Color;
use serde::Deserialize;

use crate::error::PaletteError;

/// Whether a palette is meant for a dark or a light background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dark => "dark",
            Mode::Light => "light",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, immutable, ordered set of colors.
///
/// Deriving a variant produces a new palette; an existing one is never
/// modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    description: String,
    mode: Mode,
    aliases: Vec<String>,
    colors: IndexMap<String, Color>,
}

impl Palette {
    /// Create a palette, rejecting empty color sets and repeated names.
    pub fn new(
        name: impl Into<String>,
        mode: Mode,
        colors: impl IntoIterator<Item = (String, Color)>,
    ) -> Result<Self, PaletteError> {
        let name = name.into();
        let mut map = IndexMap::new();
        for (color_name, color) in colors {
            if map.insert(color_name.clone(), color).is_some() {
                return Err(PaletteError::DuplicateColor {
                    palette: name,
                    color: color_name,
                });
            }
        }
        if map.is_empty() {
            return Err(PaletteError::Empty(name));
        }

        Ok(Self {
            name,
            description: String::new(),
            mode,
            aliases: Vec::new(),
            colors: map,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Derive a new palette named `name`.
    ///
    /// Overrides replace same-named colors in place and append new ones at
    /// the end. Description and mode are inherited, aliases are not.
    pub fn variant(
        &self,
        name: impl Into<String>,
        overrides: impl IntoIterator<Item = (String, Color)>,
    ) -> Self {
        let mut colors = self.colors.clone();
        colors.extend(overrides);
        Self {
            name: name.into(),
            description: self.description.clone(),
            mode: self.mode,
            aliases: Vec::new(),
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Colors in definition order.
    pub fn colors(&self) -> &IndexMap<String, Color> {
        &self.colors
    }

    pub fn get(&self, color: &str) -> Option<&Color> {
        self.colors.get(color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Whether `name` is this palette's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Palettes addressable by name or alias.
#[derive(Debug, Clone, Default)]
pub struct PaletteSet {
    palettes: Vec<Arc<Palette>>,
}

impl PaletteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a palette. Its name and aliases must not clash with any
    /// palette already in the set.
    pub fn insert(&mut self, palette: Palette) -> Result<Arc<Palette>, PaletteError> {
        let names = std::iter::once(palette.name()).chain(palette.aliases().iter().map(String::as_str));
        for name in names {
            if self.get(name).is_some() {
                return Err(PaletteError::DuplicateName(name.to_string()));
            }
        }
        let palette = Arc::new(palette);
        self.palettes.push(palette.clone());
        Ok(palette)
    }

    /// Look a palette up by name or alias.
    pub fn get(&self, name: &str) -> Option<&Arc<Palette>> {
        self.palettes.iter().find(|p| p.answers_to(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Palette>> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
