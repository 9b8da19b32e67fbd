//! Asset loading with embedded fallbacks
//!
//! Templates and the default config are compiled into the binary. When an
//! external location is configured (via `TEMPLATES_DIR` / `CONFIG_FILE`),
//! files found there take priority and the embedded copy is the fallback.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::TemplateError;

/// Embedded theme templates
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Templates,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
pub struct AssetLoader {
    /// External templates directory (from TEMPLATES_DIR env var)
    templates_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(templates_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            templates_dir,
            config_file,
        }
    }

    /// Read a template
    ///
    /// If an external directory is configured, tries it first, then falls
    /// back to the embedded copy.
    pub fn read_template(&self, relative_path: &Path) -> Result<Cow<'static, [u8]>, TemplateError> {
        if let Some(ref dir) = self.templates_dir {
            let full_path = dir.join(relative_path);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading template from filesystem");
                return Ok(Cow::Owned(fs::read(&full_path)?));
            }
        }

        let path_str = relative_path.to_string_lossy();
        EmbeddedTemplates::get(&path_str)
            .map(|f| {
                tracing::trace!(path = %path_str, "Loading template from embedded assets");
                f.data
            })
            .ok_or_else(|| TemplateError::NotFound(path_str.into_owned()))
    }

    /// Read a template as a UTF-8 string
    pub fn read_template_string(&self, relative_path: &Path) -> Result<String, TemplateError> {
        let bytes = self.read_template(relative_path)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|_| TemplateError::InvalidUtf8(relative_path.display().to_string()))
    }

    /// List all available templates (merged view of embedded + external)
    pub fn list_templates(&self) -> Vec<String> {
        let mut files: BTreeSet<String> = EmbeddedTemplates::iter().map(|s| s.to_string()).collect();

        if let Some(ref dir) = self.templates_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if entry.path().is_file() {
                        if let Some(name) = entry.file_name().to_str() {
                            files.insert(name.to_string());
                        }
                    }
                }
            }
        }

        files.into_iter().collect()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or `./templates` and `./config.yaml`).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Templates => {
                    let dir = self
                        .templates_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./templates"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedTemplates::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedTemplates::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Templates => {
                let mut files: Vec<String> = EmbeddedTemplates::iter().map(|s| s.to_string()).collect();
                files.sort();
                files
            }
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}
