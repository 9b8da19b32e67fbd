use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::ConfigError;
use crate::models::{is_reserved, BuildConfig, BuildOptions, BuildTarget, Palette};
use crate::services::template_service::{escape_markup, is_markup};
use crate::services::{ConversionCache, Converter, GamutConverter, Template};

/// A target rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTarget {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

/// What happened to one target's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    Written,
    DryRun,
    Failed(String),
}

/// Per-target entry of a [`BuildReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub target: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex SHA-256 of the rendered content
    pub digest: String,
    pub status: TargetStatus,
}

/// Outcome of a build, one entry per selected target in build order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub targets: Vec<TargetReport>,
}

impl BuildReport {
    pub fn failures(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn written(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets
            .iter()
            .filter(|t| t.status == TargetStatus::Written)
    }
}

/// Orchestrates a build: select targets, render them all in memory, then
/// write (or only report) the results.
pub struct ThemeBuilder<C: Converter = GamutConverter> {
    cache: ConversionCache<C>,
}

impl ThemeBuilder {
    pub fn new() -> Self {
        Self::with_cache(ConversionCache::new())
    }
}

impl Default for ThemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Converter> ThemeBuilder<C> {
    pub fn with_cache(cache: ConversionCache<C>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ConversionCache<C> {
        &self.cache
    }

    /// Run a build.
    ///
    /// Configuration errors (unknown targets, missing colors) are returned
    /// before anything touches the file system. Write failures are
    /// recorded per target in the report and do not stop other targets.
    pub fn build(&self, config: &BuildConfig) -> Result<BuildReport, ConfigError> {
        let targets = select(config)?;

        let mut rendered = Vec::new();
        for target in targets {
            rendered.extend(self.render(target, &config.options.output_dir)?);
        }

        let report = write_all(rendered, &config.options);

        let stats = self.cache.stats();
        tracing::info!(
            targets = report.targets.len(),
            failed = report.failures().count(),
            dry_run = config.options.dry_run,
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "Build finished"
        );

        Ok(report)
    }

    /// Resolve every placeholder of `target` and render each of its output
    /// files in memory.
    pub fn render(&self, target: &BuildTarget, output_dir: &Path) -> Result<Vec<RenderedTarget>, ConfigError> {
        let template = Template::parse(target.template());
        target
            .outputs()
            .into_iter()
            .map(|(palette, file)| {
                self.render_palette(target, &template, &palette)
                    .map(|content| RenderedTarget {
                        name: target.name().to_string(),
                        path: output_dir.join(file),
                        content,
                    })
            })
            .collect()
    }

    fn render_palette(
        &self,
        target: &BuildTarget,
        template: &Template,
        palette: &Palette,
    ) -> Result<String, ConfigError> {
        let markup = is_markup(target.extension());

        let mut missing = Vec::new();
        let mut values = HashMap::new();
        for placeholder in template.placeholders() {
            // `<palette>.<name>` reaches another palette in full scope
            let qualified = match placeholder.split_once('.') {
                Some((prefix, rest)) if !is_reserved(placeholder) => {
                    target.scoped_palette(prefix).map(|p| (p.as_ref(), rest))
                }
                _ => None,
            };
            let (source, key) = qualified.unwrap_or((palette, placeholder));

            match self.resolve(target, source, key) {
                Ok(value) => {
                    let value = if markup {
                        escape_markup(&value)
                    } else {
                        value
                    };
                    values.insert(placeholder.to_string(), value);
                }
                Err(color) => {
                    let color = match qualified {
                        Some((p, _)) => format!("{}.{color}", p.name()),
                        None => color,
                    };
                    if !missing.contains(&color) {
                        missing.push(color);
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingColors {
                target: target.name().to_string(),
                colors: missing,
            });
        }

        let content = template
            .render(|name| values.get(name).map(String::as_str))
            .map_err(|source| ConfigError::Template {
                target: target.name().to_string(),
                source,
            })?;

        tracing::debug!(
            target = target.name(),
            palette = palette.name(),
            placeholders = values.len(),
            "Rendered target"
        );

        Ok(content)
    }

    /// The value of `key` in `palette`, or the name of the missing color.
    fn resolve(&self, target: &BuildTarget, palette: &Palette, key: &str) -> Result<String, String> {
        match key {
            "palette.name" => Ok(palette.name().to_string()),
            "palette.mode" => Ok(palette.mode().to_string()),
            "palette.description" => Ok(palette.description().to_string()),
            _ => {
                let binding = target.binding_for(key);
                match palette.get(&binding.color) {
                    Some(color) => Ok(self
                        .cache
                        .get_or_compute(color, binding.representation)
                        .to_string()),
                    None => Err(binding.color),
                }
            }
        }
    }
}

/// The targets to build, in configuration order.
fn select(config: &BuildConfig) -> Result<Vec<&BuildTarget>, ConfigError> {
    let selected = &config.options.selected;
    if selected.is_empty() {
        return Ok(config.targets().iter().collect());
    }

    let mut unknown: Vec<String> = Vec::new();
    for name in selected {
        if config.target(name).is_none() && !unknown.contains(name) {
            unknown.push(name.clone());
        }
    }
    if !unknown.is_empty() {
        return Err(ConfigError::UnknownTargets { names: unknown });
    }

    Ok(config
        .targets()
        .iter()
        .filter(|t| selected.iter().any(|name| name == t.name()))
        .collect())
}

fn write_all(rendered: Vec<RenderedTarget>, options: &BuildOptions) -> BuildReport {
    // Each distinct directory is created once; its error fails every file in it
    let mut dirs: HashMap<PathBuf, Option<String>> = HashMap::new();

    let targets = rendered
        .into_iter()
        .map(|r| {
            let bytes = r.content.len();
            let digest = hex::encode(Sha256::digest(r.content.as_bytes()));

            let status = if options.dry_run {
                tracing::info!(target = %r.name, path = %r.path.display(), bytes, "Would write");
                TargetStatus::DryRun
            } else {
                let dir = r.path.parent().map(Path::to_path_buf).unwrap_or_default();
                let dir_error = dirs.entry(dir).or_insert_with_key(|dir| create_dir(dir));
                if let Some(reason) = dir_error {
                    TargetStatus::Failed(reason.clone())
                } else {
                    match fs::write(&r.path, &r.content) {
                        Ok(()) => {
                            tracing::info!(target = %r.name, path = %r.path.display(), bytes, "Wrote theme");
                            TargetStatus::Written
                        }
                        Err(e) => {
                            tracing::warn!(target = %r.name, path = %r.path.display(), %e, "Failed to write theme");
                            TargetStatus::Failed(e.to_string())
                        }
                    }
                }
            };

            TargetReport {
                target: r.name,
                path: r.path,
                bytes,
                digest,
                status,
            }
        })
        .collect();

    BuildReport { targets }
}

fn create_dir(dir: &Path) -> Option<String> {
    fs::create_dir_all(dir).err().map(|e| {
        tracing::error!(path = %dir.display(), %e, "Failed to create output directory");
        format!("failed to create {}: {e}", dir.display())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mode, Palette, Scope};
    use oklch_gamut::{Color, Representation};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn palette() -> Arc<Palette> {
        Arc::new(
            Palette::new(
                "test",
                Mode::Dark,
                [
                    ("red".to_string(), Color::new(0.6, 0.2, 30.0)),
                    ("bg".to_string(), Color::new(0.2, 0.0, 0.0)),
                ],
            )
            .unwrap()
            .with_description("Test palette"),
        )
    }

    fn config(targets: Vec<BuildTarget>, options: BuildOptions) -> BuildConfig {
        BuildConfig::new(targets, options).unwrap()
    }

    fn dry_run() -> BuildOptions {
        BuildOptions {
            dry_run: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_example() {
        let builder = ThemeBuilder::new();
        let target = BuildTarget::new("demo", palette(), "fg = {{red}}", "conf");
        let rendered = builder.render(&target, Path::new("out")).unwrap();

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].content, "fg = #de3e2d");
        assert_eq!(rendered[0].path, PathBuf::from("out/demo.conf"));
    }

    #[test]
    fn test_render_metadata_and_bindings() {
        let builder = ThemeBuilder::new();
        let target = BuildTarget::new(
            "demo",
            palette(),
            "{{palette.name}} ({{ palette.mode }}): {{palette.description}}\n{{accent}} {{bg}}",
            "txt",
        )
        .with_representation(Representation::Rgb8)
        .bind("accent", "red", Representation::Hex)
        .unwrap();

        let rendered = builder.render(&target, Path::new(".")).unwrap();
        assert_eq!(rendered[0].content, "test (dark): Test palette\n#de3e2d 22, 22, 22");
    }

    #[test]
    fn test_markup_values_are_escaped() {
        let palette = Arc::new(
            Palette::new("test", Mode::Dark, [("red".to_string(), Color::new(0.6, 0.2, 30.0))])
                .unwrap()
                .with_description("<b>Tom & Jerry's</b>"),
        );
        let template = "<p>{{ palette.description }}</p>";
        let builder = ThemeBuilder::new();

        let html = BuildTarget::new("page", palette.clone(), template, "html");
        assert_eq!(
            builder.render(&html, Path::new(".")).unwrap()[0].content,
            "<p>&lt;b&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;</p>"
        );

        let text = BuildTarget::new("page", palette, template, "txt");
        assert_eq!(
            builder.render(&text, Path::new(".")).unwrap()[0].content,
            "<p><b>Tom & Jerry's</b></p>"
        );
    }

    #[test]
    fn test_each_scope_renders_one_file_per_palette() {
        let day = Arc::new(
            Palette::new("day", Mode::Light, [("red".to_string(), Color::new(0.5, 0.1, 30.0))]).unwrap(),
        );
        let target = BuildTarget::new("nvim", palette(), "{{palette.name}} {{palette.mode}} {{red}}", "lua")
            .with_scope(Scope::Each, [palette(), day]);

        let rendered = ThemeBuilder::new().render(&target, Path::new("out")).unwrap();
        let files: Vec<_> = rendered
            .iter()
            .map(|r| (r.name.as_str(), r.path.clone(), r.content.as_str()))
            .collect();
        assert_eq!(
            files,
            vec![
                ("nvim", PathBuf::from("out/nvim/test.lua"), "test dark #de3e2d"),
                ("nvim", PathBuf::from("out/nvim/day.lua"), "day light #944b40"),
            ]
        );
    }

    #[test]
    fn test_full_scope_reaches_every_palette() {
        let day = Arc::new(
            Palette::new("day", Mode::Light, [("red".to_string(), Color::new(0.5, 0.1, 30.0))])
                .unwrap()
                .with_aliases(["light"]),
        );
        let target = BuildTarget::new(
            "starship",
            palette(),
            "{{palette.name}}: {{red}} {{test.red}} {{light.red}} {{day.palette.mode}}",
            "toml",
        )
        .with_scope(Scope::Full, [palette(), day]);

        let rendered = ThemeBuilder::new().render(&target, Path::new(".")).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].path, PathBuf::from("./starship.toml"));
        assert_eq!(rendered[0].content, "test: #de3e2d #de3e2d #944b40 light");
    }

    #[test]
    fn test_full_scope_missing_colors_are_qualified() {
        let target = BuildTarget::new("starship", palette(), "{{test.teal}} {{nope.red}} {{test.red}}", "toml")
            .with_scope(Scope::Full, [palette()]);
        let err = ThemeBuilder::new().render(&target, Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingColors { ref colors, .. } if colors == &vec!["test.teal", "nope.red"]
        ));
    }

    #[test]
    fn test_missing_colors_are_all_listed() {
        let builder = ThemeBuilder::new();
        let target = BuildTarget::new("demo", palette(), "{{teal}} {{red}} {{navy}} {{teal}}", "txt");
        let err = builder.render(&target, Path::new(".")).unwrap_err();
        match err {
            ConfigError::MissingColors { target, colors } => {
                assert_eq!(target, "demo");
                assert_eq!(colors, vec!["teal", "navy"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cache_is_shared_across_targets() {
        let builder = ThemeBuilder::new();
        let targets = vec![
            BuildTarget::new("a", palette(), "{{red}}", "txt"),
            BuildTarget::new("b", palette(), "{{red}} {{bg}}", "txt"),
        ];
        let report = builder.build(&config(targets, dry_run())).unwrap();

        assert_eq!(report.targets.len(), 2);
        let stats = builder.cache().stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            output_dir: dir.path().join("build"),
            dry_run: true,
            selected: vec![],
        };
        let targets = vec![BuildTarget::new("demo", palette(), "fg = {{red}}", "conf")];
        let report = ThemeBuilder::new().build(&config(targets, options)).unwrap();

        let entry = &report.targets[0];
        assert_eq!(entry.status, TargetStatus::DryRun);
        assert_eq!(entry.bytes, "fg = #de3e2d".len());
        assert_eq!(entry.digest.len(), 64);
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn test_selection_keeps_config_order() {
        let targets = vec![
            BuildTarget::new("a", palette(), "", "txt"),
            BuildTarget::new("b", palette(), "", "txt"),
            BuildTarget::new("c", palette(), "", "txt"),
        ];
        let options = BuildOptions {
            selected: vec!["c".to_string(), "a".to_string()],
            ..dry_run()
        };
        let report = ThemeBuilder::new().build(&config(targets, options)).unwrap();
        let names: Vec<_> = report.targets.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_unknown_targets_are_all_listed() {
        let targets = vec![BuildTarget::new("a", palette(), "", "txt")];
        let options = BuildOptions {
            selected: vec!["x".to_string(), "a".to_string(), "y".to_string()],
            ..dry_run()
        };
        let err = ThemeBuilder::new().build(&config(targets, options)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTargets { names } if names == vec!["x", "y"]));
    }

    #[test]
    fn test_write_failure_does_not_stop_other_targets() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes that write fail
        fs::create_dir_all(dir.path().join("blocked.txt")).unwrap();

        let options = BuildOptions {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let targets = vec![
            BuildTarget::new("blocked", palette(), "{{red}}", "txt"),
            BuildTarget::new("fine", palette(), "{{red}}", "txt"),
        ];
        let report = ThemeBuilder::new().build(&config(targets, options)).unwrap();

        assert!(!report.is_success());
        assert!(matches!(report.targets[0].status, TargetStatus::Failed(_)));
        assert_eq!(report.targets[1].status, TargetStatus::Written);
        assert_eq!(report.written().count(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("fine.txt")).unwrap(),
            "#de3e2d"
        );
    }

    #[test]
    fn test_each_scope_creates_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            output_dir: dir.path().join("build"),
            ..Default::default()
        };
        let targets = vec![BuildTarget::new("nvim", palette(), "{{red}}", "lua").with_scope(Scope::Each, [palette()])];
        let report = ThemeBuilder::new().build(&config(targets, options)).unwrap();

        assert!(report.is_success());
        assert_eq!(
            fs::read_to_string(dir.path().join("build/nvim/test.lua")).unwrap(),
            "#de3e2d"
        );
    }
}
