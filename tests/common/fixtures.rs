//! Test fixtures: palettes, targets and configs.

use std::path::Path;
use std::sync::Arc;

use themeforge::assets::AssetLoader;
use themeforge::models::{AppConfig, BuildConfig, BuildOptions, BuildTarget, Mode, Palette};
use themeforge::Color;

/// `{"red": oklch(0.6 0.2 30)}`
pub fn red_palette() -> Arc<Palette> {
    Arc::new(
        Palette::new(
            "red-only",
            Mode::Dark,
            [("red".to_string(), Color::new(0.6, 0.2, 30.0))],
        )
        .expect("valid palette"),
    )
}

/// A small palette with an out-of-gamut green and a translucent color.
pub fn mixed_palette() -> Arc<Palette> {
    Arc::new(
        Palette::new(
            "mixed",
            Mode::Light,
            [
                ("red".to_string(), Color::new(0.6, 0.2, 30.0)),
                ("green".to_string(), Color::new(0.6, 0.4, 140.0)),
                ("shade".to_string(), Color::new(0.3, 0.05, 260.0).with_alpha(0.5)),
                ("paper".to_string(), Color::new(1.0, 0.0, 0.0)),
            ],
        )
        .expect("valid palette")
        .with_description("Fixture palette"),
    )
}

/// Targets covering every representation over [`mixed_palette`].
pub fn mixed_targets() -> Vec<BuildTarget> {
    let palette = mixed_palette();
    vec![
        BuildTarget::new("example", red_palette(), "fg = {{red}}", "conf"),
        BuildTarget::new(
            "hexes",
            palette.clone(),
            "# {{ palette.name }}\nred={{red}}\ngreen={{green}}\nshade={{shade}}\n",
            "ini",
        ),
        BuildTarget::new("css", palette.clone(), ":root { --g: {{ green }}; --s: {{ shade }}; }", "css")
            .with_representation(themeforge::Representation::Css)
            .bind("green", "green", themeforge::Representation::DisplayP3)
            .expect("not reserved"),
        BuildTarget::new("coords", palette, "{{green}} {{raw-green}}", "txt")
            .with_representation(themeforge::Representation::Oklch)
            .bind("raw-green", "green", themeforge::Representation::Raw)
            .expect("not reserved"),
    ]
}

pub fn options(output_dir: &Path) -> BuildOptions {
    BuildOptions {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    }
}

pub fn mixed_config(output_dir: &Path) -> BuildConfig {
    BuildConfig::new(mixed_targets(), options(output_dir)).expect("unique target names")
}

/// The embedded default config with all of its targets.
pub fn embedded_config(output_dir: &Path) -> BuildConfig {
    let loader = AssetLoader::new(None, None);
    let config = AppConfig::load_from_assets(&loader).expect("embedded config parses");
    let palettes = config.palettes().expect("palettes resolve");
    let targets = config.targets(&palettes, &loader).expect("targets resolve");
    BuildConfig::new(targets, options(output_dir)).expect("unique target names")
}
