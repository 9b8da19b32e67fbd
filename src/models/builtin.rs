//! Palettes shipped with the binary.
//!
//! Four palettes share one set of hue angles: a dark palette with a grey
//! variant, and a light palette with a white-paper variant. Every palette
//! carries 7 base colors, 12 hues in three strengths (`red`,
//! `bright-red`, `hl-red`) and an 11-step grayscale (`gray0` to
//! `gray100`).

use oklch_gamut::Color;

use super::palette::{Mode, Palette, PaletteSet};
use crate::error::PaletteError;

/// Named hues and their angle in degrees.
const HUES: [(&str, f64); 12] = [
    ("rose", 0.0),
    ("red", 25.0),
    ("orange", 55.0),
    ("yellow", 95.0),
    ("lime", 125.0),
    ("green", 145.0),
    ("mint", 170.0),
    ("cyan", 200.0),
    ("azure", 235.0),
    ("blue", 260.0),
    ("violet", 295.0),
    ("magenta", 330.0),
];

/// Lightness and chroma of one strength of hue.
type Tone = (f64, f64);

/// `<hue>`, `bright-<hue>` and `hl-<hue>` for one mode.
#[derive(Clone, Copy)]
struct HueTones {
    normal: Tone,
    bright: Tone,
    highlight: Tone,
}

const DARK_HUES: HueTones = HueTones {
    normal: (0.70, 0.16),
    bright: (0.80, 0.13),
    highlight: (0.32, 0.06),
};

const LIGHT_HUES: HueTones = HueTones {
    normal: (0.55, 0.14),
    bright: (0.62, 0.15),
    highlight: (0.90, 0.05),
};

/// Hue angle of the tinted neutrals.
const BASE_HUE: f64 = 250.0;

const BASE_NAMES: [&str; 7] = ["bg", "bg1", "bg2", "bg3", "fg", "fg1", "fg2"];

fn palette(
    name: &str,
    description: &str,
    mode: Mode,
    alias: &str,
    bases: [Tone; 7],
    tones: HueTones,
) -> Result<Palette, PaletteError> {
    let bases = BASE_NAMES
        .iter()
        .zip(bases)
        .map(|(n, (l, c))| (n.to_string(), Color::new(l, c, BASE_HUE)));
    let hues = [("", tones.normal), ("bright-", tones.bright), ("hl-", tones.highlight)]
        .into_iter()
        .flat_map(|(prefix, (l, c))| {
            HUES.iter()
                .map(move |&(n, h)| (format!("{prefix}{n}"), Color::new(l, c, h)))
        });
    let grays = (0..=10).map(|step| {
        let percent = step * 10;
        (format!("gray{percent}"), Color::new(f64::from(percent) / 100.0, 0.0, 0.0))
    });

    Ok(Palette::new(name, mode, bases.chain(hues).chain(grays))?
        .with_description(description)
        .with_aliases([alias]))
}

/// The built-in palettes, in display order.
pub fn builtin_palettes() -> Result<PaletteSet, PaletteError> {
    let dark_bases = [
        (0.19, 0.012),
        (0.23, 0.014),
        (0.28, 0.016),
        (0.35, 0.018),
        (0.92, 0.010),
        (0.82, 0.012),
        (0.68, 0.014),
    ];
    let light_bases = [
        (0.97, 0.008),
        (0.93, 0.010),
        (0.88, 0.012),
        (0.80, 0.014),
        (0.25, 0.015),
        (0.35, 0.015),
        (0.48, 0.015),
    ];
    let neutral = |bases: [Tone; 7]| bases.map(|(l, _)| (l, 0.0));

    let mut set = PaletteSet::new();
    set.insert(palette(
        "ember",
        "Dark palette with blue-tinted neutrals",
        Mode::Dark,
        "dark",
        dark_bases,
        DARK_HUES,
    )?)?;
    set.insert(palette(
        "ember-slate",
        "Dark palette with pure grey neutrals",
        Mode::Dark,
        "gray",
        neutral(dark_bases),
        DARK_HUES,
    )?)?;
    set.insert(palette(
        "ember-day",
        "Light palette with blue-tinted neutrals",
        Mode::Light,
        "day",
        light_bases,
        LIGHT_HUES,
    )?)?;

    let mut paper = neutral(light_bases);
    paper[0] = (1.0, 0.0);
    set.insert(palette(
        "ember-paper",
        "Light palette on a white background",
        Mode::Light,
        "white",
        paper,
        LIGHT_HUES,
    )?)?;

    Ok(set)
}
