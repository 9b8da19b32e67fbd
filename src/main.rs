use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use themeforge::assets::{AssetCategory, AssetLoader};
use themeforge::models::{AppConfig, BuildConfig, BuildOptions, Scope};
use themeforge::services::{
    ConversionCache, GamutConverter, TargetStatus, ThemeBuilder, DEFAULT_CHROMA_WARNING,
};
use themeforge::Representation;

#[derive(Parser)]
#[command(name = "themeforge")]
#[command(about = "Build editor and terminal themes from OKLCH palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render theme files for all (or the selected) targets
    Build {
        /// Target to build (repeatable; default: all)
        #[arg(short, long = "target")]
        targets: Vec<String>,

        /// Output directory
        #[arg(short, long, default_value = "build")]
        output: PathBuf,

        /// Report what would be written without writing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Warn when fitting removes more chroma than this
        #[arg(long, default_value_t = DEFAULT_CHROMA_WARNING)]
        chroma_warning: f64,
    },
    /// List palettes and targets
    List,
    /// Print a palette's colors
    Palette {
        /// Palette name or alias
        name: String,

        /// Representation to print colors in
        #[arg(long = "as", default_value = "hex")]
        representation: Representation,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Extract embedded templates and config for customization
    Init {
        /// Extract templates
        #[arg(long)]
        templates: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build {
            targets,
            output,
            dry_run,
            chroma_warning,
        }) => run_build_command(targets, output, dry_run, chroma_warning),
        Some(Commands::List) => run_list_command(),
        Some(Commands::Palette {
            name,
            representation,
            json,
        }) => run_palette_command(&name, representation, json),
        Some(Commands::Init {
            templates,
            config,
            force,
            list,
        }) => run_init_command(templates, config, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "themeforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Asset loader with optional external paths from env vars
fn asset_loader() -> AssetLoader {
    let templates_dir = std::env::var("TEMPLATES_DIR").ok().map(PathBuf::from);
    let config_file = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
    AssetLoader::new(templates_dir, config_file)
}

fn run_build_command(
    targets: Vec<String>,
    output: PathBuf,
    dry_run: bool,
    chroma_warning: f64,
) -> anyhow::Result<()> {
    init_logging();

    let loader = asset_loader();
    let config = AppConfig::load_from_assets(&loader)?;
    let palettes = config.palettes()?;
    let build_config = BuildConfig::new(
        config.targets(&palettes, &loader)?,
        BuildOptions {
            output_dir: output,
            dry_run,
            selected: targets,
        },
    )?;

    let builder = ThemeBuilder::with_cache(ConversionCache::with_converter(GamutConverter {
        chroma_warning,
    }));
    let report = builder.build(&build_config)?;

    for entry in &report.targets {
        let status = match &entry.status {
            TargetStatus::Written => "wrote".to_string(),
            TargetStatus::DryRun => "would write".to_string(),
            TargetStatus::Failed(reason) => format!("FAILED ({reason})"),
        };
        println!(
            "{:<14} {} {} ({} bytes, sha256 {})",
            entry.target,
            status,
            entry.path.display(),
            entry.bytes,
            &entry.digest[..12]
        );
    }

    let failed = report.failures().count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} target(s) failed", report.targets.len());
    }
    Ok(())
}

fn run_list_command() -> anyhow::Result<()> {
    init_logging();

    let loader = asset_loader();
    let config = AppConfig::load_from_assets(&loader)?;
    let palettes = config.palettes()?;

    println!("Palettes:");
    for palette in palettes.iter() {
        let aliases = if palette.aliases().is_empty() {
            String::new()
        } else {
            format!(" (alias: {})", palette.aliases().join(", "))
        };
        println!(
            "  {:<14} {:<5} {:>2} colors  {}{aliases}",
            palette.name(),
            palette.mode().as_str(),
            palette.len(),
            palette.description()
        );
    }

    println!("\nTargets:");
    for (name, target) in &config.targets {
        let palettes = match (target.scope, &target.palettes) {
            (Scope::Palette, _) => target.palette.clone(),
            (_, Some(names)) => names.join(", "),
            (_, None) => "all".to_string(),
        };
        println!(
            "  {:<14} {:<18} {:<7} palette {}",
            name,
            target.template.display(),
            target.scope.as_str(),
            palettes
        );
    }
    Ok(())
}

fn run_palette_command(name: &str, representation: Representation, json: bool) -> anyhow::Result<()> {
    init_logging();

    let loader = asset_loader();
    let palettes = AppConfig::load_from_assets(&loader)?.palettes()?;
    let palette = palettes
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown palette: {name}"))?;

    let cache = ConversionCache::new();
    let colors: Vec<(&String, String)> = palette
        .colors()
        .iter()
        .map(|(color_name, color)| {
            (
                color_name,
                cache.get_or_compute(color, representation).to_string(),
            )
        })
        .collect();

    if json {
        let value = serde_json::json!({
            "name": palette.name(),
            "mode": palette.mode().as_str(),
            "description": palette.description(),
            "representation": representation.name(),
            "colors": colors
                .iter()
                .map(|(n, v)| serde_json::json!({ "name": n, "value": v }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} ({}): {}", palette.name(), palette.mode(), palette.description());
        for ((color_name, value), color) in colors.iter().zip(palette.colors().values()) {
            println!("  {color_name:<8} {value:<28} {color}");
        }
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(templates: bool, config: bool, force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Templates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Neither flag means both
    let mut categories = Vec::new();
    if templates || !config {
        categories.push(AssetCategory::Templates);
    }
    if config || !templates {
        categories.push(AssetCategory::Config);
    }

    let report = asset_loader().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }
    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let templates_dir = std::env::var("TEMPLATES_DIR").ok();

    println!("Themeforge v{VERSION}");
    println!("Editor and terminal themes from OKLCH palettes\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE   = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEMPLATES_DIR = {}",
        templates_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:    {config_source}");

    let loader = asset_loader();
    let embedded_count = AssetLoader::list_embedded(AssetCategory::Templates).len();
    match templates_dir {
        Some(ref path) if PathBuf::from(path).exists() => println!(
            "  Templates: {path} ({} files, {embedded_count} embedded)",
            loader.list_templates().len()
        ),
        _ => println!("  Templates: embedded ({embedded_count} files)"),
    }

    println!("\nCommands:");
    println!("  themeforge build     Render theme files");
    println!("  themeforge list      List palettes and targets");
    println!("  themeforge palette   Print a palette's colors");
    println!("  themeforge init      Extract embedded assets");
    println!("\nRun 'themeforge --help' for more details.");
}
