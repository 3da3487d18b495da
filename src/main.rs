//! Command-line front end for pick_colors

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pick_colors::color::{delta_e_2000, delta_e_76};
use pick_colors::image_loader::load_image;
use pick_colors::{
    analyze_point, ColorConverter, ContainerSize, DeltaECategory, Illuminant,
    ImageCoordinateMapper, Point, RgbColor, SampleSize, SamplerSettings,
};

#[derive(Parser)]
#[command(name = "pick-colors")]
#[command(about = "Sample image colors and measure CIE L*a*b* differences")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the averaged color under a pointer position
    Sample {
        /// Image file
        image: PathBuf,

        /// Pointer x, relative to the container
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Pointer y, relative to the container
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Display container as WIDTHxHEIGHT (default: the image's natural size)
        #[arg(long, value_parser = parse_container)]
        container: Option<ContainerSize>,

        /// Reference illuminant: D65, A or F2
        #[arg(long)]
        illuminant: Option<Illuminant>,

        /// Side of the averaging window (odd)
        #[arg(long)]
        sample_size: Option<u32>,

        /// Standard to compare against, as #RRGGBB
        #[arg(long)]
        standard: Option<RgbColor>,

        /// Settings JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Convert hex colors to L*a*b*
    Convert {
        /// Colors as #RRGGBB or #RGB
        #[arg(required = true)]
        colors: Vec<RgbColor>,

        /// Reference illuminant: D65, A or F2
        #[arg(long, default_value = "D65")]
        illuminant: Illuminant,
    },
    /// Compare a sample against a standard
    Compare {
        sample: RgbColor,
        standard: RgbColor,

        /// Reference illuminant: D65, A or F2
        #[arg(long, default_value = "D65")]
        illuminant: Illuminant,
    },
    /// Write default settings to a JSON file
    InitConfig {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn parse_container(value: &str) -> Result<ContainerSize, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid dimension '{v}': {e}"))
    };
    Ok(ContainerSize::new(parse(width)?, parse(height)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pick_colors=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Sample {
            image,
            x,
            y,
            container,
            illuminant,
            sample_size,
            standard,
            config,
        } => run_sample_command(
            &image,
            Point::new(x, y),
            container,
            illuminant,
            sample_size,
            standard,
            config.as_deref(),
        ),
        Commands::Convert { colors, illuminant } => {
            run_convert_command(&colors, illuminant);
            Ok(())
        }
        Commands::Compare {
            sample,
            standard,
            illuminant,
        } => {
            run_compare_command(sample, standard, illuminant);
            Ok(())
        }
        Commands::InitConfig { path, force } => run_init_config_command(&path, force),
    }
}

fn run_sample_command(
    image: &Path,
    pointer: Point,
    container: Option<ContainerSize>,
    illuminant: Option<Illuminant>,
    sample_size: Option<u32>,
    standard: Option<RgbColor>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let mut settings = match config {
        Some(path) => SamplerSettings::from_json_file(path)?,
        None => SamplerSettings::default(),
    };
    if let Some(illuminant) = illuminant {
        settings = settings.with_illuminant(illuminant);
    }
    if let Some(size) = sample_size {
        settings = settings.with_sample_size(SampleSize::new(size)?);
    }

    let surface =
        load_image(image).with_context(|| format!("Failed to load {}", image.display()))?;
    let natural = surface.size();
    let container = container.unwrap_or_else(|| natural.into());
    let mapper = ImageCoordinateMapper::new(natural, container)?;

    let reading = analyze_point(&surface, &mapper, pointer, &settings, standard)?;

    println!("{}", serde_json::to_string_pretty(&reading)?);

    eprintln!(
        "{} at ({}, {}) | L*={:.1} a*={:.1} b*={:.1} ({}, {}x{} window)",
        reading.hex,
        reading.source_pixel.x,
        reading.source_pixel.y,
        reading.lab.l,
        reading.lab.a,
        reading.lab.b,
        settings.illuminant,
        settings.sample_size,
        settings.sample_size,
    );
    if let (Some(delta_e), Some(category)) = (reading.delta_e, reading.category()) {
        eprintln!("ΔE2000 = {delta_e:.2} ({category})");
    }
    Ok(())
}

fn run_convert_command(colors: &[RgbColor], illuminant: Illuminant) {
    let converter = ColorConverter::new(illuminant);
    for &rgb in colors {
        let lab = converter.rgb_to_lab(rgb);
        println!(
            "{}  rgb({}, {}, {})  L*={:.2} a*={:.2} b*={:.2}",
            rgb, rgb.r, rgb.g, rgb.b, lab.l, lab.a, lab.b
        );
    }
}

fn run_compare_command(sample: RgbColor, standard: RgbColor, illuminant: Illuminant) {
    let converter = ColorConverter::new(illuminant);
    let lab1 = converter.rgb_to_lab(sample);
    let lab2 = converter.rgb_to_lab(standard);
    let de2000 = delta_e_2000(lab1, lab2);

    println!("Illuminant: {} ({})", illuminant, illuminant.description());
    println!("ΔE76:   {:.2}", delta_e_76(lab1, lab2));
    println!("ΔE2000: {:.2}", de2000);
    println!("Category: {}", DeltaECategory::from_delta_e(de2000));
}

fn run_init_config_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    SamplerSettings::default().to_json_file(path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_accepts_negative_pointer() {
        let cli = Cli::try_parse_from(["pick-colors", "sample", "x.png", "--x", "-5", "--y", "-0.5"])
            .unwrap();
        match cli.command {
            Commands::Sample { x, y, .. } => {
                assert_eq!(x, -5.0);
                assert_eq!(y, -0.5);
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_parse_container() {
        let container = parse_container("800x600").unwrap();
        assert_eq!((container.width, container.height), (800.0, 600.0));
        assert!(parse_container("800").is_err());
        assert!(parse_container("axb").is_err());
    }
}
