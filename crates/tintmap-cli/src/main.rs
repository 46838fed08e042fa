//! tintmap - map image colors to a configured palette.
//!
//! Reads a settings YAML (palette, affinity, worker count), maps the
//! input image through the palette engine, and writes the result. Works
//! on files or on stdin/stdout byte streams.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tintmap_core::{ImageMapper, Settings};
use tintmap_io::{Format, ImageData};

#[derive(Parser)]
#[command(name = "tintmap")]
#[command(version, about = "Map image colors to a configured palette")]
#[command(long_about = "
Maps every pixel of an image to the closest color of a configured
palette (nearest in CIE Lab), blended toward the original by the
palette-affinity factor.

Examples:
  tintmap -s theme.yaml -i shot.png -o themed.png
  tintmap -s theme.yaml < shot.jpg > themed.jpg
  tintmap -s theme.yaml -i shot.jpg -f png > themed.png
")]
struct Cli {
    /// Settings YAML file path
    #[arg(short, long, default_value = "settings.yaml")]
    settings: PathBuf,

    /// Input image file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output image file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for stdout streams: jpeg, png, gif
    #[arg(short, long, default_value = "jpeg")]
    format: String,

    /// Worker threads (0 = settings value, or host parallelism)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cli.verbose {
                    "debug".into()
                } else {
                    "warn".into()
                }
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("failed to load settings from {}", cli.settings.display()))?;

    let workers = if cli.threads > 0 {
        cli.threads
    } else {
        settings.cpus
    };
    let mapper = ImageMapper::with_workers(&settings, workers)?;
    debug!(workers = mapper.workers(), "engine configured");

    let image = load_input(&cli)?;
    debug!(
        width = image.width,
        height = image.height,
        channels = image.channels,
        "input decoded"
    );

    let mapped = mapper.map_rgba(&image.to_rgba8(), image.width, image.height)?;
    let output = ImageData::from_rgba8(image.width, image.height, mapped);

    write_output(&cli, &output)?;

    Ok(())
}

fn load_input(cli: &Cli) -> Result<ImageData> {
    match &cli.input {
        Some(path) => tintmap_io::read(path)
            .with_context(|| format!("failed to load image {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("failed to read image from stdin")?;
            tintmap_io::read_from_memory(&bytes).context("failed to decode stdin image")
        }
    }
}

fn write_output(cli: &Cli, image: &ImageData) -> Result<()> {
    match &cli.output {
        Some(path) => {
            tintmap_io::write(path, image)
                .with_context(|| format!("failed to write image {}", path.display()))?;
            println!("Image mapped and saved at: {}", path.display());
            Ok(())
        }
        None => {
            let format = Format::from_name(&cli.format);
            if format == Format::Unknown {
                bail!("unknown output format {:?}", cli.format);
            }
            let bytes = tintmap_io::write_to_memory(format, image)
                .context("failed to encode output stream")?;
            std::io::stdout()
                .write_all(&bytes)
                .context("failed to write image to stdout")?;
            Ok(())
        }
    }
}
