use anyhow::{Context, Result};
use clap::Parser;
use palette_extract::{ColorSpace, ExtractConfig, ModelKind, extract, pixels_from_bytes, to_hex};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract a color palette from images by clustering a sample of their pixels.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors in the palette
    #[arg(short = 'k', long, default_value_t = 5)]
    palette_size: usize,

    /// Pixels sampled from each image before clustering
    #[arg(short = 'n', long, default_value_t = 500)]
    sample_size: usize,

    /// KMeans, BisectingKMeans, GaussianMixture or MiniBatchKMeans
    #[arg(short, long, default_value = "KMeans")]
    model: ModelKind,

    /// Seed for sampling and model initialization
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Space distances are measured in: rgb or lab
    #[arg(short = 'c', long, default_value = "rgb")]
    color_space: ColorSpace,

    /// Print one JSON object per image instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ExtractConfig::new(args.sample_size, args.palette_size, args.model, args.seed)
        .with_color_space(args.color_space);

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let pixels = pixels_from_bytes(&bytes)
            .with_context(|| format!("decoding {}", input.display()))?;
        let palette = extract(&pixels, &config)
            .with_context(|| format!("extracting palette from {}", input.display()))?;
        let hex: Vec<String> = palette.into_iter().map(to_hex).collect();

        if args.json {
            let out = serde_json::json!({
                "input": input.display().to_string(),
                "model": config.model.name(),
                "seed": config.seed,
                "sample_size": config.sample_size,
                "palette": hex,
            });
            println!("{out}");
        } else {
            let swatches: Vec<String> = hex.iter().map(|h| format!("#{h}")).collect();
            println!("{}: {}", input.display(), swatches.join(" "));
        }
    }

    Ok(())
}
