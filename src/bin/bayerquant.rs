#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

//! Reduces an image to a small palette with ordered dithering and writes the result as a PNG.

use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use bayerquant::{io, BayerMatrix, ImagePipeline, PaletteSize};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Path of the image to quantize (PNG or JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Path to write the quantized PNG to
    #[arg(short, long)]
    output: PathBuf,

    /// Maximum number of colors in the palette (values below 2 are raised to 2)
    #[arg(short, long, default_value_t = PaletteSize::DEFAULT.into_inner())]
    palette_size: u32,

    /// Order of the Bayer matrix: 2, 4, or 8 (anything else uses 8)
    #[arg(short, long, default_value_t = BayerMatrix::default().order())]
    bayer: u32,

    /// Number of threads: 0 uses every core, 1 runs on the current thread
    #[arg(short, long, default_value_t = 0)]
    threads: u8,

    /// Log timings and palette details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let Options {
        input,
        output,
        palette_size,
        bayer,
        threads,
        verbose,
    } = Options::parse();

    let default_filter = if verbose { "bayerquant=debug" } else { "bayerquant=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let time = Instant::now();
    let image = io::open(&input)?;
    tracing::info!(elapsed_ms = time.elapsed().as_millis(), "read image");

    let mut pipeline = ImagePipeline::try_from(&image)
        .with_context(|| format!("{} has too many pixels", input.display()))?;
    pipeline.palette_size(palette_size).bayer_matrix(bayer);

    let time = Instant::now();
    let quantized = match threads {
        0 => pipeline.quantized_rgbaimage_par(),
        1 => pipeline.quantized_rgbaimage(),
        t => rayon::ThreadPoolBuilder::new()
            .num_threads(t.into())
            .build()
            .context("failed to build thread pool")?
            .install(|| pipeline.quantized_rgbaimage_par()),
    };
    tracing::info!(
        elapsed_ms = time.elapsed().as_millis(),
        palette_size = %PaletteSize::from(palette_size),
        matrix = %BayerMatrix::from(bayer),
        "quantized image"
    );

    let time = Instant::now();
    io::save(&quantized, &output)?;
    tracing::info!(elapsed_ms = time.elapsed().as_millis(), "wrote image");

    Ok(())
}
