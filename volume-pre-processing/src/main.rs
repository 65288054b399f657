/// Volume pre-processing entry point: synthetic volumes, tensor fields and RGB stacks
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use constants::synthetic::{DEFAULT_SPIRAL_SCALE, DEFAULT_VOLUME_SIZE};
use constants::tensor::{DEFAULT_MASK_SIGMA, RGB_VOLUME_FILE, VOLUME_FILE};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use volume_pre_processing::image_stack::{save_color_stack, save_gray_stack};
use volume_pre_processing::npy::{save_rgb_volume, save_volume};
use volume_pre_processing::synthetic::{gen_sample, gen_spiral};
use volume_pre_processing::{TensorFieldConverter, TensorOptions, to_rgb};

#[derive(Parser)]
#[command(name = "volume-pre-processing")]
#[command(version, about = "Generate test volumes and structure tensor fields for visualisation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SyntheticKind {
    /// Spheres, a torus and two tubes
    Sample,
    /// A single traced spiral curve
    Spiral,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic scalar volume
    Generate {
        #[arg(value_enum)]
        kind: SyntheticKind,

        /// Side length of the cubic volume
        #[arg(long, default_value_t = DEFAULT_VOLUME_SIZE)]
        size: usize,

        /// Spiral scale factor
        #[arg(long, default_value_t = DEFAULT_SPIRAL_SCALE)]
        scale: f64,

        /// Standard deviation of additive noise (sample scene only)
        #[arg(long, default_value_t = 0.0)]
        noise: f64,

        /// Seed for the noise
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(long, short)]
        out: PathBuf,

        /// Also write a grayscale bitmap stack
        #[arg(long)]
        stack: bool,
    },

    /// Compute the structure tensor field of a volume (.npy file or slice directory)
    Tensor {
        input: PathBuf,

        /// Output directory
        #[arg(long, short)]
        out: PathBuf,

        /// Side of the box smoothing kernel, 0 disables smoothing.
        /// Defaults to 0, or 3 with --mask
        #[arg(long, allow_hyphen_values = true)]
        sigma: Option<i64>,

        /// Standard deviation of rectified tensor noise
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        noise: f64,

        /// Clear tensors where the input is exactly zero
        #[arg(long)]
        mask: bool,

        /// Seed for the noise
        #[arg(long)]
        seed: Option<u64>,

        /// Rescale the input to [0, 1] first
        #[arg(long)]
        normalize: bool,

        /// Also write the RGB volume
        #[arg(long)]
        rgb: bool,
    },

    /// Replicate a volume into three colour channels
    Rgb {
        input: PathBuf,

        /// Output directory
        #[arg(long, short)]
        out: PathBuf,

        /// Also write a colour bitmap stack (values assumed in [0, 1])
        #[arg(long)]
        stack: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            kind,
            size,
            scale,
            noise,
            seed,
            out,
            stack,
        } => generate(kind, size, scale, noise, seed, &out, stack),
        Commands::Tensor {
            input,
            out,
            sigma,
            noise,
            mask,
            seed,
            normalize,
            rgb,
        } => {
            let converter = TensorFieldConverter::new(&input, &out)
                .with_context(|| format!("failed to prepare conversion of {}", input.display()))?;
            let sigma = sigma.unwrap_or(if mask { DEFAULT_MASK_SIGMA } else { 0 });
            let options = TensorOptions {
                sigma,
                noise,
                mask,
                seed,
                normalize,
                write_rgb: rgb,
            };
            converter.convert(&options).context("tensor field conversion failed")?;
            Ok(())
        }
        Commands::Rgb { input, out, stack } => rgb(&input, &out, stack),
    }
}

fn generate(
    kind: SyntheticKind,
    size: usize,
    scale: f64,
    noise: f64,
    seed: Option<u64>,
    out: &Path,
    stack: bool,
) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;

    let volume = match kind {
        SyntheticKind::Spiral => gen_spiral(size, scale)?,
        SyntheticKind::Sample => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            gen_sample((size, size, size), noise, &mut rng)?
        }
    };

    save_volume(&out.join(VOLUME_FILE), &volume)?;
    if stack {
        let prefix = out.join("slice").display().to_string();
        save_gray_stack(&prefix, &volume.view())?;
    }

    info!("Generation complete!");
    Ok(())
}

fn rgb(input: &Path, out: &Path, stack: bool) -> Result<()> {
    let converter = TensorFieldConverter::new(input, out)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let volume = converter.load_input()?;

    let rgb = to_rgb(&volume.view());
    save_rgb_volume(&out.join(RGB_VOLUME_FILE), &rgb.mapv(|v| v as f32))?;
    if stack {
        let prefix = out.join("rgb").display().to_string();
        save_color_stack(&prefix, &rgb.view())?;
    }

    info!("RGB volume complete!");
    Ok(())
}
