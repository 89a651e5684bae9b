extern crate cs_recovery;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use log::info;

use cs_recovery::image::metrics::psnr;
use cs_recovery::io::{load_image_as_gray, load_parameters, save_image, SAMPLE_IMAGE};
use cs_recovery::{RecoveryDriver, RecoveryParameters};

/// Restores a grayscale image from a random tenth of its pixels.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image; the bundled sample is used when omitted
    image: Option<PathBuf>,

    /// YAML file with recovery parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving original.png, squeezed.png and restored.png
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Seed for the pixel sampler, overrides the config
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut parameters = match &args.config {
        Some(path) => load_parameters(path).wrap_err("loading recovery parameters failed")?,
        None => RecoveryParameters::default(),
    };
    if args.seed.is_some() {
        parameters.seed = args.seed;
    }

    let image_path = args.image.clone().unwrap_or_else(|| PathBuf::from(SAMPLE_IMAGE));
    let original = load_image_as_gray(&image_path).wrap_err_with(|| format!("could not load {}", image_path.display()))?;
    info!("Loaded {} ({}x{})", image_path.display(), original.height(), original.width());

    fs::create_dir_all(&args.output_dir).wrap_err("could not create output directory")?;
    save(&args.output_dir, "original.png", &original)?;

    let mut rng = parameters.rng();
    let sampled = RecoveryDriver::new(original.clone(), parameters)?.sample(&mut rng)?;
    save(&args.output_dir, "squeezed.png", &sampled.samples().squeezed())?;

    let result = sampled.optimize()?.reconstruct()?;
    save(&args.output_dir, "restored.png", &result.image)?;

    info!("PSNR restored vs original: {:.2} dB", psnr(&original, &result.image)?);
    Ok(())
}

fn save(dir: &Path, name: &str, image: &cs_recovery::Image) -> Result<()> {
    let path = dir.join(name);
    save_image(&path, image).wrap_err_with(|| format!("could not write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
