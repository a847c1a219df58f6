use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SamplerConfig;
use crate::data::loader::load_csv;
use crate::data::rename::rename_columns;
use crate::data::sampler::{sample_rows, sample_size};
use crate::data::writer::write_csv;
use crate::error::Result;

const RULE: &str = "--------------------------";

/// Run load → rename → sample → write once. The first failure aborts the
/// remaining steps, so no output is written unless sampling succeeded.
///
/// Returns the number of rows written.
pub fn run(config: &SamplerConfig) -> Result<usize> {
    let mut rng = match config.seed {
        Some(seed) => {
            log::info!("sampling with fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    run_with_rng(config, &mut rng)
}

pub fn run_with_rng<R: Rng + ?Sized>(config: &SamplerConfig, rng: &mut R) -> Result<usize> {
    config.validate()?;

    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Loading {}", config.input_path.display());
    let mut dataset = load_csv(&config.input_path)?;

    rename_columns(&mut dataset, &config.rename_map)?;

    println!(
        "Sampling {:.1}% of {} rows",
        config.sample_fraction * 100.0,
        dataset.len()
    );
    let sample = sample_rows(&dataset, config.sample_fraction, rng)?;
    debug_assert_eq!(sample.len(), sample_size(config.sample_fraction, dataset.len()));
    println!("{RULE}");
    println!("{sample}");
    println!("{RULE}");

    println!(
        "Writing {} rows to {}",
        sample.len(),
        config.output_path.display()
    );
    write_csv(&sample, &config.output_path, config.write_options())?;
    Ok(sample.len())
}
