use anyhow::{Context, Result};

use stellar_sample::pipeline;
use stellar_sample::SamplerConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = SamplerConfig::resolve().context("loading configuration")?;
    let written = pipeline::run(&config).with_context(|| {
        format!(
            "sampling {} into {}",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;
    log::info!("done, {written} rows written");
    Ok(())
}
