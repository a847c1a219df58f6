use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::rename::RenameMap;
use crate::data::sampler::validate_fraction;
use crate::data::writer::WriteOptions;
use crate::error::{Result, SampleError};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "STELLAR_SAMPLE_CONFIG";

// ---------------------------------------------------------------------------
// SamplerConfig
// ---------------------------------------------------------------------------

/// Process parameters. Every field has a default, so a config file only
/// needs to name what it changes:
///
/// ```json
/// { "input_path": "gaia_DR3.csv", "sample_fraction": 0.05, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Proportion of rows to keep, in (0, 1].
    pub sample_fraction: f64,
    pub rename_map: RenameMap,
    pub write_index: bool,
    pub atomic_write: bool,
    /// Fixed seed for reproducible samples. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("gaia_DR3.csv"),
            output_path: PathBuf::from("sample_gaia_DR3.csv"),
            sample_fraction: 0.014,
            rename_map: RenameMap::default(),
            write_index: true,
            atomic_write: false,
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SampleError::Config(format!("reading {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| SampleError::Config(format!("parsing {}: {e}", path.display())))
    }

    /// Use the file named by [`CONFIG_ENV`] when set, the defaults otherwise.
    pub fn resolve() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => {
                log::info!("reading configuration from {}", Path::new(&path).display());
                Self::from_file(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(SampleError::Config("input_path is empty".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(SampleError::Config("output_path is empty".into()));
        }
        validate_fraction(self.sample_fraction)
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            write_index: self.write_index,
            atomic: self.atomic_write,
        }
    }
}
