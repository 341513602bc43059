use crate::error::Result;
use crate::processors::ConversionConfig;
use crate::utils::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_OUT_DIR, DEFAULT_PRECISION_DECIMALS, ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Run settings, layered from defaults, an optional TOML file and
/// `MEMBER_HEATMAP_*` environment variables. CLI flags are applied last by
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub out_dir: PathBuf,

    pub aggregate: bool,

    #[validate(range(min = -5))]
    pub precision_decimals: i32,

    #[validate(range(min = 1))]
    pub max_workers: usize,

    #[validate(range(min = 1))]
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            aggregate: true,
            precision_decimals: DEFAULT_PRECISION_DECIMALS,
            max_workers: num_cpus::get(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the process environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(config_file, environment())
    }

    /// Load settings with an explicit environment source layered over the file
    pub fn load_with_env(config_file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig {
            aggregate: self.aggregate,
            precision_decimals: self.precision_decimals,
        }
    }
}

/// `MEMBER_HEATMAP_*` variables, e.g. `MEMBER_HEATMAP_PRECISION_DECIMALS=2`
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}
