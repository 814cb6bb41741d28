//! Server configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then `LISTING_*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use feature_engine::{AssemblerConfig, EncodingStrategy};
use inference_engine::PredictorConfig;
use data_validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "listing-pipeline.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LISTING";

/// API server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Artifact bundle (.json or .bin)
    pub bundle_path: PathBuf,
    /// Categorical encoding strategy
    pub encoding: EncodingStrategy,
    /// Reject unparseable text fields instead of imputing them
    pub strict_format: bool,
    /// Largest accepted batch
    pub max_batch_size: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            bundle_path: PathBuf::from("ckpt/bundle.json"),
            encoding: EncodingStrategy::Static,
            strict_format: false,
            max_batch_size: 1000,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Load from the default file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)))
    }

    /// Load from an optional file and the environment
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();
        let mut builder = Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("bundle_path", defaults.bundle_path.to_string_lossy().to_string())?
            .set_default("encoding", defaults.encoding.as_str())?
            .set_default("strict_format", defaults.strict_format)?
            .set_default("max_batch_size", defaults.max_batch_size as i64)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Predictor settings derived from this configuration
    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            encoding: self.encoding,
            assembler: AssemblerConfig {
                validation: ValidationConfig {
                    strict_format: self.strict_format,
                },
            },
        }
    }
}
