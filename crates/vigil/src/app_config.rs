//! Application configuration
//!
//! Layered: built-in defaults, then an optional `vigil.toml`, then `VIGIL_*`
//! environment variables.

use crate::PipelineError;
use camera_stream::CameraConfig;
use classifier_client::ClassifierConfig;
use config::{Config, Environment, File};
use frame_sampler::SamplerConfig;
use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Camera device configuration
    pub camera: CameraConfig,
    /// Sampling loop configuration
    pub sampler: SamplerConfig,
    /// Remote classifier endpoint
    pub classifier: ClassifierConfig,
    /// Path of the persisted settings document
    pub settings_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            sampler: SamplerConfig::default(),
            classifier: ClassifierConfig::default(),
            settings_path: "vigil-settings.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `vigil.toml` (optional) and `VIGIL_*`
    /// environment variables.
    pub fn load() -> Result<Self, PipelineError> {
        Self::load_from("vigil")
    }

    /// Load from a named config file basename (without extension)
    pub fn load_from(basename: &str) -> Result<Self, PipelineError> {
        Config::builder()
            .add_source(File::with_name(basename).required(false))
            .add_source(Environment::with_prefix("VIGIL").separator("__"))
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))
    }
}
