//! Vigil — driver drowsiness monitor
//!
//! Wires the capture-classify-smooth loop together: camera session,
//! per-tick frame encoding, remote classification, gesture smoothing, and
//! presentation state, with settings snapshots read from the persisted
//! store on every tick.

pub mod app_config;
pub mod pipeline;
pub mod settings;

pub use app_config::AppConfig;
pub use pipeline::MonitorPipeline;
pub use settings::{JsonSettingsStore, Settings, SettingsProvider, Theme};

use camera_stream::CameraError;
use frame_sampler::SamplerError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Pipeline error types. Per-frame classification failures are not here:
/// they are logged and skipped, never fatal to the loop.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("Settings error: {0}")]
    Settings(#[from] settings::SettingsError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Initialize the global tracing subscriber
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
