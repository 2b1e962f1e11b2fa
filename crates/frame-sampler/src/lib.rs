//! Frame Sampler
//!
//! Turns a live video frame into the classifier's input image: centered
//! zoom crop, brightness/contrast adjustment, grayscale conversion, resize
//! to the model input size, JPEG encoding. Also provides the `CaptureGate`
//! cancellation flag that the sampling loop checks at the top of every tick.

pub mod gate;
pub mod transform;

pub use gate::CaptureGate;
pub use transform::{adjust_levels, encode_frame, zoom_crop, REFERENCE_ZOOM};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Sampler error types
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("Invalid frame buffer dimensions")]
    Buffer,

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Per-tick capture adjustments, snapshotted from the settings store.
///
/// 100 means "unchanged" for brightness and contrast. Zoom is a percentage
/// against the reference baseline of 80 (see `REFERENCE_ZOOM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub brightness_percent: u32,
    pub contrast_percent: u32,
    pub zoom_percent: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            brightness_percent: 100,
            contrast_percent: 100,
            zoom_percent: 200,
        }
    }
}

/// Sampling loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Sampling period in milliseconds
    pub period_ms: u64,
    /// Output bitmap edge length (model input is square)
    pub output_size: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Convert to grayscale before encoding (the classifier consumes
    /// single-channel input)
    pub grayscale: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period_ms: 500,
            output_size: 112,
            jpeg_quality: 80,
            grayscale: true,
        }
    }
}

impl SamplerConfig {
    /// Interval between sampling ticks
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}
