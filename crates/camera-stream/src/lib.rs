//! Camera Stream Library for Vigil
//!
//! Owns the webcam media stream lifecycle for the drowsiness-monitoring
//! capture loop:
//! - `FrameSource` abstraction over the physical device
//! - `CaptureSession` with exclusive ownership of the stream
//! - `StreamManager` enforcing the one-active-session contract

pub mod frame;
pub mod session;
pub mod synthetic;

pub use frame::VideoFrame;
pub use session::{CaptureSession, FrameSource, StreamManager};
pub use synthetic::SyntheticCamera;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Camera error types
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Streaming error: {0}")]
    Stream(String),

    #[error("Capture session is not active")]
    NotActive,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Device identifier (e.g. "/dev/video0" or a platform device id)
    pub device: String,
    /// Capture width
    pub width: u32,
    /// Capture height
    pub height: u32,
    /// Target FPS
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 680,
            height: 480,
            fps: 24,
        }
    }
}
