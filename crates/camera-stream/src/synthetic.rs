//! Synthetic frame source
//!
//! Deterministic moving test pattern used by the demo binary and by tests
//! that need a live-looking stream without camera hardware.

use crate::{CameraConfig, CameraError, FrameSource, VideoFrame};
use std::time::Instant;
use tracing::debug;

/// Generates a scrolling gradient pattern at the configured resolution.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    sequence: u32,
    opened: bool,
    started: Option<Instant>,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            sequence: 0,
            opened: false,
            started: None,
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self, config: &CameraConfig) -> Result<(), CameraError> {
        self.width = config.width;
        self.height = config.height;
        self.opened = true;
        self.started = Some(Instant::now());
        debug!(width = self.width, height = self.height, "Synthetic camera opened");
        Ok(())
    }

    fn next_frame(&mut self) -> Result<VideoFrame, CameraError> {
        if !self.opened {
            return Err(CameraError::NotActive);
        }

        let mut data = Vec::with_capacity((self.width * self.height * 3) as usize);
        let phase = self.sequence;
        for y in 0..self.height {
            for x in 0..self.width {
                let r = ((x + phase) % 256) as u8;
                let g = ((y + phase) % 256) as u8;
                let b = ((x + y) % 256) as u8;
                data.extend_from_slice(&[r, g, b]);
            }
        }

        let timestamp_ms = self
            .started
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0);
        let frame = VideoFrame::new(data, self.width, self.height, timestamp_ms, self.sequence);
        self.sequence = self.sequence.wrapping_add(1);
        Ok(frame)
    }

    fn release(&mut self) {
        self.opened = false;
    }
}
