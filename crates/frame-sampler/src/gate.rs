//! Capture cancellation gate
//!
//! A cloneable flag shared between the sampling loop and whoever stops the
//! capture. The loop checks it at the top of every tick and before applying
//! a classification result that was in flight when capture stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Cloneable capture-active flag
#[derive(Debug, Clone)]
pub struct CaptureGate {
    active: Arc<AtomicBool>,
}

impl CaptureGate {
    /// Create an open gate (capture active)
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether capture is still active
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop the capture. All clones observe the stop; no further ticks are
    /// scheduled once flipped.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            debug!("Capture gate closed");
        }
    }
}

impl Default for CaptureGate {
    fn default() -> Self {
        Self::new()
    }
}
