//! Capture session lifecycle
//!
//! The hardware stream is a scoped resource: it is owned by exactly one
//! `CaptureSession`, released on every exit path, and `release` is
//! idempotent.

use crate::{CameraConfig, CameraError, VideoFrame};
use tracing::{debug, info, warn};

/// Abstraction over a physical (or synthetic) camera device.
///
/// Implementations own the underlying hardware handle. `open` maps platform
/// failures to `PermissionDenied` / `DeviceUnavailable`; `release` must stop
/// all underlying tracks and be safe to call more than once.
pub trait FrameSource: Send {
    /// Acquire the device. Called once by `StreamManager::start`.
    fn open(&mut self, config: &CameraConfig) -> Result<(), CameraError>;

    /// Produce the most recent frame from the live stream.
    fn next_frame(&mut self) -> Result<VideoFrame, CameraError>;

    /// Stop all underlying tracks. Must be idempotent.
    fn release(&mut self);
}

/// An active camera capture session.
///
/// Exclusive owner of the frame source while active. Dropping the session
/// releases the hardware as a last resort; callers should prefer an explicit
/// `release` (or `StreamManager::stop`).
pub struct CaptureSession {
    source: Box<dyn FrameSource>,
    active: bool,
}

impl CaptureSession {
    fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source,
            active: true,
        }
    }

    /// Whether the session still owns a live stream
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pull the next frame from the live stream
    pub fn next_frame(&mut self) -> Result<VideoFrame, CameraError> {
        if !self.active {
            return Err(CameraError::NotActive);
        }
        self.source.next_frame()
    }

    /// Release all underlying hardware tracks. Idempotent.
    pub fn release(&mut self) {
        if self.active {
            self.source.release();
            self.active = false;
            info!("Capture session released");
        } else {
            debug!("Capture session already released");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if self.active {
            warn!("Capture session dropped while active, releasing stream");
            self.release();
        }
    }
}

/// Manages the single active capture session.
pub struct StreamManager {
    config: CameraConfig,
    session: Option<CaptureSession>,
}

impl StreamManager {
    /// Create a manager for the given camera configuration
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Start a capture session on the given source.
    ///
    /// Any prior session is stopped first, so at most one session holds the
    /// hardware at a time.
    pub fn start(
        &mut self,
        mut source: Box<dyn FrameSource>,
    ) -> Result<&mut CaptureSession, CameraError> {
        self.stop();
        source.open(&self.config)?;
        info!(device = %self.config.device, "Camera stream started");
        Ok(self.session.insert(CaptureSession::new(source)))
    }

    /// Stop and release the current session. Safe to call multiple times.
    pub fn stop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    /// Whether a session is currently active
    pub fn is_active(&self) -> bool {
        self.session.as_ref().map_or(false, CaptureSession::is_active)
    }

    /// Borrow the active session, if any
    pub fn session_mut(&mut self) -> Option<&mut CaptureSession> {
        self.session.as_mut()
    }
}

impl Drop for StreamManager {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        releases: Arc<AtomicU32>,
        deny: bool,
    }

    impl FrameSource for CountingSource {
        fn open(&mut self, _config: &CameraConfig) -> Result<(), CameraError> {
            if self.deny {
                return Err(CameraError::PermissionDenied);
            }
            Ok(())
        }

        fn next_frame(&mut self) -> Result<VideoFrame, CameraError> {
            Ok(VideoFrame::new(vec![0; 12], 2, 2, 0, 0))
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_source(releases: &Arc<AtomicU32>) -> Box<CountingSource> {
        Box::new(CountingSource {
            releases: releases.clone(),
            deny: false,
        })
    }

    #[test]
    fn test_start_stops_prior_session() {
        let releases = Arc::new(AtomicU32::new(0));
        let mut manager = StreamManager::new(CameraConfig::default());

        manager.start(counting_source(&releases)).unwrap();
        manager.start(counting_source(&releases)).unwrap();

        // First stream released exactly once when the second started
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(manager.is_active());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let releases = Arc::new(AtomicU32::new(0));
        let mut manager = StreamManager::new(CameraConfig::default());

        manager.start(counting_source(&releases)).unwrap();
        manager.stop();
        manager.stop();

        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert!(!manager.is_active());
    }

    #[test]
    fn test_drop_releases_stream() {
        let releases = Arc::new(AtomicU32::new(0));
        {
            let mut manager = StreamManager::new(CameraConfig::default());
            manager.start(counting_source(&releases)).unwrap();
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_permission_denied_leaves_no_session() {
        let releases = Arc::new(AtomicU32::new(0));
        let mut manager = StreamManager::new(CameraConfig::default());

        let denied = Box::new(CountingSource {
            releases: releases.clone(),
            deny: true,
        });
        assert!(matches!(
            manager.start(denied),
            Err(CameraError::PermissionDenied)
        ));
        assert!(!manager.is_active());
    }

    #[test]
    fn test_released_session_rejects_frames() {
        let releases = Arc::new(AtomicU32::new(0));
        let mut manager = StreamManager::new(CameraConfig::default());

        let session = manager.start(counting_source(&releases)).unwrap();
        assert!(session.next_frame().is_ok());
        session.release();
        assert!(matches!(session.next_frame(), Err(CameraError::NotActive)));
    }
}
