//! Alarm playback state
//!
//! The view owns the actual audio element; this tracks what it should be
//! doing. While active the selected sound loops; deactivating pauses and
//! rewinds to the start.

use crate::assets;
use tracing::{info, warn};

/// Alarm playback controller
#[derive(Debug, Clone)]
pub struct AlarmPlayer {
    sound_id: String,
    playing: bool,
    position_secs: f32,
}

impl AlarmPlayer {
    pub fn new(sound_id: impl Into<String>) -> Self {
        let sound_id = sound_id.into();
        if !assets::is_known_alarm(&sound_id) {
            warn!(%sound_id, "Unknown alarm sound selected");
        }
        Self {
            sound_id,
            playing: false,
            position_secs: 0.0,
        }
    }

    /// Switch to a different alarm sound, restarting playback position
    pub fn select(&mut self, sound_id: impl Into<String>) {
        let sound_id = sound_id.into();
        if sound_id != self.sound_id {
            self.sound_id = sound_id;
            self.position_secs = 0.0;
        }
    }

    /// Reconcile playback with the derived `alarm_active` flag.
    /// Activation starts the loop; deactivation pauses and rewinds to 0.
    pub fn sync(&mut self, active: bool) {
        if active && !self.playing {
            self.playing = true;
            info!(sound = %self.sound_id, "Alarm started");
        } else if !active && self.playing {
            self.playing = false;
            self.position_secs = 0.0;
            info!("Alarm paused and rewound");
        }
    }

    /// Advance the playback position (reported by the view's audio clock)
    pub fn advance(&mut self, elapsed_secs: f32) {
        if self.playing {
            self.position_secs += elapsed_secs;
        }
    }

    /// Whether the sound should currently be looping
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn sound_id(&self) -> &str {
        &self.sound_id
    }

    pub fn position_secs(&self) -> f32 {
        self.position_secs
    }
}
