//! Transition video selection
//!
//! When the stabilized gesture moves between two lettered gestures, the
//! avatar is suppressed for a fixed hold while the matching transition
//! asset plays. The "previous gesture" tracking variable is committed only
//! when the hold expires.

use crate::history::GestureChange;
use classifier_client::Gesture;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a transition asset is displayed
pub const TRANSITION_HOLD: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
struct ActiveTransition {
    stem: String,
    pending: Gesture,
    until: Instant,
}

/// Tracks the on-screen gesture and the currently playing transition.
#[derive(Debug, Clone)]
pub struct TransitionPlayer {
    committed: Gesture,
    active: Option<ActiveTransition>,
    hold: Duration,
}

impl TransitionPlayer {
    pub fn new() -> Self {
        Self::with_hold(TRANSITION_HOLD)
    }

    pub fn with_hold(hold: Duration) -> Self {
        Self {
            committed: Gesture::NoFace,
            active: None,
            hold,
        }
    }

    /// React to a stabilized gesture change.
    ///
    /// Both endpoints must map to a letter for a transition to play; any
    /// change involving `NoFace` commits immediately with no asset. A change
    /// arriving mid-transition force-commits the pending gesture first.
    pub fn on_change(&mut self, change: &GestureChange, skin: u8, now: Instant) {
        if let Some(active) = self.active.take() {
            self.committed = active.pending;
        }

        match (self.committed.letter(), change.to.letter()) {
            (Some(from), Some(to)) if self.committed != change.to => {
                let stem = format!("{from}-{to}{skin}");
                debug!(%stem, "Transition started");
                self.active = Some(ActiveTransition {
                    stem,
                    pending: change.to,
                    until: now + self.hold,
                });
            }
            _ => {
                self.committed = change.to;
            }
        }
    }

    /// The transition asset stem to display right now, committing the
    /// pending gesture once the hold expires.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let expired = self.active.as_ref().map_or(false, |a| now >= a.until);
        if expired {
            if let Some(active) = self.active.take() {
                debug!(gesture = ?active.pending, "Transition finished");
                self.committed = active.pending;
            }
        }
        self.active.as_ref().map(|a| a.stem.as_str())
    }

    /// Gesture whose plain avatar is currently revealed
    pub fn committed(&self) -> Gesture {
        self.committed
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Default for TransitionPlayer {
    fn default() -> Self {
        Self::new()
    }
}
