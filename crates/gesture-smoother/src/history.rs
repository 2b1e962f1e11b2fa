//! Rolling gesture history and stabilization

use classifier_client::Gesture;
use std::collections::VecDeque;
use tracing::debug;

/// Window size for the unanimous vote
pub const HISTORY_CAPACITY: usize = 5;

/// Sliding window of the most recent raw gestures (oldest evicted first).
/// Invariant: never holds more than `HISTORY_CAPACITY` entries.
#[derive(Debug, Clone, Default)]
pub struct GestureHistory {
    entries: VecDeque<Gesture>,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Push a raw gesture, evicting the oldest entry beyond capacity
    pub fn push(&mut self, gesture: Gesture) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(gesture);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == HISTORY_CAPACITY
    }

    /// The unanimous gesture, if the window is full and all entries agree
    pub fn unanimous(&self) -> Option<Gesture> {
        if !self.is_full() {
            return None;
        }
        let first = *self.entries.front()?;
        if self.entries.iter().all(|&g| g == first) {
            Some(first)
        } else {
            None
        }
    }
}

/// A stabilized gesture change, from the previously displayed gesture to the
/// newly agreed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureChange {
    pub from: Gesture,
    pub to: Gesture,
}

/// Majority-vote smoothing filter over raw classifications.
///
/// The stabilized gesture only moves when the last `HISTORY_CAPACITY` raw
/// gestures agree unanimously; it never reverts mid-disagreement.
#[derive(Debug, Clone)]
pub struct GestureSmoother {
    history: GestureHistory,
    stabilized: Gesture,
}

impl GestureSmoother {
    pub fn new() -> Self {
        Self {
            history: GestureHistory::new(),
            stabilized: Gesture::NoFace,
        }
    }

    /// Feed one raw classification. Returns the change when the stabilized
    /// gesture actually moves.
    pub fn observe(&mut self, raw: Gesture) -> Option<GestureChange> {
        self.history.push(raw);
        match self.history.unanimous() {
            Some(agreed) if agreed != self.stabilized => {
                let from = std::mem::replace(&mut self.stabilized, agreed);
                debug!(?from, to = ?agreed, "Stabilized gesture changed");
                Some(GestureChange { from, to: agreed })
            }
            _ => None,
        }
    }

    /// Currently displayed gesture
    pub fn stabilized(&self) -> Gesture {
        self.stabilized
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }
}

impl Default for GestureSmoother {
    fn default() -> Self {
        Self::new()
    }
}
