//! Gesture Smoother & Presentation State
//!
//! Suppresses flicker from noisy per-frame classifications with a
//! unanimous-vote sliding window, and derives everything the view renders:
//! - gauge percent, stroke color, and caption band
//! - avatar and transition asset keys
//! - alarm activation with loop/pause/rewind semantics

pub mod alarm;
pub mod assets;
pub mod history;
pub mod presentation;
pub mod transition;

pub use alarm::AlarmPlayer;
pub use history::{GestureChange, GestureHistory, GestureSmoother, HISTORY_CAPACITY};
pub use presentation::{
    alarm_active, caption, drowsiness_percent, stroke_color, PresentationState,
};
pub use transition::{TransitionPlayer, TRANSITION_HOLD};
