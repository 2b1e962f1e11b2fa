//! Presentation state derivation
//!
//! Pure functions from (percent, stabilized gesture, skin) to what the view
//! renders. No I/O here.

use crate::assets;
use classifier_client::Gesture;
use serde::Serialize;

/// Gauge stroke color when no face is visible
pub const NO_FACE_COLOR: (u8, u8, u8) = (128, 128, 128);

/// Percent above which the alarm fires regardless of gesture
pub const ALARM_PERCENT_THRESHOLD: f32 = 70.0;

/// Gauge stroke color. Gray without a face; otherwise red rises and green
/// falls linearly with the drowsiness percent.
pub fn stroke_color(percent: f32, gesture: Gesture) -> (u8, u8, u8) {
    if gesture == Gesture::NoFace {
        return NO_FACE_COLOR;
    }
    let red = (percent * 2.55).round().clamp(0.0, 255.0) as u8;
    let green = ((100.0 - percent) * 2.55).round().clamp(0.0, 255.0) as u8;
    (red, green, 0)
}

/// Caption band for the gauge. Six bands, highest threshold wins.
pub fn caption(percent: f32) -> &'static str {
    if percent >= 90.0 {
        "Danger! Pull over and rest now"
    } else if percent >= 70.0 {
        "Severe drowsiness detected, take a break"
    } else if percent >= 50.0 {
        "You look sleepy, consider stopping soon"
    } else if percent >= 30.0 {
        "Signs of fatigue, stay focused"
    } else if percent >= 10.0 {
        "Slight fatigue detected"
    } else {
        "Fully attentive, keep it up"
    }
}

/// Whether the alarm should be sounding
pub fn alarm_active(gesture: Gesture, percent: f32) -> bool {
    gesture == Gesture::EyesClosed || percent > ALARM_PERCENT_THRESHOLD
}

/// Drowsiness percent for the gauge.
///
/// Drowsy gestures map classifier confidence directly to the gauge;
/// attention maps to its complement; with no face the gauge holds its
/// previous value.
pub fn drowsiness_percent(stabilized: Gesture, confidence: f32, previous: f32) -> f32 {
    let percent = match stabilized {
        Gesture::NoFace => return previous,
        Gesture::Attention => (1.0 - confidence) * 100.0,
        Gesture::EyesClosed | Gesture::Yawning => confidence * 100.0,
    };
    percent.clamp(0.0, 100.0)
}

/// Everything the view needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationState {
    /// Drowsiness percent (0-100)
    pub percent: f32,
    /// Gauge stroke color (RGB)
    pub stroke_color: (u8, u8, u8),
    /// Caption band text
    pub caption: &'static str,
    /// Avatar image key
    pub avatar_asset: String,
    /// Transition video key, suppressing the avatar while set
    pub transition_asset: Option<String>,
    /// Whether the alarm sound should be looping
    pub alarm_active: bool,
}

impl PresentationState {
    /// Derive the full presentation from its inputs
    pub fn derive(
        percent: f32,
        stabilized: Gesture,
        skin: u8,
        transition_stem: Option<&str>,
    ) -> Self {
        Self {
            percent,
            stroke_color: stroke_color(percent, stabilized),
            caption: caption(percent),
            avatar_asset: assets::avatar_file(stabilized, skin),
            transition_asset: transition_stem.map(assets::transition_file),
            alarm_active: alarm_active(stabilized, percent),
        }
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::derive(0.0, Gesture::NoFace, 1, None)
    }
}
