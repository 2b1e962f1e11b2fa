//! Static asset catalogue keys
//!
//! The view resolves assets by name: avatar images `"{letter}{skin}.png"`,
//! transition videos `"{stem}N.mp4"`, alarm sounds by id.

use classifier_client::Gesture;

/// Alarm sound ids shipped with the app
pub const ALARM_IDS: [&str; 3] = ["alarm1", "alarm2", "alarm3"];

/// Avatar image file for a gesture and skin. `NoFace` always maps to the
/// skin-independent placeholder.
pub fn avatar_file(gesture: Gesture, skin: u8) -> String {
    match gesture.letter() {
        Some(letter) => format!("{letter}{skin}.png"),
        None => "0.png".to_string(),
    }
}

/// Transition video file for a selected stem
pub fn transition_file(stem: &str) -> String {
    format!("{stem}N.mp4")
}

/// Whether an alarm id names a known sound
pub fn is_known_alarm(id: &str) -> bool {
    ALARM_IDS.contains(&id)
}
