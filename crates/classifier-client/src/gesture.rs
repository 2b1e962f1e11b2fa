//! Gesture labels and classification results

use serde::{Deserialize, Serialize};

/// Gesture label returned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// No face visible in the frame
    NoFace,
    /// Driver attentive
    Attention,
    /// Eyes closed
    EyesClosed,
    /// Yawning
    Yawning,
}

impl Gesture {
    /// Decode the classifier's numeric label
    pub fn from_code(code: u8) -> Option<Gesture> {
        match code {
            0 => Some(Gesture::NoFace),
            1 => Some(Gesture::Attention),
            2 => Some(Gesture::EyesClosed),
            3 => Some(Gesture::Yawning),
            _ => None,
        }
    }

    /// Numeric label on the wire
    pub fn code(self) -> u8 {
        match self {
            Gesture::NoFace => 0,
            Gesture::Attention => 1,
            Gesture::EyesClosed => 2,
            Gesture::Yawning => 3,
        }
    }

    /// Letter code used by the avatar/transition asset catalogue.
    /// `NoFace` has no letter and therefore no transition assets.
    pub fn letter(self) -> Option<char> {
        match self {
            Gesture::Attention => Some('a'),
            Gesture::Yawning => Some('b'),
            Gesture::EyesClosed => Some('c'),
            Gesture::NoFace => None,
        }
    }

    /// Whether this gesture indicates drowsiness
    pub fn is_drowsy(self) -> bool {
        matches!(self, Gesture::EyesClosed | Gesture::Yawning)
    }
}

/// One classification of one frame. Immutable; consumed once by the
/// smoothing filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Gesture label
    pub gesture: Gesture,
    /// Human-readable label from the classifier
    pub gesture_name: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for code in 0..4u8 {
            let gesture = Gesture::from_code(code).unwrap();
            assert_eq!(gesture.code(), code);
        }
        assert!(Gesture::from_code(4).is_none());
    }

    #[test]
    fn test_letter_mapping() {
        assert_eq!(Gesture::Attention.letter(), Some('a'));
        assert_eq!(Gesture::Yawning.letter(), Some('b'));
        assert_eq!(Gesture::EyesClosed.letter(), Some('c'));
        assert_eq!(Gesture::NoFace.letter(), None);
    }

    #[test]
    fn test_drowsy_gestures() {
        assert!(Gesture::EyesClosed.is_drowsy());
        assert!(Gesture::Yawning.is_drowsy());
        assert!(!Gesture::Attention.is_drowsy());
        assert!(!Gesture::NoFace.is_drowsy());
    }
}
