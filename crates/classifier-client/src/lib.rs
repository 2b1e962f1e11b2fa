//! Classification Client
//!
//! Sends encoded frames to the remote gesture classifier and returns
//! structured results. Each call is stateless; transport failures are
//! retried a bounded number of times, everything else is final.

pub mod client;
pub mod gesture;

pub use client::{Classify, ClassifierConfig, HttpClassifier};
pub use gesture::{ClassificationResult, Gesture};

use thiserror::Error;

/// Classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authorization rejected by classifier")]
    Auth,

    #[error("Classifier error: {0}")]
    Server(String),

    #[error("Malformed classifier response: {0}")]
    Decode(String),
}

impl ClassifierError {
    /// Only transport failures are worth retrying; auth and server verdicts
    /// are final for a given frame.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassifierError::Network(_))
    }
}
