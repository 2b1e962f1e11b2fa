//! HTTP classifier client

use crate::{ClassificationResult, ClassifierError, Gesture};
use reqwest::multipart;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Classifier endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Base URL of the inference backend
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Extra attempts on transport failure
    pub max_retries: u8,
    /// Flat delay between retry attempts in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_ms: 10_000,
            max_retries: 2,
            retry_backoff_ms: 100,
        }
    }
}

/// Seam for the classification call, so the pipeline can run against a
/// scripted classifier in tests.
pub trait Classify {
    fn classify(
        &self,
        image: &[u8],
        token: &str,
    ) -> impl Future<Output = Result<ClassificationResult, ClassifierError>> + Send;
}

/// Success body from the classifier
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    gesture: u8,
    gesture_name: String,
    confidence: f32,
}

/// Failure body from the classifier
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

fn validate(body: ClassifyResponse) -> Result<ClassificationResult, ClassifierError> {
    let gesture = Gesture::from_code(body.gesture)
        .ok_or_else(|| ClassifierError::Decode(format!("unknown gesture code {}", body.gesture)))?;
    if !(0.0..=1.0).contains(&body.confidence) {
        return Err(ClassifierError::Decode(format!(
            "confidence {} outside [0, 1]",
            body.confidence
        )));
    }
    Ok(ClassificationResult {
        gesture,
        gesture_name: body.gesture_name,
        confidence: body.confidence,
    })
}

/// Parse a raw success body. Split out so the wire contract is testable
/// without a live backend.
fn parse_success(body: &[u8]) -> Result<ClassificationResult, ClassifierError> {
    let response: ClassifyResponse =
        serde_json::from_slice(body).map_err(|e| ClassifierError::Decode(e.to_string()))?;
    validate(response)
}

/// Run `op` with bounded retries on transport errors.
async fn with_retries<F, Fut>(
    max_retries: u8,
    backoff: Duration,
    mut op: F,
) -> Result<ClassificationResult, ClassifierError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ClassificationResult, ClassifierError>>,
{
    let mut attempt: u8 = 0;
    loop {
        match op().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                warn!(attempt, "Classify attempt failed, retrying: {}", e);
                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// HTTP implementation of the classifier contract:
/// `POST {base_url}/process-image`, multipart field `image`, bearer token.
pub struct HttpClassifier {
    config: ClassifierConfig,
    http: reqwest::Client,
}

impl HttpClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/process-image", self.config.base_url.trim_end_matches('/'))
    }

    async fn attempt(
        &self,
        image: &[u8],
        token: &str,
    ) -> Result<ClassificationResult, ClassifierError> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name("frame.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| ClassifierError::Network(e.to_string()))?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|e| ClassifierError::Network(e.to_string()))?;
            let result = parse_success(&body)?;
            debug!(
                gesture = %result.gesture_name,
                confidence = result.confidence,
                "Frame classified"
            );
            return Ok(result);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClassifierError::Auth);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        Err(ClassifierError::Server(message))
    }
}

impl Classify for HttpClassifier {
    async fn classify(
        &self,
        image: &[u8],
        token: &str,
    ) -> Result<ClassificationResult, ClassifierError> {
        with_retries(
            self.config.max_retries,
            Duration::from_millis(self.config.retry_backoff_ms),
            || self.attempt(image, token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_parse_success_body() {
        let body = br#"{"gesture": 2, "gesture_name": "EyesClosed", "confidence": 0.93}"#;
        let result = parse_success(body).unwrap();
        assert_eq!(result.gesture, Gesture::EyesClosed);
        assert_eq!(result.gesture_name, "EyesClosed");
        assert!((result.confidence - 0.93).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_rejects_unknown_gesture() {
        let body = br#"{"gesture": 7, "gesture_name": "??", "confidence": 0.5}"#;
        assert!(matches!(
            parse_success(body),
            Err(ClassifierError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_confidence() {
        let body = br#"{"gesture": 1, "gesture_name": "Attention", "confidence": 1.5}"#;
        assert!(matches!(
            parse_success(body),
            Err(ClassifierError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let classifier = HttpClassifier::new(ClassifierConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(classifier.endpoint(), "http://localhost:5000/process-image");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ClassifierError::Network("reset".into()).is_retryable());
        assert!(!ClassifierError::Auth.is_retryable());
        assert!(!ClassifierError::Server("oops".into()).is_retryable());
        assert!(!ClassifierError::Decode("bad".into()).is_retryable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transport_errors_up_to_limit() {
        let calls = AtomicU32::new(0);
        let result = with_retries(2, Duration::from_millis(100), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ClassifierError::Network("reset".into()))
                } else {
                    Ok(ClassificationResult {
                        gesture: Gesture::Attention,
                        gesture_name: "Attention".into(),
                        confidence: 0.9,
                    })
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result = with_retries(3, Duration::from_millis(100), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<ClassificationResult, _>(ClassifierError::Auth) }
        })
        .await;

        assert!(matches!(result, Err(ClassifierError::Auth)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
