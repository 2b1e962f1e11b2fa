//! Capture-classify-smooth pipeline
//!
//! One long-lived loop: snapshot settings, pull a frame, encode it, submit
//! to the classifier, feed the smoother, update presentation. Each tick
//! awaits the full cycle before scheduling the next, so requests never
//! overlap and a slow backend naturally backs off the sampling rate.

use crate::settings::SettingsProvider;
use crate::PipelineError;
use camera_stream::CaptureSession;
use classifier_client::{ClassificationResult, Classify};
use frame_sampler::{encode_frame, CaptureGate, SamplerConfig};
use gesture_smoother::{
    drowsiness_percent, AlarmPlayer, GestureSmoother, PresentationState, TransitionPlayer,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The monitoring pipeline
pub struct MonitorPipeline<C, S> {
    classifier: C,
    settings: S,
    sampler: SamplerConfig,
    gate: CaptureGate,
    smoother: GestureSmoother,
    transitions: TransitionPlayer,
    alarm: AlarmPlayer,
    presentation: PresentationState,
    percent: f32,
}

impl<C, S> MonitorPipeline<C, S>
where
    C: Classify,
    S: SettingsProvider,
{
    pub fn new(classifier: C, settings: S, sampler: SamplerConfig) -> Self {
        let alarm = AlarmPlayer::new(settings.alarm_id());
        Self {
            classifier,
            settings,
            sampler,
            gate: CaptureGate::new(),
            smoother: GestureSmoother::new(),
            transitions: TransitionPlayer::new(),
            alarm,
            presentation: PresentationState::default(),
            percent: 0.0,
        }
    }

    /// A handle that stops the loop from anywhere
    pub fn gate(&self) -> CaptureGate {
        self.gate.clone()
    }

    /// Latest derived presentation state
    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    /// Currently sounding alarm
    pub fn alarm(&self) -> &AlarmPlayer {
        &self.alarm
    }

    /// Run the sampling loop until the gate closes. The session is released
    /// on every exit path.
    pub async fn run(&mut self, session: &mut CaptureSession) -> Result<(), PipelineError> {
        info!(period_ms = self.sampler.period_ms, "Monitor pipeline started");
        let result = self.drive(session).await;
        session.release();
        info!("Monitor pipeline stopped");
        result
    }

    async fn drive(&mut self, session: &mut CaptureSession) -> Result<(), PipelineError> {
        while self.gate.is_active() {
            self.tick(session).await?;
            if !self.gate.is_active() {
                break;
            }
            tokio::time::sleep(self.sampler.period()).await;
        }
        Ok(())
    }

    /// One full sampling cycle: snapshot -> frame -> encode -> classify ->
    /// apply. A failed classification is logged and skipped; the next tick
    /// tries again.
    pub async fn tick(&mut self, session: &mut CaptureSession) -> Result<(), PipelineError> {
        let capture = self.settings.capture_config();
        let frame = session.next_frame()?;
        let image = encode_frame(&frame, &capture, &self.sampler)?;
        let token = self.settings.token();

        match self.classifier.classify(&image, &token).await {
            Ok(result) => {
                if !self.gate.is_active() {
                    // Capture stopped while the call was in flight
                    debug!("Discarding stale classification result");
                    return Ok(());
                }
                self.apply(result, Instant::now());
            }
            Err(e) => {
                warn!("Classification failed, skipping tick: {}", e);
            }
        }
        Ok(())
    }

    /// Feed one classification into the smoother and rederive presentation
    /// state. Exposed for deterministic tests.
    pub fn apply(&mut self, result: ClassificationResult, now: Instant) {
        let skin = self.settings.avatar_skin();

        if let Some(change) = self.smoother.observe(result.gesture) {
            self.transitions.on_change(&change, skin, now);
        }

        let stabilized = self.smoother.stabilized();
        self.percent = drowsiness_percent(stabilized, result.confidence, self.percent);

        let stem = self.transitions.poll(now).map(str::to_string);
        self.alarm.select(self.settings.alarm_id());

        let state = PresentationState::derive(self.percent, stabilized, skin, stem.as_deref());
        self.alarm.sync(state.alarm_active);
        self.presentation = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camera_stream::{CameraConfig, StreamManager, SyntheticCamera};
    use classifier_client::{ClassifierError, Gesture};
    use frame_sampler::CaptureConfig;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct MemorySettings;

    impl SettingsProvider for MemorySettings {
        fn capture_config(&self) -> CaptureConfig {
            CaptureConfig::default()
        }

        fn avatar_skin(&self) -> u8 {
            1
        }

        fn alarm_id(&self) -> String {
            "alarm1".to_string()
        }

        fn token(&self) -> String {
            "test-token".to_string()
        }
    }

    /// Serves scripted results in order; once the script runs dry it closes
    /// the gate (if one was registered) and reports a network error.
    struct ScriptedClassifier {
        script: Mutex<VecDeque<Result<ClassificationResult, ClassifierError>>>,
        gate: Arc<Mutex<Option<CaptureGate>>>,
    }

    impl ScriptedClassifier {
        fn new(
            script: Vec<Result<ClassificationResult, ClassifierError>>,
        ) -> (Self, Arc<Mutex<Option<CaptureGate>>>) {
            let gate = Arc::new(Mutex::new(None));
            (
                Self {
                    script: Mutex::new(script.into()),
                    gate: gate.clone(),
                },
                gate,
            )
        }
    }

    impl Classify for ScriptedClassifier {
        async fn classify(
            &self,
            _image: &[u8],
            _token: &str,
        ) -> Result<ClassificationResult, ClassifierError> {
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None => {
                    if let Some(gate) = self.gate.lock().unwrap().take() {
                        gate.stop();
                    }
                    Err(ClassifierError::Network("script exhausted".into()))
                }
            }
        }
    }

    /// Closes the gate before answering, as if the user stopped capture
    /// while the request was in flight.
    struct StopMidFlight {
        gate: Arc<Mutex<Option<CaptureGate>>>,
    }

    impl Classify for StopMidFlight {
        async fn classify(
            &self,
            _image: &[u8],
            _token: &str,
        ) -> Result<ClassificationResult, ClassifierError> {
            if let Some(gate) = self.gate.lock().unwrap().take() {
                gate.stop();
            }
            Ok(observed(Gesture::EyesClosed, 0.95))
        }
    }

    fn observed(gesture: Gesture, confidence: f32) -> ClassificationResult {
        ClassificationResult {
            gesture,
            gesture_name: format!("{:?}", gesture),
            confidence,
        }
    }

    fn test_camera() -> CameraConfig {
        CameraConfig {
            device: "test".to_string(),
            width: 64,
            height: 48,
            fps: 24,
        }
    }

    fn fast_sampler() -> SamplerConfig {
        SamplerConfig {
            period_ms: 10,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stabilizes_and_raises_alarm() {
        let script = (0..5).map(|_| Ok(observed(Gesture::EyesClosed, 0.9))).collect();
        let (classifier, gate_slot) = ScriptedClassifier::new(script);

        let mut manager = StreamManager::new(test_camera());
        let session = manager.start(Box::new(SyntheticCamera::new())).unwrap();

        let mut pipeline = MonitorPipeline::new(classifier, MemorySettings, fast_sampler());
        *gate_slot.lock().unwrap() = Some(pipeline.gate());

        pipeline.run(session).await.unwrap();

        let state = pipeline.presentation();
        assert!(state.alarm_active);
        assert!((state.percent - 90.0).abs() < 0.1);
        assert_eq!(state.avatar_asset, "c1.png");
        // NoFace -> EyesClosed never plays a transition
        assert_eq!(state.transition_asset, None);
        assert!(pipeline.alarm().is_playing());

        // Loop exit released the stream
        assert!(!manager.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_classify_failures_are_skipped() {
        let script = vec![
            Err(ClassifierError::Network("reset".into())),
            Err(ClassifierError::Server("model busy".into())),
            Ok(observed(Gesture::Attention, 0.8)),
        ];
        let (classifier, gate_slot) = ScriptedClassifier::new(script);

        let mut manager = StreamManager::new(test_camera());
        let session = manager.start(Box::new(SyntheticCamera::new())).unwrap();

        let mut pipeline = MonitorPipeline::new(classifier, MemorySettings, fast_sampler());
        *gate_slot.lock().unwrap() = Some(pipeline.gate());

        // Errors never kill the loop
        pipeline.run(session).await.unwrap();

        // One lone Attention does not stabilize anything
        let state = pipeline.presentation();
        assert_eq!(state.avatar_asset, "0.png");
        assert_eq!(state.percent, 0.0);
        assert!(!state.alarm_active);
    }

    #[tokio::test]
    async fn test_stop_mid_flight_discards_result() {
        let gate_slot = Arc::new(Mutex::new(None));
        let classifier = StopMidFlight {
            gate: gate_slot.clone(),
        };

        let mut manager = StreamManager::new(test_camera());
        let session = manager.start(Box::new(SyntheticCamera::new())).unwrap();

        let mut pipeline = MonitorPipeline::new(classifier, MemorySettings, fast_sampler());
        *gate_slot.lock().unwrap() = Some(pipeline.gate());

        pipeline.tick(session).await.unwrap();

        // The in-flight result completed but was not applied
        let state = pipeline.presentation();
        assert_eq!(*state, PresentationState::default());
        assert!(!pipeline.alarm().is_playing());
        assert!(!pipeline.gate.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_selected_between_lettered_gestures() {
        let mut script: Vec<_> = (0..5).map(|_| Ok(observed(Gesture::Attention, 0.9))).collect();
        script.extend((0..5).map(|_| Ok(observed(Gesture::Yawning, 0.7))));
        let (classifier, gate_slot) = ScriptedClassifier::new(script);

        let mut manager = StreamManager::new(test_camera());
        let session = manager.start(Box::new(SyntheticCamera::new())).unwrap();

        let mut pipeline = MonitorPipeline::new(classifier, MemorySettings, fast_sampler());
        *gate_slot.lock().unwrap() = Some(pipeline.gate());

        pipeline.run(session).await.unwrap();

        // Attention stabilized first, then Yawning: transition a-b plays
        let state = pipeline.presentation();
        assert_eq!(state.transition_asset.as_deref(), Some("a-b1N.mp4"));
        assert_eq!(state.avatar_asset, "b1.png");
        assert!((state.percent - 70.0).abs() < 0.1);
    }
}
