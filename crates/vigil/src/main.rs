//! Vigil - Main Entry Point

use camera_stream::{StreamManager, SyntheticCamera};
use classifier_client::HttpClassifier;
use tracing::info;
use vigil::{init_logging, AppConfig, JsonSettingsStore, MonitorPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== Vigil v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    let store = JsonSettingsStore::open(&config.settings_path)?;
    let classifier = HttpClassifier::new(config.classifier.clone())?;

    let mut manager = StreamManager::new(config.camera.clone());
    let session = manager.start(Box::new(SyntheticCamera::new()))?;

    let mut pipeline = MonitorPipeline::new(classifier, store, config.sampler.clone());

    // Ctrl-C closes the capture gate; the loop drains the in-flight tick
    // and releases the stream.
    let gate = pipeline.gate();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            gate.stop();
        }
    });

    pipeline.run(session).await?;
    manager.stop();

    Ok(())
}
