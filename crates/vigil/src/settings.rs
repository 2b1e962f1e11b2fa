//! Persisted user settings
//!
//! The settings store is a small key/value document the settings page
//! writes and the capture loop reads. The loop never caches it: each tick
//! takes a fresh `CaptureConfig` snapshot through the `SettingsProvider`
//! seam.

use frame_sampler::CaptureConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Settings store error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// The persisted settings document. Field names match the keys the web
/// settings page has always written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Brightness percent (100 = unchanged)
    pub brightness: u32,
    /// Contrast percent (100 = unchanged)
    pub contrast: u32,
    /// Zoom percent (range 100-200 in the settings UI)
    pub zoom: u32,
    /// Avatar skin id
    #[serde(rename = "selectedAvatar")]
    pub selected_avatar: u8,
    /// Alarm sound id
    #[serde(rename = "selectedAlarm")]
    pub selected_alarm: String,
    /// UI theme
    pub theme: Theme,
    /// Opaque session credential, generated once client-side
    pub token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            zoom: 200,
            selected_avatar: 1,
            selected_alarm: "alarm1".to_string(),
            theme: Theme::Light,
            token: None,
        }
    }
}

/// Read interface the capture loop uses. Implementations must return
/// consistent snapshots; the loop reads once per tick.
pub trait SettingsProvider {
    fn capture_config(&self) -> CaptureConfig;
    fn avatar_skin(&self) -> u8;
    fn alarm_id(&self) -> String;
    fn token(&self) -> String;
}

/// JSON-file-backed settings store.
pub struct JsonSettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl JsonSettingsStore {
    /// Open (or create) the settings document. A missing file yields the
    /// defaults; a missing token is generated once and persisted.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let mut settings = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            debug!(path = %path.display(), "No settings file, using defaults");
            Settings::default()
        };

        let mut dirty = !path.exists();
        if settings.token.is_none() {
            settings.token = Some(Uuid::new_v4().to_string());
            info!("Generated client session token");
            dirty = true;
        }

        let store = Self { path, settings };
        if dirty {
            store.save()?;
        }
        Ok(store)
    }

    /// Persist the current document
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Apply a mutation and persist it
    pub fn update<F>(&mut self, mutate: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut Settings),
    {
        mutate(&mut self.settings);
        self.save()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl SettingsProvider for JsonSettingsStore {
    fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            brightness_percent: self.settings.brightness,
            contrast_percent: self.settings.contrast,
            zoom_percent: self.settings.zoom,
        }
    }

    fn avatar_skin(&self) -> u8 {
        self.settings.selected_avatar
    }

    fn alarm_id(&self) -> String {
        self.settings.selected_alarm.clone()
    }

    fn token(&self) -> String {
        // Absence is not an error here; the server decides what an empty
        // credential means.
        self.settings.token.clone().unwrap_or_default()
    }
}
