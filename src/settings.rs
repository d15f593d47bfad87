//! Game settings
//!
//! Loaded from an optional JSON file; command-line flags override it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, HIGHSCORE_FILE};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames (and simulation ticks) per second
    pub fps: u32,
    /// Where the high score is persisted
    pub highscore_file: PathBuf,
    /// Fixed RNG seed; a fresh one per session when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Sound effects (jump, boost)
    pub sound: bool,
    /// Background music cues
    pub music: bool,

    // === Input ===
    /// How long a key press counts as held on terminals that never report
    /// key releases (ms)
    pub key_hold_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            highscore_file: PathBuf::from(HIGHSCORE_FILE),
            seed: None,
            sound: true,
            music: true,
            key_hold_ms: 300,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.fps = settings.fps.max(1);
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
