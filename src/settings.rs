//! Game settings
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! partial file (or no file at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "BOMBER_CONFIG";

/// Settings file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "bomber.json";

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting `{0}`")]
    Invalid(&'static str),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second for the host loop
    pub fps: u32,
    /// World generation seed (random per run when absent)
    pub seed: Option<u64>,
    /// Where log output goes while the terminal is in use
    pub log_file: PathBuf,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 30,
            seed: None,
            log_file: PathBuf::from("bomber.log"),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate settings from `path`
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Resolve the settings file: explicit path, then `BOMBER_CONFIG`, then
    /// `bomber.json` if it exists
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.exists().then_some(fallback)
            })
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=240).contains(&self.fps) {
            return Err(SettingsError::Invalid("fps"));
        }
        if let Some(field) = self.tuning.first_invalid() {
            return Err(SettingsError::Invalid(field));
        }
        Ok(())
    }

    /// Seconds per frame for the host loop
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}
