//! Game settings
//!
//! Read from an optional JSON file. Every field has a default, so a file only
//! needs the keys it wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TARGET_FPS;
use crate::sim::{Rules, Variant};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule preset
    pub variant: Variant,
    /// Full rule override; replaces the preset when present
    pub rules: Option<Rules>,
    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,

    /// Terminal frame rate cap
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            rules: None,
            seed: None,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Rules the run will use
    pub fn effective_rules(&self) -> Rules {
        self.rules.clone().unwrap_or_else(|| self.variant.rules())
    }

    pub fn from_json(path: &Path, json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(path, &json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }
}
