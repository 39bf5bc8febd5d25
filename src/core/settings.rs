//! Settings persistence: one JSON object in a per-user file.
//!
//! No schema version, no migration, last write wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::SettingsError;
use super::types::Settings;

/// File name under the user's home directory.
pub const SETTINGS_FILE_NAME: &str = ".music-scan-pro-settings.json";

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.music-scan-pro-settings.json`
    pub fn default_location() -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHome)?;
        Ok(Self::new(home.join(SETTINGS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file is not an error: it means "nothing saved yet".
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                tracing::warn!("Reading {} failed: {e}", self.path.display());
                return Err(SettingsError::Load(Box::new(e)));
            }
        };

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Parsing {} failed: {e}", self.path.display());
            SettingsError::Load(Box::new(e))
        })
    }

    /// Overwrite the file with `settings`.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json =
            serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Save(Box::new(e)))?;

        fs::write(&self.path, json).map_err(|e| {
            tracing::warn!("Writing {} failed: {e}", self.path.display());
            SettingsError::Save(Box::new(e))
        })?;

        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
