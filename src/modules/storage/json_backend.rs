use crate::application::state::Settings;
use crate::core::traits::StorageBackend;
use crate::utils::app_dir;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

pub const SETTINGS_FILE: &str = "settings.json";

pub struct JsonStorageBackend {
    file_path: PathBuf,
}

impl JsonStorageBackend {
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(app_dir()?.join(SETTINGS_FILE)))
    }

    pub fn with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl StorageBackend for JsonStorageBackend {
    fn load(&self) -> Result<Settings> {
        if !self.file_path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.file_path)?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", self.file_path.display()))?;
        Ok(settings)
    }

    /// Writes to a sibling temp file and renames it over the settings file,
    /// so a concurrent reader sees either the old or the new document.
    fn save(&self, settings: &Settings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)?;
        let tmp_path = self.file_path.with_extension("json.tmp");

        fs::write(&tmp_path, content)
            .with_context(|| format!("Could not write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;
        Ok(())
    }

    fn last_modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.file_path).and_then(|m| m.modified()).ok()
    }
}
