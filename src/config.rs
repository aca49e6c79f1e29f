use crate::utils::app_dir;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";

/// Runtime configuration read from `config.toml`. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// `skipSegments` endpoint of a SponsorBlock-compatible service
    pub segment_service_url: String,

    /// Segment categories to request; empty asks for the service default
    pub segment_categories: Vec<String>,

    pub request_timeout_secs: u64,

    /// Redraw interval of the readout
    pub tick_interval_ms: u64,

    /// How often a running readout checks the settings file for changes
    pub settings_poll_interval_ms: u64,

    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            segment_service_url: "https://sponsor.ajay.app/api/skipSegments".to_string(),
            segment_categories: Vec::new(),
            request_timeout_secs: 10,
            tick_interval_ms: 100,
            settings_poll_interval_ms: 1000,
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the user's config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&app_dir()?.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = AppConfig::from_toml_str(
            r#"
            segment_categories = ["sponsor", "selfpromo"]
            tick_interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.segment_categories, vec!["sponsor", "selfpromo"]);
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(AppConfig::from_toml_str("tick_interval_ms = \"fast\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
