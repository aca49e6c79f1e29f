use crate::config::AppConfig;
use crate::utils::{app_dir, APP_NAME};
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// The interactive readout owns the terminal, so events go to
/// `<config dir>/ends-at/ends-at.log`. `RUST_LOG` overrides the configured filter.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = app_dir()?.join(format!("{}.log", APP_NAME));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Could not install log subscriber: {}", e))
}
