use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const APP_NAME: &str = "ends-at";

pub const MIN_PLAYBACK_RATE: f64 = 0.25;
pub const MAX_PLAYBACK_RATE: f64 = 4.0;
pub const PLAYBACK_RATE_STEP: f64 = 0.25;

/// Per-user directory holding settings, config and logs. Created on demand.
pub fn app_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Could not find config directory")?;
    path.push(APP_NAME);

    fs::create_dir_all(&path)
        .with_context(|| format!("Could not create {}", path.display()))?;

    Ok(path)
}

/// Moves a playback rate one step up or down, snapped to the step grid and
/// kept inside the supported range.
///
/// # Arguments
/// * `rate` - Current playback rate
/// * `faster` - Direction of the step
///
/// # Returns
/// * `f64` - New playback rate
pub fn step_playback_rate(rate: f64, faster: bool) -> f64 {
    let steps = (rate / PLAYBACK_RATE_STEP).round();
    let next = if faster { steps + 1.0 } else { steps - 1.0 };
    (next * PLAYBACK_RATE_STEP).clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
}
