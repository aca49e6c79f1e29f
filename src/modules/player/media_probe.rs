use anyhow::{Context, Result};
use lofty::file::AudioFile;
use lofty::probe::Probe;
use std::path::Path;

/// Reads the duration of a local media file from its container properties.
pub fn probe_duration(path: &Path) -> Result<f64> {
    let tagged_file = Probe::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?
        .read()
        .with_context(|| format!("Could not read media properties of {}", path.display()))?;

    let duration = tagged_file.properties().duration().as_secs_f64();
    if duration <= 0.0 {
        anyhow::bail!("{} reports no duration", path.display());
    }

    Ok(duration)
}

