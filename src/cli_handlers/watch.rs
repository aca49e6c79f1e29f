use crate::application::app::Application;
use crate::cli_handlers::CliCommand;
use crate::config::AppConfig;
use crate::core::traits::PlayerAdapter;
use crate::modules::player::media_probe::probe_duration;
use crate::modules::player::simulated::SimulatedPlayer;
use crate::modules::segments::sponsorblock::SponsorBlockClient;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::info;

pub struct WatchCommand {
    pub config: AppConfig,
    pub video_ids: Vec<String>,
    pub file: Option<PathBuf>,
    pub duration: Option<f64>,
    pub start: f64,
    pub rate: f64,
    pub live: bool,
}

impl WatchCommand {
    fn duration(&self) -> Result<f64> {
        match (&self.file, self.duration) {
            (Some(path), _) => probe_duration(path),
            (None, Some(duration)) if duration.is_finite() && duration > 0.0 => Ok(duration),
            (None, Some(duration)) => bail!("Duration must be positive, got {}", duration),
            (None, None) => bail!("Either --duration or --file is required"),
        }
    }
}

impl CliCommand for WatchCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let duration = self.duration()?;
        if !self.rate.is_finite() || self.rate <= 0.0 {
            bail!("Playback rate must be positive, got {}", self.rate);
        }

        // Segment requests run here; the readout loop stays on this thread.
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .context("Could not start async runtime")?;

        let source = Arc::new(SponsorBlockClient::new(&self.config)?);
        let mut player =
            SimulatedPlayer::new(self.video_ids, duration, self.start, self.rate, self.live);
        player.resume();

        info!(duration, rate = self.rate, live = self.live, "Starting readout");

        let mut app = Application::new(self.config)
            .with_player(Box::new(player))
            .with_storage_backend(Box::new(JsonStorageBackend::new()?))
            .with_ui_renderer(Box::new(TerminalRenderer::new()))
            .with_segment_source(source, runtime.handle().clone());

        app.init()?;
        let result = app.run();
        app.cleanup()?;

        runtime.shutdown_background();
        result
    }
}
