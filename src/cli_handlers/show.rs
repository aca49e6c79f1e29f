use crate::application::engine::ReadoutEngine;
use crate::cli_handlers::{CliCommand, blocking_runtime};
use crate::config::AppConfig;
use crate::core::models::{DisplayMode, PlaybackSnapshot};
use crate::core::traits::StorageBackend;
use crate::modules::label::engine::compute_label;
use crate::modules::label::time_format::format_seconds;
use crate::modules::segments::sponsorblock::SponsorBlockClient;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::Result;

pub struct ShowCommand {
    pub config: AppConfig,
    pub duration: f64,
    pub position: f64,
    pub rate: f64,
    pub mode: Option<DisplayMode>,
    pub video_id: Option<String>,
}

impl CliCommand for ShowCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let storage = JsonStorageBackend::new()?;
        let settings = storage.load()?;
        let ui = TerminalRenderer::new();

        let (mut engine, _) = ReadoutEngine::new(&settings);

        if let Some(video_id) = &self.video_id {
            if engine.options().segment_adjust {
                let client = SponsorBlockClient::new(&self.config)?;
                let runtime = blocking_runtime()?;
                let offsets = runtime.block_on(engine.offsets_mut().load(&client, video_id));
                if offsets.is_ready() {
                    ui.print_message(&format!(
                        "Skipping {} segment(s), {} in total",
                        offsets.segments().len(),
                        format_seconds(offsets.total_skipped_duration())
                    ));
                } else {
                    ui.print_error("Could not load segments, showing unadjusted time");
                }
            } else {
                ui.print_message("Segment adjustment is disabled, ignoring --video-id");
            }
        }

        // An explicit mode is rendered as asked, even when clicking would skip it.
        let mode = self.mode.unwrap_or(engine.mode());
        let snapshot = PlaybackSnapshot::new(self.duration, self.position, self.rate);
        let label = compute_label(&snapshot, mode, engine.options(), &engine.offsets().snapshot());

        if label.is_empty() {
            ui.print_error("Nothing to show for this position and duration");
        } else {
            ui.print_message(&label);
        }

        Ok(())
    }
}
