use crate::cli_handlers::{CliCommand, blocking_runtime};
use crate::config::AppConfig;
use crate::core::models::Segment;
use crate::core::traits::SegmentSource;
use crate::modules::label::time_format::format_seconds;
use crate::modules::segments::sponsorblock::SponsorBlockClient;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::{Context, Result};

pub struct SegmentsCommand {
    pub config: AppConfig,
    pub video_id: String,
}

fn segment_line(index: usize, segment: &Segment) -> String {
    format!(
        "{:>3}. {} - {} ({})",
        index + 1,
        format_seconds(segment.start),
        format_seconds(segment.end),
        format_seconds(segment.length())
    )
}

impl CliCommand for SegmentsCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let client = SponsorBlockClient::new(&self.config)?;
        let runtime = blocking_runtime()?;
        let ui = TerminalRenderer::new();

        let mut segments = runtime
            .block_on(client.fetch(&self.video_id))
            .with_context(|| format!("Could not fetch segments for {}", self.video_id))?;

        if segments.is_empty() {
            ui.print_message(&format!("No skippable segments for {}", self.video_id));
            return Ok(());
        }

        segments.sort_by(|a, b| a.start.total_cmp(&b.start));

        ui.print_message(&format!("Skippable segments for {}:", self.video_id));
        for (index, segment) in segments.iter().enumerate() {
            ui.print_message(&segment_line(index, segment));
        }

        let total: f64 = segments.iter().map(Segment::length).sum();
        ui.print_message(&format!("Total: {}", format_seconds(total)));

        Ok(())
    }
}
