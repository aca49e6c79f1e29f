mod mode;
mod options;
mod segments;
mod show;
mod watch;

pub use mode::{CycleCommand, ModeCommand};
pub use options::OptionsCommand;
pub use segments::SegmentsCommand;
pub use show::ShowCommand;
pub use watch::WatchCommand;

use crate::cli::Commands;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

/// Every CLI command implements this trait.
///
/// Commands own their arguments and are consumed on execution. They run exactly once.
pub trait CliCommand {
    fn execute(self: Box<Self>) -> Result<()>;
}

/// Converts a parsed [`Commands`] variant into a boxed [`CliCommand`] ready to execute.
pub fn from_cli(cmd: Commands, config: AppConfig) -> Box<dyn CliCommand> {
    match cmd {
        Commands::Watch {
            video_ids,
            file,
            duration,
            start,
            rate,
            live,
        } => Box::new(WatchCommand {
            config,
            video_ids,
            file,
            duration,
            start,
            rate,
            live,
        }),
        Commands::Show {
            duration,
            position,
            rate,
            mode,
            video_id,
        } => Box::new(ShowCommand {
            config,
            duration,
            position,
            rate,
            mode,
            video_id,
        }),
        Commands::Mode { mode } => Box::new(ModeCommand { mode }),
        Commands::Cycle => Box::new(CycleCommand { config }),
        Commands::Options {
            allow,
            playback_rate_adjust,
            segment_adjust,
            total_segments,
            passed,
            remaining,
            gradient,
            variant,
            reset,
        } => Box::new(OptionsCommand {
            allow,
            playback_rate_adjust,
            segment_adjust,
            total_segments,
            passed,
            remaining,
            gradient,
            variant,
            reset,
        }),
        Commands::Segments { video_id } => Box::new(SegmentsCommand { config, video_id }),
    }
}

/// Runtime for one-off commands that await a single segment fetch.
fn blocking_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Could not start async runtime")
}
