use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::models::{DisplayMode, ProgressBarVariant};
use crate::utils::APP_NAME;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Remaining time, end-of-video clock and progress readout", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a live readout for a playing video
    Watch {
        /// Video id used to look up skippable segments (repeat to queue several)
        #[arg(long = "video-id")]
        video_ids: Vec<String>,

        /// Local media file whose duration is used
        #[arg(long, conflicts_with = "duration")]
        file: Option<PathBuf>,

        /// Video duration in seconds
        #[arg(long, required_unless_present = "file")]
        duration: Option<f64>,

        /// Start position in seconds
        #[arg(long, default_value_t = 0.0)]
        start: f64,

        /// Playback rate
        #[arg(long, default_value_t = 1.0)]
        rate: f64,

        /// Treat the content as a live stream (readout hidden)
        #[arg(long)]
        live: bool,
    },

    /// Compute a single label
    Show {
        /// Video duration in seconds
        #[arg(long)]
        duration: f64,

        /// Current position in seconds
        #[arg(long)]
        position: f64,

        /// Playback rate
        #[arg(long, default_value_t = 1.0)]
        rate: f64,

        /// Mode to render (defaults to the persisted mode)
        #[arg(long, value_enum)]
        mode: Option<DisplayMode>,

        /// Video id whose skippable segments are subtracted
        #[arg(long = "video-id")]
        video_id: Option<String>,
    },

    /// Print or set the active display mode
    Mode {
        #[arg(value_enum)]
        mode: Option<DisplayMode>,
    },

    /// Advance the active display mode, like clicking the readout
    Cycle,

    /// Print or change readout options
    Options {
        /// Comma-separated list of modes that clicking cycles through
        #[arg(long, value_enum, value_delimiter = ',')]
        allow: Option<Vec<DisplayMode>>,

        /// Divide remaining time by the playback rate
        #[arg(long = "playback-rate", action = ArgAction::Set)]
        playback_rate_adjust: Option<bool>,

        /// Subtract skippable segments from remaining time
        #[arg(long = "segments", action = ArgAction::Set)]
        segment_adjust: Option<bool>,

        /// Number of glyphs in the progress bar
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        total_segments: Option<u32>,

        /// Glyph for played content
        #[arg(long)]
        passed: Option<String>,

        /// Glyph for content still ahead
        #[arg(long)]
        remaining: Option<String>,

        /// Glyph for the slot being crossed (gradient bar)
        #[arg(long)]
        gradient: Option<String>,

        /// Progress bar shape
        #[arg(long, value_enum)]
        variant: Option<ProgressBarVariant>,

        /// Restore default options before applying the other flags
        #[arg(long)]
        reset: bool,
    },

    /// List the skippable segments of a video
    Segments {
        /// Video id
        video_id: String,
    },
}
