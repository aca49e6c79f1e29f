use crate::core::models::{DisplayMode, Options, PlaybackSnapshot};
use crate::modules::label::progress_bar::render_progress_bar;
use crate::modules::label::time_format::{format_seconds, format_time_12h, format_time_24h};
use crate::modules::segments::provider::SegmentOffsetSnapshot;
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use std::fmt::Display;

/// Derived quantities every mode formats from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    /// Seconds of wall-clock time until the end, after skipping and rate adjustment
    pub adjusted_remaining: f64,
    /// Position over the effective duration. Not clamped.
    pub fraction: f64,
}

impl LabelMetrics {
    /// Returns `None` for snapshots that cannot produce a label.
    pub fn compute(
        snapshot: &PlaybackSnapshot,
        options: &Options,
        offsets: &SegmentOffsetSnapshot,
    ) -> Option<Self> {
        if !snapshot.is_valid() {
            return None;
        }

        let duration = snapshot.duration;
        let position = snapshot.current_time;
        let use_segments = options.segment_adjust && offsets.is_ready();

        let (skipped_ahead, skipped_total) = if use_segments {
            (
                offsets.remaining_skipped_duration(position),
                offsets.total_skipped_duration(),
            )
        } else {
            (0.0, 0.0)
        };

        let effective_remaining = ((duration - position) - skipped_ahead).max(0.0);

        // A broken rate would divide into infinity or flip the sign.
        let rate = snapshot.playback_rate;
        let divisor = if options.playback_rate_adjust && rate.is_finite() && rate > 0.0 {
            rate
        } else {
            1.0
        };
        let adjusted_remaining = effective_remaining / divisor;

        let effective_duration = position.max(duration - skipped_total);
        let fraction = if effective_duration > 0.0 {
            position / effective_duration
        } else {
            0.0
        };

        Some(Self {
            adjusted_remaining,
            fraction,
        })
    }
}

/// Text for the readout in `mode`, using the local clock for end times.
///
/// Returns an empty string when the snapshot is not usable (no duration yet,
/// NaN position).
pub fn compute_label(
    snapshot: &PlaybackSnapshot,
    mode: DisplayMode,
    options: &Options,
    offsets: &SegmentOffsetSnapshot,
) -> String {
    compute_label_at(snapshot, mode, options, offsets, Local::now())
}

/// [`compute_label`] with an explicit current time.
pub fn compute_label_at<Tz: TimeZone>(
    snapshot: &PlaybackSnapshot,
    mode: DisplayMode,
    options: &Options,
    offsets: &SegmentOffsetSnapshot,
    now: DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let Some(metrics) = LabelMetrics::compute(snapshot, options, offsets) else {
        return String::new();
    };

    match mode {
        DisplayMode::EndsAt24h => end_time(now, metrics.adjusted_remaining)
            .map(|end| format_time_24h(&end))
            .unwrap_or_default(),
        DisplayMode::EndsAt12h => end_time(now, metrics.adjusted_remaining)
            .map(|end| format_time_12h(&end))
            .unwrap_or_default(),
        DisplayMode::Remaining => format_seconds(metrics.adjusted_remaining),
        DisplayMode::Progress => format!("{}%", (metrics.fraction * 100.0).round() as i64),
        DisplayMode::ProgressBar => render_progress_bar(metrics.fraction, options),
    }
}

fn end_time<Tz: TimeZone>(now: DateTime<Tz>, remaining_secs: f64) -> Option<DateTime<Tz>> {
    let millis = (remaining_secs * 1000.0) as i64;
    TimeDelta::try_milliseconds(millis).and_then(|delta| now.checked_add_signed(delta))
}
