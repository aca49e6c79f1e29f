use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Formats whole seconds as `M:SS`, or `H:MM:SS` from one hour up.
/// The leading unit is never zero-padded.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Floors fractional seconds, then formats with [`format_clock`].
/// Negative and non-finite inputs format as `0:00`.
pub fn format_seconds(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format_clock(whole)
}

/// Position readout used by the status line: "0:34 / 3:10"
pub fn format_position(elapsed: f64, total: f64) -> String {
    format!("{} / {}", format_seconds(elapsed), format_seconds(total))
}

/// Short 24-hour time of day, e.g. "15:07"
pub fn format_time_24h<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%H:%M").to_string()
}

/// Short 12-hour time of day, e.g. "3:07 PM"
pub fn format_time_12h<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%-I:%M %p").to_string()
}
