use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which readout the label shows.
///
/// Storage keys match the ones persisted by earlier releases (`endsIn` is the
/// remaining-time mode).
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    #[serde(rename = "endsAt24h")]
    #[value(name = "endsAt24h", alias = "24h")]
    EndsAt24h,

    #[serde(rename = "endsAt12h")]
    #[value(name = "endsAt12h", alias = "12h")]
    EndsAt12h,

    #[default]
    #[serde(rename = "endsIn")]
    #[value(name = "endsIn", alias = "remaining")]
    Remaining,

    #[serde(rename = "progress")]
    #[value(name = "progress", alias = "percent")]
    Progress,

    #[serde(rename = "progressBar")]
    #[value(name = "progressBar", alias = "bar")]
    ProgressBar,
}

impl DisplayMode {
    /// Every mode, in the fixed order used for filtering and cycling.
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::EndsAt24h,
        DisplayMode::EndsAt12h,
        DisplayMode::Remaining,
        DisplayMode::Progress,
        DisplayMode::ProgressBar,
    ];

    /// Key used in the settings file.
    pub fn key(self) -> &'static str {
        match self {
            DisplayMode::EndsAt24h => "endsAt24h",
            DisplayMode::EndsAt12h => "endsAt12h",
            DisplayMode::Remaining => "endsIn",
            DisplayMode::Progress => "progress",
            DisplayMode::ProgressBar => "progressBar",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DisplayMode::EndsAt24h => "ends at (24-hour clock)",
            DisplayMode::EndsAt12h => "ends at (12-hour clock)",
            DisplayMode::Remaining => "time remaining",
            DisplayMode::Progress => "percent complete",
            DisplayMode::ProgressBar => "progress bar",
        }
    }

    /// Next mode a click moves to.
    ///
    /// An empty allowed set falls back to [`DisplayMode::Remaining`]. A current
    /// mode missing from the set is treated as sitting at index 0.
    pub fn cycle(self, allowed: &AllowedModes) -> DisplayMode {
        let modes = allowed.modes();
        if modes.is_empty() {
            return DisplayMode::Remaining;
        }

        let index = modes.iter().position(|m| *m == self).unwrap_or(0);
        modes[(index + 1) % modes.len()]
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.key() == s)
            .ok_or_else(|| format!("unknown display mode '{}'", s))
    }
}

/// Reads a persisted mode, mapping unknown or missing values to `None`.
pub fn deserialize_lenient_mode<'de, D>(deserializer: D) -> Result<Option<DisplayMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// User-enabled subset of display modes.
///
/// Stored as one flag per mode so iteration always follows
/// [`DisplayMode::ALL`], whatever order the settings file uses.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct AllowedModes {
    #[serde(rename = "endsAt24h")]
    pub ends_at_24h: bool,
    #[serde(rename = "endsAt12h")]
    pub ends_at_12h: bool,
    #[serde(rename = "endsIn")]
    pub remaining: bool,
    #[serde(rename = "progress")]
    pub progress: bool,
    #[serde(rename = "progressBar")]
    pub progress_bar: bool,
}

impl Default for AllowedModes {
    fn default() -> Self {
        Self {
            ends_at_24h: true,
            ends_at_12h: true,
            remaining: true,
            progress: true,
            progress_bar: true,
        }
    }
}

impl AllowedModes {
    pub fn none() -> Self {
        Self {
            ends_at_24h: false,
            ends_at_12h: false,
            remaining: false,
            progress: false,
            progress_bar: false,
        }
    }

    pub fn from_modes<I: IntoIterator<Item = DisplayMode>>(modes: I) -> Self {
        let mut allowed = Self::none();
        for mode in modes {
            allowed.set(mode, true);
        }
        allowed
    }

    pub fn contains(&self, mode: DisplayMode) -> bool {
        match mode {
            DisplayMode::EndsAt24h => self.ends_at_24h,
            DisplayMode::EndsAt12h => self.ends_at_12h,
            DisplayMode::Remaining => self.remaining,
            DisplayMode::Progress => self.progress,
            DisplayMode::ProgressBar => self.progress_bar,
        }
    }

    pub fn set(&mut self, mode: DisplayMode, enabled: bool) {
        let flag = match mode {
            DisplayMode::EndsAt24h => &mut self.ends_at_24h,
            DisplayMode::EndsAt12h => &mut self.ends_at_12h,
            DisplayMode::Remaining => &mut self.remaining,
            DisplayMode::Progress => &mut self.progress,
            DisplayMode::ProgressBar => &mut self.progress_bar,
        };
        *flag = enabled;
    }

    /// Enabled modes in fixed enumeration order.
    pub fn modes(&self) -> Vec<DisplayMode> {
        DisplayMode::ALL
            .into_iter()
            .filter(|mode| self.contains(*mode))
            .collect()
    }

    pub fn first(&self) -> Option<DisplayMode> {
        DisplayMode::ALL.into_iter().find(|mode| self.contains(*mode))
    }

    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }
}

/// Shape of the textual progress bar.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProgressBarVariant {
    /// Filled glyphs up to the position, empty glyphs after it.
    #[default]
    Simple,
    /// A single marker glyph at the position.
    #[value(name = "nonTrailing", alias = "marker")]
    NonTrailing,
    /// Like `Simple`, with a transition glyph in the slot being crossed.
    Gradient,
}

impl fmt::Display for ProgressBarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgressBarVariant::Simple => "simple",
            ProgressBarVariant::NonTrailing => "nonTrailing",
            ProgressBarVariant::Gradient => "gradient",
        };
        f.write_str(name)
    }
}

pub const DEFAULT_TOTAL_SEGMENTS: u32 = 10;

/// Everything the user can configure about the readout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub allowed_modes: AllowedModes,

    /// Divide the remaining time by the playback rate.
    #[serde(rename = "pbrEnabled")]
    pub playback_rate_adjust: bool,

    /// Subtract skippable segments from the remaining time.
    #[serde(rename = "sbEnabled")]
    pub segment_adjust: bool,

    pub total_segments: u32,

    #[serde(rename = "progressBarPassed")]
    pub passed_symbol: String,

    #[serde(rename = "progressBarRemaining")]
    pub remaining_symbol: String,

    pub gradient_symbol: String,

    pub progress_bar_variant: ProgressBarVariant,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allowed_modes: AllowedModes::default(),
            playback_rate_adjust: true,
            segment_adjust: true,
            total_segments: DEFAULT_TOTAL_SEGMENTS,
            passed_symbol: "█".to_string(),
            remaining_symbol: "░".to_string(),
            gradient_symbol: "▒".to_string(),
            progress_bar_variant: ProgressBarVariant::Simple,
        }
    }
}

/// Playback metrics observed at one instant. All values are seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub duration: f64,
    pub current_time: f64,
    pub playback_rate: f64,
}

impl PlaybackSnapshot {
    pub fn new(duration: f64, current_time: f64, playback_rate: f64) -> Self {
        Self {
            duration,
            current_time,
            playback_rate,
        }
    }

    /// A snapshot only yields a label when the duration is a finite positive
    /// number and the position is finite.
    pub fn is_valid(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0 && self.current_time.is_finite()
    }
}

/// A skippable time range, `[start, end)` in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Portion of this segment at or after `position`.
    pub fn remaining_after(&self, position: f64) -> f64 {
        if self.start >= position {
            self.length()
        } else if self.end > position {
            self.end - position
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── cycle ─────────────────────────────────────────────────────────────────

    #[test]
    fn cycle_walks_all_modes_in_fixed_order() {
        let allowed = AllowedModes::default();
        assert_eq!(DisplayMode::EndsAt24h.cycle(&allowed), DisplayMode::EndsAt12h);
        assert_eq!(DisplayMode::EndsAt12h.cycle(&allowed), DisplayMode::Remaining);
        assert_eq!(DisplayMode::Remaining.cycle(&allowed), DisplayMode::Progress);
        assert_eq!(DisplayMode::Progress.cycle(&allowed), DisplayMode::ProgressBar);
        assert_eq!(DisplayMode::ProgressBar.cycle(&allowed), DisplayMode::EndsAt24h);
    }

    #[test]
    fn cycle_skips_disabled_modes() {
        let allowed = AllowedModes::from_modes([DisplayMode::EndsAt12h, DisplayMode::Progress]);
        assert_eq!(DisplayMode::EndsAt12h.cycle(&allowed), DisplayMode::Progress);
        assert_eq!(DisplayMode::Progress.cycle(&allowed), DisplayMode::EndsAt12h);
    }

    #[test]
    fn cycle_with_empty_set_falls_back_to_remaining() {
        let allowed = AllowedModes::none();
        for mode in DisplayMode::ALL {
            assert_eq!(mode.cycle(&allowed), DisplayMode::Remaining);
        }
    }

    #[test]
    fn cycle_from_unlisted_mode_starts_at_index_zero() {
        // Remaining is not allowed: treated as index 0 (Progress), so next is ProgressBar.
        let allowed = AllowedModes::from_modes([DisplayMode::Progress, DisplayMode::ProgressBar]);
        assert_eq!(DisplayMode::Remaining.cycle(&allowed), DisplayMode::ProgressBar);
    }

    #[test]
    fn cycle_returns_to_start_after_len_steps() {
        let sets = [
            AllowedModes::default(),
            AllowedModes::from_modes([DisplayMode::Remaining]),
            AllowedModes::from_modes([DisplayMode::EndsAt24h, DisplayMode::ProgressBar]),
            AllowedModes::from_modes([
                DisplayMode::EndsAt12h,
                DisplayMode::Remaining,
                DisplayMode::Progress,
            ]),
        ];

        for allowed in sets {
            let modes = allowed.modes();
            for start in &modes {
                let mut mode = *start;
                for _ in 0..modes.len() {
                    mode = mode.cycle(&allowed);
                }
                assert_eq!(mode, *start, "cycle over {:?} must have period {}", modes, modes.len());
            }
        }
    }

    // ── AllowedModes ──────────────────────────────────────────────────────────

    #[test]
    fn modes_follow_enumeration_order_regardless_of_insertion() {
        let allowed = AllowedModes::from_modes([
            DisplayMode::ProgressBar,
            DisplayMode::EndsAt24h,
            DisplayMode::Progress,
        ]);
        assert_eq!(
            allowed.modes(),
            vec![DisplayMode::EndsAt24h, DisplayMode::Progress, DisplayMode::ProgressBar]
        );
        assert_eq!(allowed.first(), Some(DisplayMode::EndsAt24h));
    }

    #[test]
    fn empty_set_has_no_first_mode() {
        assert!(AllowedModes::none().is_empty());
        assert_eq!(AllowedModes::none().first(), None);
    }

    // ── Persistence names ─────────────────────────────────────────────────────

    #[test]
    fn options_use_stored_key_names() {
        let json = serde_json::to_value(Options::default()).unwrap();
        assert_eq!(json["pbrEnabled"], true);
        assert_eq!(json["sbEnabled"], true);
        assert_eq!(json["progressBarPassed"], "█");
        assert_eq!(json["progressBarRemaining"], "░");
        assert_eq!(json["gradientSymbol"], "▒");
        assert_eq!(json["progressBarVariant"], "simple");
        assert_eq!(json["allowedModes"]["endsIn"], true);
    }

    #[test]
    fn partial_options_fill_in_defaults() {
        let options: Options = serde_json::from_str(
            r#"{"allowedModes":{"endsAt24h":false},"progressBarVariant":"nonTrailing"}"#,
        )
        .unwrap();
        assert!(!options.allowed_modes.ends_at_24h);
        assert!(options.allowed_modes.remaining);
        assert_eq!(options.progress_bar_variant, ProgressBarVariant::NonTrailing);
        assert_eq!(options.total_segments, DEFAULT_TOTAL_SEGMENTS);
    }

    #[test]
    fn mode_parses_from_storage_key() {
        assert_eq!("endsIn".parse::<DisplayMode>(), Ok(DisplayMode::Remaining));
        assert_eq!("progressBar".parse::<DisplayMode>(), Ok(DisplayMode::ProgressBar));
        assert!("sideways".parse::<DisplayMode>().is_err());
    }

    // ── Segment ───────────────────────────────────────────────────────────────

    #[test]
    fn segment_remaining_after_covers_all_positions() {
        let segment = Segment::new(10.0, 20.0);
        assert_eq!(segment.remaining_after(5.0), 10.0);
        assert_eq!(segment.remaining_after(15.0), 5.0);
        assert_eq!(segment.remaining_after(25.0), 0.0);
        assert_eq!(segment.remaining_after(20.0), 0.0);
        assert_eq!(segment.remaining_after(10.0), 10.0);
    }

    #[test]
    fn snapshot_validity() {
        assert!(PlaybackSnapshot::new(60.0, 0.0, 1.0).is_valid());
        assert!(!PlaybackSnapshot::new(0.0, 0.0, 1.0).is_valid());
        assert!(!PlaybackSnapshot::new(f64::NAN, 0.0, 1.0).is_valid());
        assert!(!PlaybackSnapshot::new(f64::INFINITY, 0.0, 1.0).is_valid());
        assert!(!PlaybackSnapshot::new(60.0, f64::NAN, 1.0).is_valid());
    }
}
