use crate::application::state::Settings;
use crate::core::models::{DisplayMode, Options, PlaybackSnapshot};
use crate::modules::label::engine::compute_label;
use crate::modules::segments::provider::SegmentOffsetProvider;
use tracing::info;

/// The active display mode. Always a member of the allowed set, or
/// `Remaining` when the set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineState {
    pub current_mode: DisplayMode,
}

/// One readout session: options, the active mode, and the segment offsets
/// for the content being watched.
///
/// Methods that can move the mode away from what the store holds return the
/// mode that must be written back, so the caller can persist corrections.
#[derive(Debug)]
pub struct ReadoutEngine {
    state: EngineState,
    options: Options,
    offsets: SegmentOffsetProvider,
}

/// Resolves `mode` against the allowed set: kept if allowed, otherwise the
/// first allowed mode, otherwise `Remaining`.
pub fn resolve_mode(mode: DisplayMode, options: &Options) -> DisplayMode {
    if options.allowed_modes.contains(mode) {
        mode
    } else {
        options
            .allowed_modes
            .first()
            .unwrap_or(DisplayMode::Remaining)
    }
}

impl ReadoutEngine {
    /// Builds an engine from persisted settings.
    ///
    /// Returns the engine and, when the persisted mode was missing from the
    /// allowed set, the corrected mode to persist.
    pub fn new(settings: &Settings) -> (Self, Option<DisplayMode>) {
        let requested = settings.mode.unwrap_or_default();
        let current_mode = resolve_mode(requested, &settings.options);

        let engine = Self {
            state: EngineState { current_mode },
            options: settings.options.clone(),
            offsets: SegmentOffsetProvider::new(),
        };

        let correction = engine.correction(settings.mode);
        (engine, correction)
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.current_mode
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn offsets(&self) -> &SegmentOffsetProvider {
        &self.offsets
    }

    pub fn offsets_mut(&mut self) -> &mut SegmentOffsetProvider {
        &mut self.offsets
    }

    /// Advances to the next allowed mode (a click on the readout).
    pub fn cycle(&mut self) -> DisplayMode {
        self.state.current_mode = self.state.current_mode.cycle(&self.options.allowed_modes);
        self.state.current_mode
    }

    /// Applies settings written by another instance or the options command.
    ///
    /// A stored mode replaces the current one; either way the result is
    /// validated against the new allowed set.
    pub fn apply_settings(&mut self, settings: &Settings) -> Option<DisplayMode> {
        self.options = settings.options.clone();

        let requested = settings.mode.unwrap_or(self.state.current_mode);
        self.state.current_mode = resolve_mode(requested, &self.options);

        self.correction(settings.mode)
    }

    /// Label for `snapshot` in the current mode.
    pub fn label(&self, snapshot: &PlaybackSnapshot) -> String {
        compute_label(snapshot, self.state.current_mode, &self.options, &self.offsets.snapshot())
    }

    fn correction(&self, stored: Option<DisplayMode>) -> Option<DisplayMode> {
        match stored {
            Some(mode) if mode == self.state.current_mode => None,
            Some(mode) => {
                info!(
                    "Mode {} is not enabled, falling back to {}",
                    mode, self.state.current_mode
                );
                Some(self.state.current_mode)
            }
            // Nothing stored yet: only worth writing if the default was rejected.
            None if self.state.current_mode != DisplayMode::default() => {
                Some(self.state.current_mode)
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AllowedModes, Segment};

    fn settings(allowed: &[DisplayMode], mode: Option<DisplayMode>) -> Settings {
        Settings {
            options: Options {
                allowed_modes: AllowedModes::from_modes(allowed.iter().copied()),
                ..Options::default()
            },
            mode,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn persisted_mode_is_kept_when_allowed() {
        let (engine, correction) = ReadoutEngine::new(&settings(
            &DisplayMode::ALL,
            Some(DisplayMode::EndsAt12h),
        ));
        assert_eq!(engine.mode(), DisplayMode::EndsAt12h);
        assert_eq!(correction, None);
    }

    #[test]
    fn disallowed_persisted_mode_falls_back_to_first_allowed() {
        let (engine, correction) = ReadoutEngine::new(&settings(
            &[DisplayMode::Progress, DisplayMode::ProgressBar],
            Some(DisplayMode::Remaining),
        ));
        assert_eq!(engine.mode(), DisplayMode::Progress);
        assert_eq!(correction, Some(DisplayMode::Progress));
    }

    #[test]
    fn missing_mode_defaults_to_remaining_without_correction() {
        let (engine, correction) = ReadoutEngine::new(&settings(&DisplayMode::ALL, None));
        assert_eq!(engine.mode(), DisplayMode::Remaining);
        assert_eq!(correction, None);
    }

    #[test]
    fn missing_mode_with_remaining_disabled_is_corrected() {
        let (engine, correction) =
            ReadoutEngine::new(&settings(&[DisplayMode::EndsAt12h], None));
        assert_eq!(engine.mode(), DisplayMode::EndsAt12h);
        assert_eq!(correction, Some(DisplayMode::EndsAt12h));
    }

    #[test]
    fn empty_allowed_set_uses_remaining() {
        let (mut engine, correction) =
            ReadoutEngine::new(&settings(&[], Some(DisplayMode::Progress)));
        assert_eq!(engine.mode(), DisplayMode::Remaining);
        assert_eq!(correction, Some(DisplayMode::Remaining));
        assert_eq!(engine.cycle(), DisplayMode::Remaining);
    }

    // ── Cycling ───────────────────────────────────────────────────────────────

    #[test]
    fn cycle_follows_allowed_modes() {
        let (mut engine, _) = ReadoutEngine::new(&settings(
            &[DisplayMode::EndsAt24h, DisplayMode::Remaining],
            Some(DisplayMode::Remaining),
        ));
        assert_eq!(engine.cycle(), DisplayMode::EndsAt24h);
        assert_eq!(engine.cycle(), DisplayMode::Remaining);
    }

    // ── Settings changes ──────────────────────────────────────────────────────

    #[test]
    fn removing_active_mode_falls_back_and_requests_persist() {
        let (mut engine, _) = ReadoutEngine::new(&settings(
            &DisplayMode::ALL,
            Some(DisplayMode::Remaining),
        ));

        let correction = engine.apply_settings(&settings(
            &[DisplayMode::Progress, DisplayMode::ProgressBar],
            Some(DisplayMode::Remaining),
        ));
        assert_eq!(engine.mode(), DisplayMode::Progress);
        assert_eq!(correction, Some(DisplayMode::Progress));
    }

    #[test]
    fn stored_mode_from_another_instance_is_adopted() {
        let (mut engine, _) = ReadoutEngine::new(&settings(
            &DisplayMode::ALL,
            Some(DisplayMode::Remaining),
        ));

        let correction =
            engine.apply_settings(&settings(&DisplayMode::ALL, Some(DisplayMode::ProgressBar)));
        assert_eq!(engine.mode(), DisplayMode::ProgressBar);
        assert_eq!(correction, None);
    }

    #[test]
    fn options_change_without_mode_keeps_current_mode() {
        let (mut engine, _) = ReadoutEngine::new(&settings(
            &DisplayMode::ALL,
            Some(DisplayMode::EndsAt24h),
        ));

        let correction = engine.apply_settings(&settings(
            &[DisplayMode::EndsAt24h, DisplayMode::Progress],
            None,
        ));
        assert_eq!(engine.mode(), DisplayMode::EndsAt24h);
        assert_eq!(correction, Some(DisplayMode::EndsAt24h));
    }

    // ── Labels ────────────────────────────────────────────────────────────────

    #[test]
    fn label_uses_loaded_segments() {
        let (mut engine, _) = ReadoutEngine::new(&settings(
            &DisplayMode::ALL,
            Some(DisplayMode::Remaining),
        ));
        let snapshot = PlaybackSnapshot::new(600.0, 0.0, 1.0);

        assert_eq!(engine.label(&snapshot), "10:00");

        let ticket = engine.offsets_mut().begin("abc");
        engine
            .offsets_mut()
            .resolve(ticket.generation, vec![Segment::new(60.0, 120.0)]);
        assert_eq!(engine.label(&snapshot), "9:00");
    }
}
