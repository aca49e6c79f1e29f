use crate::application::engine::ReadoutEngine;
use crate::application::state::Settings;
use crate::cli_handlers::CliCommand;
use crate::core::models::{AllowedModes, DisplayMode, Options, ProgressBarVariant};
use crate::core::traits::StorageBackend;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use anyhow::{Result, bail};
use tracing::warn;

pub struct OptionsCommand {
    pub allow: Option<Vec<DisplayMode>>,
    pub playback_rate_adjust: Option<bool>,
    pub segment_adjust: Option<bool>,
    pub total_segments: Option<u32>,
    pub passed: Option<String>,
    pub remaining: Option<String>,
    pub gradient: Option<String>,
    pub variant: Option<ProgressBarVariant>,
    pub reset: bool,
}

impl OptionsCommand {
    /// Applies the flags to `settings`, then repairs what the result must
    /// hold: at least one allowed mode, and a stored mode from that set.
    fn apply(&self, mut settings: Settings) -> Result<Settings> {
        if self.reset {
            settings.options = Options::default();
        }
        let options = &mut settings.options;

        if let Some(modes) = &self.allow {
            options.allowed_modes = AllowedModes::from_modes(modes.iter().copied());
        }
        if options.allowed_modes.is_empty() {
            warn!("No mode allowed, enabling {}", DisplayMode::Remaining);
            options.allowed_modes.set(DisplayMode::Remaining, true);
        }

        if let Some(enabled) = self.playback_rate_adjust {
            options.playback_rate_adjust = enabled;
        }
        if let Some(enabled) = self.segment_adjust {
            options.segment_adjust = enabled;
        }
        if let Some(count) = self.total_segments {
            if count == 0 {
                bail!("The progress bar needs at least one segment");
            }
            options.total_segments = count;
        }

        for (name, glyph, slot) in [
            ("passed", &self.passed, &mut options.passed_symbol),
            ("remaining", &self.remaining, &mut options.remaining_symbol),
            ("gradient", &self.gradient, &mut options.gradient_symbol),
        ] {
            if let Some(glyph) = glyph {
                if glyph.is_empty() {
                    bail!("The {} glyph cannot be empty", name);
                }
                *slot = glyph.clone();
            }
        }

        if let Some(variant) = self.variant {
            options.progress_bar_variant = variant;
        }

        let (_, correction) = ReadoutEngine::new(&settings);
        if let Some(mode) = correction {
            settings.mode = Some(mode);
        }

        Ok(settings)
    }
}

/// Multi-line listing of `options`
pub fn describe_options(options: &Options) -> String {
    let allowed = options
        .allowed_modes
        .modes()
        .iter()
        .map(|mode| mode.key())
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("Allowed modes:     {}", allowed),
        format!("Playback rate:     {}", on_off(options.playback_rate_adjust)),
        format!("Skip segments:     {}", on_off(options.segment_adjust)),
        format!("Bar variant:       {}", options.progress_bar_variant),
        format!("Bar segments:      {}", options.total_segments),
        format!(
            "Bar glyphs:        passed '{}', remaining '{}', gradient '{}'",
            options.passed_symbol, options.remaining_symbol, options.gradient_symbol
        ),
    ]
    .join("\n")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

impl CliCommand for OptionsCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let storage = JsonStorageBackend::new()?;
        let stored = storage.load()?;
        let ui = TerminalRenderer::new();

        // Without flags this only repairs what the store holds.
        let settings = self.apply(stored.clone())?;

        ui.print_message(&describe_options(&settings.options));
        if settings == stored {
            return Ok(());
        }

        storage.save(&settings)?;
        if settings.mode != stored.mode {
            if let Some(mode) = settings.mode {
                ui.print_message(&format!("Mode changed to: {}", mode));
            }
        }
        ui.print_message("✓ Options saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> OptionsCommand {
        OptionsCommand {
            allow: None,
            playback_rate_adjust: None,
            segment_adjust: None,
            total_segments: None,
            passed: None,
            remaining: None,
            gradient: None,
            variant: None,
            reset: false,
        }
    }

    #[test]
    fn no_flags_leave_valid_settings_alone() {
        let stored = Settings {
            mode: Some(DisplayMode::Progress),
            ..Settings::default()
        };
        assert_eq!(command().apply(stored.clone()).unwrap(), stored);
    }

    #[test]
    fn no_flags_repair_an_empty_allowed_set() {
        let mut stored = Settings::default();
        stored.options.allowed_modes = AllowedModes::none();
        stored.mode = Some(DisplayMode::Progress);

        let settings = command().apply(stored).unwrap();
        assert_eq!(settings.options.allowed_modes.modes(), vec![DisplayMode::Remaining]);
        assert_eq!(settings.mode, Some(DisplayMode::Remaining));
    }

    #[test]
    fn empty_allow_list_falls_back_to_remaining() {
        let cmd = OptionsCommand {
            allow: Some(Vec::new()),
            ..command()
        };
        let settings = cmd.apply(Settings::default()).unwrap();
        assert_eq!(settings.options.allowed_modes.modes(), vec![DisplayMode::Remaining]);
    }

    #[test]
    fn disallowing_the_current_mode_corrects_it() {
        let cmd = OptionsCommand {
            allow: Some(vec![DisplayMode::ProgressBar, DisplayMode::Progress]),
            ..command()
        };
        let stored = Settings {
            mode: Some(DisplayMode::EndsAt12h),
            ..Settings::default()
        };

        let settings = cmd.apply(stored).unwrap();
        assert_eq!(settings.mode, Some(DisplayMode::Progress));
    }

    #[test]
    fn flags_update_only_their_fields() {
        let cmd = OptionsCommand {
            playback_rate_adjust: Some(false),
            passed: Some("#".to_string()),
            variant: Some(ProgressBarVariant::NonTrailing),
            total_segments: Some(5),
            ..command()
        };

        let settings = cmd.apply(Settings::default()).unwrap();
        let options = &settings.options;
        assert!(!options.playback_rate_adjust);
        assert!(options.segment_adjust);
        assert_eq!(options.passed_symbol, "#");
        assert_eq!(options.remaining_symbol, "░");
        assert_eq!(options.progress_bar_variant, ProgressBarVariant::NonTrailing);
        assert_eq!(options.total_segments, 5);
    }

    #[test]
    fn empty_glyph_is_rejected() {
        let cmd = OptionsCommand {
            remaining: Some(String::new()),
            ..command()
        };
        assert!(cmd.apply(Settings::default()).is_err());
    }

    #[test]
    fn reset_restores_defaults_before_other_flags() {
        let mut stored = Settings::default();
        stored.options.passed_symbol = "=".to_string();
        stored.options.segment_adjust = false;

        let cmd = OptionsCommand {
            reset: true,
            segment_adjust: Some(false),
            ..command()
        };
        let settings = cmd.apply(stored).unwrap();
        assert_eq!(settings.options.passed_symbol, "█");
        assert!(!settings.options.segment_adjust);
    }

    #[test]
    fn listing_names_allowed_modes_by_key() {
        let mut options = Options::default();
        options.allowed_modes = AllowedModes::from_modes([DisplayMode::Remaining, DisplayMode::ProgressBar]);
        let text = describe_options(&options);
        assert!(text.contains("Allowed modes:     endsIn, progressBar"));
        assert!(text.contains("Skip segments:     on"));
    }
}
