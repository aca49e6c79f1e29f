use crate::application::app::Application;
use crate::application::engine::ReadoutEngine;
use crate::cli_handlers::CliCommand;
use crate::config::AppConfig;
use crate::core::events::{AppEvent, UiEvent};
use crate::core::models::DisplayMode;
use crate::core::traits::StorageBackend;
use crate::modules::storage::json_backend::JsonStorageBackend;
use crate::modules::ui::terminal::renderer::TerminalRenderer;
use crate::utils::APP_NAME;
use anyhow::{Result, bail};

// ── Mode ──────────────────────────────────────────────────────────────────────
pub struct ModeCommand {
    pub mode: Option<DisplayMode>,
}

impl CliCommand for ModeCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let storage = JsonStorageBackend::new()?;
        let mut settings = storage.load()?;
        let ui = TerminalRenderer::new();

        match self.mode {
            Some(mode) => {
                if !settings.options.allowed_modes.contains(mode) {
                    bail!(
                        "Mode '{}' is not enabled. Allow it with '{} options --allow ...'",
                        mode,
                        APP_NAME
                    );
                }

                settings.mode = Some(mode);
                storage.save(&settings)?;
                ui.print_message(&format!("Mode set to: {} ({})", mode, mode.description()));
            }
            None => {
                let (engine, correction) = ReadoutEngine::new(&settings);
                if let Some(mode) = correction {
                    settings.mode = Some(mode);
                    storage.save(&settings)?;
                }

                let current = engine.mode();
                ui.print_message(&format!("Current mode: {} ({})", current, current.description()));
                for mode in DisplayMode::ALL {
                    let marker = if mode == current { "▶" } else { " " };
                    let state = if settings.options.allowed_modes.contains(mode) {
                        ""
                    } else {
                        " (disabled)"
                    };
                    ui.print_message(&format!("{} {}{}", marker, mode, state));
                }
            }
        }

        Ok(())
    }
}

// ── Cycle ─────────────────────────────────────────────────────────────────────
pub struct CycleCommand {
    pub config: AppConfig,
}

impl CliCommand for CycleCommand {
    fn execute(self: Box<Self>) -> Result<()> {
        let storage = JsonStorageBackend::new()?;

        let mut app = Application::new(self.config).with_storage_backend(Box::new(storage));

        app.init()?;
        app.event_sender()
            .send(AppEvent::Ui(UiEvent::CycleModeRequested))?;
        app.run_once()?;
        app.cleanup()?;

        if let Some(error) = &app.state().ui.error_message {
            bail!("{}", error);
        }

        let mode = app.engine().mode();
        let ui = TerminalRenderer::new();
        ui.print_message(&format!("Mode set to: {} ({})", mode, mode.description()));

        Ok(())
    }
}
