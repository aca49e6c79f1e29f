use crate::core::events::*;
use crate::core::models::{deserialize_lenient_mode, DisplayMode, Options, PlaybackSnapshot};
use serde::{Deserialize, Serialize};

/// What the settings store persists: the user's options and the last active mode.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub options: Options,

    #[serde(
        deserialize_with = "deserialize_lenient_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub mode: Option<DisplayMode>,
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone)]
pub struct UiState {
    /// `None` hides the readout (live content)
    pub label: Option<String>,
    pub mode: DisplayMode,

    pub elapsed: f64,
    pub duration: f64,
    pub playback_rate: f64,
    pub is_paused: bool,

    pub content_id: Option<String>,
    pub segments_ready: bool,

    pub status_message: String,
    pub error_message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            label: None,
            mode: DisplayMode::default(),
            elapsed: 0.0,
            duration: 0.0,
            playback_rate: 1.0,
            is_paused: false,
            content_id: None,
            segments_ready: false,
            status_message: "Welcome".to_string(),
            error_message: None,
        }
    }
}

/// Complete application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

impl AppState {
    /// Copies the latest playback metrics and label into the view.
    pub fn update_readout(
        &mut self,
        snapshot: &PlaybackSnapshot,
        label: Option<String>,
        mode: DisplayMode,
        is_paused: bool,
    ) {
        self.ui.elapsed = snapshot.current_time;
        self.ui.duration = snapshot.duration;
        self.ui.playback_rate = snapshot.playback_rate;
        self.ui.is_paused = is_paused;
        self.ui.label = label;
        self.ui.mode = mode;
    }

    /// Update state based on an event
    pub fn apply_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Player(pe) => match pe {
                PlayerEvent::ContentChanged { content_id } => {
                    self.ui.content_id = content_id.clone();
                    self.ui.segments_ready = false;
                    self.ui.status_message = match content_id {
                        Some(id) => format!("Now watching: {}", id),
                        None => "Now watching".to_string(),
                    };
                    self.ui.error_message = None;
                }
                PlayerEvent::Paused => {
                    self.ui.status_message = "Paused".to_string();
                }
                PlayerEvent::Resumed => {
                    self.ui.status_message = "Playing".to_string();
                }
                PlayerEvent::RateChanged { rate } => {
                    self.ui.status_message = format!("Speed: {}x", rate);
                }
            },

            // Stale results are filtered by the segment handler before they reach the view
            AppEvent::Segments(_) => {}

            AppEvent::Settings(SettingsEvent::Changed { .. }) => {
                self.ui.status_message = "Settings reloaded".to_string();
            }

            AppEvent::Ui(ue) => match ue {
                UiEvent::ShowMessage { message } => {
                    self.ui.status_message = message.clone();
                    self.ui.error_message = None;
                }
                _ => {}
            },

            AppEvent::Shutdown => {}
        }
    }
}
