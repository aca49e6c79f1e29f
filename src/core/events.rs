use crate::application::state::Settings;
use crate::core::models::Segment;

/// All events that can occur in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    // Player events
    Player(PlayerEvent),

    // Segment service results
    Segments(SegmentEvent),

    // Settings store notifications
    Settings(SettingsEvent),

    // UI events
    Ui(UiEvent),

    // Application lifecycle
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    /// The player switched to different content
    ContentChanged { content_id: Option<String> },

    /// Playback paused
    Paused,

    /// Playback resumed
    Resumed,

    /// Playback rate changed
    RateChanged { rate: f64 },
}

#[derive(Debug, Clone)]
pub enum SegmentEvent {
    /// A fetch resolved. `generation` identifies the request it answers.
    Loaded { generation: u64, segments: Vec<Segment> },

    /// A fetch failed
    Failed { generation: u64, message: String },
}

#[derive(Debug, Clone)]
pub enum SettingsEvent {
    /// The settings file changed outside this process
    Changed { settings: Settings },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// User clicked the readout (or pressed the cycle key)
    CycleModeRequested,

    /// User requested pause/resume toggle
    TogglePauseRequested,

    /// User requested a faster playback rate
    SpeedUpRequested,

    /// User requested a slower playback rate
    SlowDownRequested,

    /// User requested a relative seek
    SeekRequested { seconds: f64 },

    /// User requested the next content id
    NextContentRequested,

    /// User requested quit
    QuitRequested,

    /// Display message to user
    ShowMessage { message: String },
}

/// Type alias for event sender
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = crossbeam_channel::Receiver<AppEvent>;
