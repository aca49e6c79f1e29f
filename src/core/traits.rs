use crate::application::state::{Settings, UiState};
use crate::core::error::SegmentError;
use crate::core::events::UiEvent;
use crate::core::models::{PlaybackSnapshot, Segment};
use anyhow::Result;
use async_trait::async_trait;
use std::time::SystemTime;

/// Source of playback metrics (the video player being annotated)
pub trait PlayerAdapter: Send {
    /// Current playback metrics
    fn snapshot(&self) -> PlaybackSnapshot;

    /// Identifier of the content being played, if it has one
    fn content_id(&self) -> Option<&str>;

    /// Live streams have no meaningful end; the readout is hidden for them
    fn is_live(&self) -> bool;

    fn is_paused(&self) -> bool;

    fn pause(&mut self);

    fn resume(&mut self);

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    /// Move the position by `seconds` (negative seeks backwards)
    fn seek_by(&mut self, seconds: f64);

    /// Switch to the next queued content. Returns the new content id.
    fn next_content(&mut self) -> Option<&str> {
        None
    }
}

/// Abstraction for persistent storage of options and the active mode
pub trait StorageBackend: Send {
    /// Load settings
    fn load(&self) -> Result<Settings>;

    /// Save settings
    fn save(&self, settings: &Settings) -> Result<()>;

    /// Modification stamp used to notice writes from other instances.
    /// Backends without change tracking return `None`.
    fn last_modified(&self) -> Option<SystemTime> {
        None
    }
}

/// Remote service that reports skippable segments for a content id
#[async_trait]
pub trait SegmentSource: Send + Sync {
    async fn fetch(&self, content_id: &str) -> Result<Vec<Segment>, SegmentError>;
}

/// Abstraction for UI rendering
pub trait UiRenderer: Send {
    /// Initialize the UI (setup terminal, etc.)
    fn init(&mut self) -> Result<()>;

    /// Cleanup the UI (restore terminal, etc.)
    fn cleanup(&mut self) -> Result<()>;

    /// Render current state
    fn render(&mut self, state: &UiState) -> Result<()>;

    /// Poll for user input (non-blocking)
    /// Returns events generated from user input
    fn poll_input(&mut self) -> Result<Vec<UiEvent>>;
}
