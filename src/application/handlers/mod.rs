pub mod segment_handler;
pub mod settings_handler;
pub mod ui_handler;

use crate::application::engine::ReadoutEngine;
use crate::application::state::AppState;
use crate::core::events::{AppEvent, EventSender, SegmentEvent};
use crate::core::models::DisplayMode;
use crate::core::traits::{PlayerAdapter, SegmentSource, StorageBackend};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Where segment fetches run: the service client plus the runtime that drives it.
#[derive(Clone)]
pub struct SegmentFetcher {
    pub source: Arc<dyn SegmentSource>,
    pub runtime: Handle,
}

/// All dependencies that event handlers need to do their work.
///
/// Passed by `&mut` into each handler method, giving handlers access to
/// shared resources without coupling them to the `Application` struct itself.
pub struct HandlerContext<'a> {
    pub state: &'a mut AppState,
    pub engine: &'a mut ReadoutEngine,
    pub event_tx: &'a EventSender,
    pub player: &'a mut Option<Box<dyn PlayerAdapter>>,
    pub storage: &'a Option<Box<dyn StorageBackend>>,
    pub segments: &'a Option<SegmentFetcher>,
    /// Last settings-file stamp this process knows about
    pub settings_seen: &'a mut Option<SystemTime>,
}

impl<'a> HandlerContext<'a> {
    /// Writes `mode` back to the store, keeping whatever options it holds.
    ///
    /// A store that cannot be read or written does not stop the readout: the
    /// mode stays active in memory and the failure is shown to the user.
    /// Returns false when the store failed.
    pub fn persist_mode(&mut self, mode: DisplayMode) -> bool {
        let Some(storage) = self.storage else {
            return true;
        };

        let result = storage.load().and_then(|mut settings| {
            settings.mode = Some(mode);
            storage.save(&settings)
        });

        match result {
            // Our own write must not come back as an external change.
            Ok(()) => {
                *self.settings_seen = storage.last_modified();
                true
            }
            Err(e) => {
                warn!("Could not save mode {}: {:#}", mode, e);
                self.state.ui.error_message = Some(format!("Could not save mode: {}", e));
                false
            }
        }
    }

    /// Points the segment provider at `content_id` and starts a fetch.
    ///
    /// With segment adjustment disabled (or no content id) the provider is
    /// cleared instead, which also invalidates any fetch still in flight.
    pub fn start_segment_load(&mut self, content_id: Option<&str>) {
        let content_id = match content_id {
            Some(id) if self.engine.options().segment_adjust => id,
            _ => {
                self.engine.offsets_mut().clear();
                self.state.ui.segments_ready = false;
                return;
            }
        };

        let ticket = self.engine.offsets_mut().begin(content_id);
        self.state.ui.segments_ready = false;

        let Some(fetcher) = self.segments else {
            return;
        };

        let source = Arc::clone(&fetcher.source);
        let event_tx = self.event_tx.clone();
        fetcher.runtime.spawn(async move {
            let event = match source.fetch(&ticket.content_id).await {
                Ok(segments) => SegmentEvent::Loaded {
                    generation: ticket.generation,
                    segments,
                },
                Err(e) => SegmentEvent::Failed {
                    generation: ticket.generation,
                    message: e.to_string(),
                },
            };

            if event_tx.send(AppEvent::Segments(event)).is_err() {
                debug!("Application closed before segment fetch completed");
            }
        });
    }

    /// Content id the player currently reports, owned.
    pub fn player_content_id(&self) -> Option<String> {
        self.player
            .as_ref()
            .and_then(|player| player.content_id().map(str::to_string))
    }
}
