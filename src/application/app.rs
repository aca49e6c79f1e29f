use crate::application::engine::ReadoutEngine;
use crate::application::handlers::segment_handler::SegmentHandler;
use crate::application::handlers::settings_handler::SettingsHandler;
use crate::application::handlers::ui_handler::UiHandler;
use crate::application::handlers::{HandlerContext, SegmentFetcher};
use crate::application::state::{AppState, Settings};
use crate::config::AppConfig;
use crate::core::events::*;
use crate::core::traits::*;
use anyhow::Result;
use crossbeam_channel::bounded;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Main application orchestrator
pub struct Application {
    state: AppState,
    engine: ReadoutEngine,
    event_tx: EventSender,
    event_rx: EventReceiver,

    config: AppConfig,

    // Module references
    player: Option<Box<dyn PlayerAdapter>>,
    storage_backend: Option<Box<dyn StorageBackend>>,
    ui_renderer: Option<Box<dyn UiRenderer>>,
    segments: Option<SegmentFetcher>,

    // Change tracking for the settings file
    settings_seen: Option<SystemTime>,
    last_settings_poll: Instant,

    // Keep track of running state
    running: bool,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let (tx, rx) = bounded(100);
        let (engine, _) = ReadoutEngine::new(&Settings::default());

        Self {
            state: AppState::default(),
            engine,
            event_tx: tx,
            event_rx: rx,
            config,
            player: None,
            storage_backend: None,
            ui_renderer: None,
            segments: None,
            settings_seen: None,
            last_settings_poll: Instant::now(),
            running: false,
        }
    }

    /// Set the player adapter
    pub fn with_player(mut self, player: Box<dyn PlayerAdapter>) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the storage backend
    pub fn with_storage_backend(mut self, backend: Box<dyn StorageBackend>) -> Self {
        self.storage_backend = Some(backend);
        self
    }

    /// Set the UI renderer
    pub fn with_ui_renderer(mut self, renderer: Box<dyn UiRenderer>) -> Self {
        self.ui_renderer = Some(renderer);
        self
    }

    /// Set the segment service and the runtime its requests run on
    pub fn with_segment_source(mut self, source: Arc<dyn SegmentSource>, runtime: Handle) -> Self {
        self.segments = Some(SegmentFetcher { source, runtime });
        self
    }

    /// Get event sender (for modules to emit events)
    pub fn event_sender(&self) -> EventSender {
        self.event_tx.clone()
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn engine(&self) -> &ReadoutEngine {
        &self.engine
    }

    /// Initialize the application
    pub fn init(&mut self) -> Result<()> {
        // Load settings from storage
        let mut correction = None;
        if let Some(storage) = &self.storage_backend {
            match storage.load() {
                Ok(settings) => {
                    let (engine, corrected) = ReadoutEngine::new(&settings);
                    self.engine = engine;
                    correction = corrected;
                    self.settings_seen = storage.last_modified();
                }
                Err(e) => {
                    warn!("Could not load settings, using defaults: {:#}", e);
                    self.state.ui.error_message = Some(format!("Could not load settings: {}", e));
                }
            }
        }

        if let Some(mode) = correction {
            self.context().persist_mode(mode);
        }

        // Start loading segments for whatever is playing
        let content_id = self
            .player
            .as_ref()
            .and_then(|player| player.content_id().map(str::to_string));
        self.event_tx
            .send(AppEvent::Player(PlayerEvent::ContentChanged { content_id }))?;

        // Initialize UI
        if let Some(ui) = &mut self.ui_renderer {
            ui.init()?;
        }

        Ok(())
    }

    /// Run the main event loop
    pub fn run(&mut self) -> Result<()> {
        self.running = true;
        let tick = Duration::from_millis(self.config.tick_interval_ms.max(1));

        while self.running {
            // Process all pending events
            self.process_events()?;

            // Poll UI for input
            if let Some(ui) = &mut self.ui_renderer {
                let ui_events = ui.poll_input()?;
                for event in ui_events {
                    self.event_tx.send(AppEvent::Ui(event))?;
                }
            }

            self.poll_settings();

            self.refresh_readout();

            // Render UI with current state
            if let Some(ui) = &mut self.ui_renderer {
                ui.render(&self.state.ui)?;
            }

            std::thread::sleep(tick);
        }

        Ok(())
    }

    /// Process events once without entering the main loop (useful for one-off commands)
    pub fn run_once(&mut self) -> Result<()> {
        self.process_events()?;
        self.refresh_readout();
        Ok(())
    }

    /// Restore the terminal and release resources
    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(ui) = &mut self.ui_renderer {
            ui.cleanup()?;
        }
        Ok(())
    }

    /// Recomputes the label from the player's current snapshot.
    fn refresh_readout(&mut self) {
        let Some(player) = &self.player else {
            return;
        };

        let snapshot = player.snapshot();
        // Live content has no end to count towards; the readout is hidden.
        let label = if player.is_live() {
            None
        } else {
            Some(self.engine.label(&snapshot))
        };

        self.state
            .update_readout(&snapshot, label, self.engine.mode(), player.is_paused());
    }

    /// Checks the settings file for writes by other instances.
    fn poll_settings(&mut self) {
        let interval = Duration::from_millis(self.config.settings_poll_interval_ms);
        if self.last_settings_poll.elapsed() < interval {
            return;
        }
        self.last_settings_poll = Instant::now();

        let Some(storage) = &self.storage_backend else {
            return;
        };

        let modified = storage.last_modified();
        if modified.is_none() || modified == self.settings_seen {
            return;
        }
        self.settings_seen = modified;

        match storage.load() {
            Ok(settings) => {
                debug!("Settings changed on disk");
                if self
                    .event_tx
                    .send(AppEvent::Settings(SettingsEvent::Changed { settings }))
                    .is_err()
                {
                    warn!("Event queue closed, dropping settings change");
                }
            }
            Err(e) => warn!("Could not reload settings: {:#}", e),
        }
    }

    /// Process all pending events in the queue
    fn process_events(&mut self) -> Result<()> {
        // Drain all events currently in queue
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn context(&mut self) -> HandlerContext<'_> {
        HandlerContext {
            state: &mut self.state,
            engine: &mut self.engine,
            event_tx: &self.event_tx,
            player: &mut self.player,
            storage: &self.storage_backend,
            segments: &self.segments,
            settings_seen: &mut self.settings_seen,
        }
    }

    /// Handle a single event
    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        // Update state based on event
        self.state.apply_event(&event);

        // Route event to appropriate handler
        match &event {
            AppEvent::Player(pe) => self.handle_player_event(pe),
            AppEvent::Segments(se) => SegmentHandler.handle(se, &mut self.context())?,
            AppEvent::Settings(se) => SettingsHandler.handle(se, &mut self.context())?,
            AppEvent::Ui(ue) => UiHandler.handle(ue, &mut self.context())?,
            AppEvent::Shutdown => {
                self.running = false;
            }
        }

        Ok(())
    }

    fn handle_player_event(&mut self, event: &PlayerEvent) {
        if let PlayerEvent::ContentChanged { content_id } = event {
            self.context().start_segment_load(content_id.as_deref());
        }
    }
}
