use crate::application::handlers::HandlerContext;
use crate::core::events::{AppEvent, PlayerEvent, UiEvent};
use crate::utils::step_playback_rate;
use anyhow::Result;

/// Handles all [`UiEvent`] variants that require side effects.
///
/// Responsible for:
/// - Cycling the display mode and persisting it.
/// - Translating player controls (pause, speed, seek, next) into adapter calls.
///
/// Pure state updates (ShowMessage) are already handled by
/// `AppState::apply_event`.
pub struct UiHandler;

impl UiHandler {
    pub fn handle(&self, event: &UiEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            UiEvent::CycleModeRequested => {
                let mode = ctx.engine.cycle();
                // A failed save leaves its error on screen instead of the mode message.
                if ctx.persist_mode(mode) {
                    ctx.event_tx.send(AppEvent::Ui(UiEvent::ShowMessage {
                        message: format!("Mode: {}", mode.description()),
                    }))?;
                }
            }

            UiEvent::TogglePauseRequested => {
                if let Some(player) = ctx.player.as_mut() {
                    if player.is_paused() {
                        player.resume();
                        ctx.event_tx.send(AppEvent::Player(PlayerEvent::Resumed))?;
                    } else {
                        player.pause();
                        ctx.event_tx.send(AppEvent::Player(PlayerEvent::Paused))?;
                    }
                }
            }

            UiEvent::SpeedUpRequested | UiEvent::SlowDownRequested => {
                if let Some(player) = ctx.player.as_mut() {
                    let faster = matches!(event, UiEvent::SpeedUpRequested);
                    let rate = step_playback_rate(player.playback_rate(), faster);
                    player.set_playback_rate(rate);
                    ctx.event_tx
                        .send(AppEvent::Player(PlayerEvent::RateChanged { rate }))?;
                }
            }

            UiEvent::SeekRequested { seconds } => {
                if let Some(player) = ctx.player.as_mut() {
                    player.seek_by(*seconds);
                }
            }

            UiEvent::NextContentRequested => {
                if let Some(player) = ctx.player.as_mut() {
                    if let Some(content_id) = player.next_content() {
                        let content_id = Some(content_id.to_string());
                        ctx.event_tx
                            .send(AppEvent::Player(PlayerEvent::ContentChanged { content_id }))?;
                    }
                }
            }

            UiEvent::QuitRequested => {
                ctx.event_tx.send(AppEvent::Shutdown)?;
            }

            _ => {}
        }

        Ok(())
    }
}
