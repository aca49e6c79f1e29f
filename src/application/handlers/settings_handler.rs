use crate::application::handlers::HandlerContext;
use crate::core::events::SettingsEvent;
use anyhow::Result;

/// Applies settings changed outside this process.
///
/// Responsible for:
/// - Replacing the engine's options and adopting a stored mode.
/// - Persisting the fallback mode when the stored one is no longer allowed.
/// - Starting or dropping the segment load when segment adjustment is toggled.
pub struct SettingsHandler;

impl SettingsHandler {
    pub fn handle(&self, event: &SettingsEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            SettingsEvent::Changed { settings } => {
                let was_adjusting = ctx.engine.options().segment_adjust;

                if let Some(mode) = ctx.engine.apply_settings(settings) {
                    ctx.persist_mode(mode);
                }

                let adjusting = ctx.engine.options().segment_adjust;
                if adjusting != was_adjusting {
                    let content_id = ctx.player_content_id();
                    ctx.start_segment_load(content_id.as_deref());
                }
            }
        }

        Ok(())
    }
}
