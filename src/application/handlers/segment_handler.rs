use crate::application::handlers::HandlerContext;
use crate::core::events::SegmentEvent;
use anyhow::Result;

/// Delivers fetch results to the segment provider.
///
/// Results tagged with an outdated generation (the content changed while the
/// request was in flight) are dropped by the provider and leave the view alone.
pub struct SegmentHandler;

impl SegmentHandler {
    pub fn handle(&self, event: &SegmentEvent, ctx: &mut HandlerContext) -> Result<()> {
        match event {
            SegmentEvent::Loaded {
                generation,
                segments,
            } => {
                if ctx.engine.offsets_mut().resolve(*generation, segments.clone()) {
                    ctx.state.ui.segments_ready = true;
                }
            }

            SegmentEvent::Failed {
                generation,
                message,
            } => {
                if ctx.engine.offsets_mut().fail(*generation, message) {
                    let content_id = ctx.engine.offsets().content_id().unwrap_or_default();
                    ctx.state.ui.error_message =
                        Some(format!("Segments unavailable for {}: {}", content_id, message));
                }
            }
        }

        Ok(())
    }
}
