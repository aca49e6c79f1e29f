use crate::core::models::Segment;
use crate::core::traits::SegmentSource;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Segment list for one content id, as seen by the label engine.
///
/// `ready` stays false until a fetch for the current content resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentOffsetSnapshot {
    ready: bool,
    segments: Vec<Segment>,
}

impl SegmentOffsetSnapshot {
    pub fn not_ready() -> Self {
        Self::default()
    }

    pub fn ready(segments: Vec<Segment>) -> Self {
        Self {
            ready: true,
            segments,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Skippable time still ahead of `position`: whole segments that start at
    /// or after it, the tail of a segment that straddles it, nothing for
    /// segments already passed.
    pub fn remaining_skipped_duration(&self, position: f64) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.remaining_after(position))
            .sum()
    }

    /// Length of every segment, regardless of position.
    pub fn total_skipped_duration(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

/// Identifies one fetch. Results carrying an older generation are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub content_id: String,
}

/// Tracks the segment snapshot for the content currently playing.
///
/// Loading is two-phase: [`begin`](Self::begin) switches to a new content id
/// and resets the snapshot to not-ready, then [`resolve`](Self::resolve) or
/// [`fail`](Self::fail) deliver the outcome. The snapshot is swapped as a
/// whole, so readers never observe a partial list.
#[derive(Debug, Default)]
pub struct SegmentOffsetProvider {
    generation: u64,
    content_id: Option<String>,
    snapshot: Arc<SegmentOffsetSnapshot>,
}

impl SegmentOffsetProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<SegmentOffsetSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a load for `content_id`, discarding whatever was known before.
    pub fn begin(&mut self, content_id: &str) -> LoadTicket {
        self.generation += 1;
        self.content_id = Some(content_id.to_string());
        self.snapshot = Arc::new(SegmentOffsetSnapshot::not_ready());

        debug!(content_id, generation = self.generation, "Segment load started");

        LoadTicket {
            generation: self.generation,
            content_id: content_id.to_string(),
        }
    }

    /// Forgets the current content. Outstanding fetches become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.content_id = None;
        self.snapshot = Arc::new(SegmentOffsetSnapshot::not_ready());
    }

    /// Installs a fetched list. Returns false if the result was stale.
    pub fn resolve(&mut self, generation: u64, mut segments: Vec<Segment>) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding stale segment list");
            return false;
        }

        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        info!(
            content_id = self.content_id.as_deref().unwrap_or_default(),
            count = segments.len(),
            "Segments loaded"
        );
        self.snapshot = Arc::new(SegmentOffsetSnapshot::ready(segments));
        true
    }

    /// Records a failed fetch. The snapshot stays not-ready for this content;
    /// there is no automatic retry.
    pub fn fail(&mut self, generation: u64, reason: &str) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale segment failure");
            return false;
        }

        warn!(
            content_id = self.content_id.as_deref().unwrap_or_default(),
            "Segment fetch failed: {}", reason
        );
        true
    }

    /// Fetches segments for `content_id` and waits for the outcome.
    pub async fn load(
        &mut self,
        source: &dyn SegmentSource,
        content_id: &str,
    ) -> Arc<SegmentOffsetSnapshot> {
        let ticket = self.begin(content_id);

        match source.fetch(&ticket.content_id).await {
            Ok(segments) => {
                self.resolve(ticket.generation, segments);
            }
            Err(e) => {
                self.fail(ticket.generation, &e.to_string());
            }
        }

        self.snapshot()
    }
}
