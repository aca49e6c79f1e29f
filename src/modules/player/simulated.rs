use crate::core::models::PlaybackSnapshot;
use crate::core::traits::PlayerAdapter;
use std::time::Instant;

/// Clock-driven stand-in for a video player.
///
/// Position advances at `rate` times wall-clock speed while playing and
/// stops at the duration. Several content ids can be queued; moving to the
/// next one restarts from zero. A new player is paused until
/// [`resume`](PlayerAdapter::resume) starts the clock.
pub struct SimulatedPlayer {
    content_ids: Vec<String>,
    current: usize,
    duration: f64,
    rate: f64,
    live: bool,

    // Track playback position
    playback_start: Option<Instant>,
    base_position: f64,
}

impl SimulatedPlayer {
    pub fn new(
        content_ids: Vec<String>,
        duration: f64,
        start_position: f64,
        rate: f64,
        live: bool,
    ) -> Self {
        Self {
            content_ids,
            current: 0,
            duration,
            rate,
            live,
            playback_start: None,
            base_position: start_position.clamp(0.0, duration.max(0.0)),
        }
    }

    /// Position as of `now`
    pub fn position_at(&self, now: Instant) -> f64 {
        match self.playback_start {
            Some(start) => {
                let played = now.saturating_duration_since(start).as_secs_f64() * self.rate;
                (self.base_position + played).min(self.duration)
            }
            None => self.base_position,
        }
    }

    pub fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    /// Folds the time played so far into `base_position` so rate or
    /// position changes only affect playback from now on.
    fn rebase(&mut self, now: Instant) {
        self.base_position = self.position_at(now);
        if self.playback_start.is_some() {
            self.playback_start = Some(now);
        }
    }

    fn seek_to(&mut self, position: f64) {
        let now = Instant::now();
        self.rebase(now);
        self.base_position = position.clamp(0.0, self.duration.max(0.0));
    }
}

impl PlayerAdapter for SimulatedPlayer {
    fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::new(self.duration, self.position(), self.rate)
    }

    fn content_id(&self) -> Option<&str> {
        self.content_ids.get(self.current).map(String::as_str)
    }

    fn is_live(&self) -> bool {
        self.live
    }

    fn is_paused(&self) -> bool {
        self.playback_start.is_none()
    }

    fn pause(&mut self) {
        if self.playback_start.is_some() {
            self.rebase(Instant::now());
            self.playback_start = None;
        }
    }

    fn resume(&mut self) {
        if self.playback_start.is_none() {
            self.playback_start = Some(Instant::now());
        }
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rebase(Instant::now());
        self.rate = rate;
    }

    fn seek_by(&mut self, seconds: f64) {
        let target = self.position() + seconds;
        self.seek_to(target);
    }

    fn next_content(&mut self) -> Option<&str> {
        if self.content_ids.len() < 2 {
            return None;
        }

        self.current = (self.current + 1) % self.content_ids.len();
        self.seek_to(0.0);
        self.content_id()
    }
}
