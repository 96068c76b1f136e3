//! Elapsed playback time

use super::events::{AudioEvent, AudioEventKind, AudioEventListener};
use parking_lot::Mutex;

/// Listener that sums the duration of every played note.
///
/// Muted notes count as played. A `Stop` event leaves the total where it
/// was; call [`ElapsedTracker::reset`] before the next playback.
#[derive(Debug, Default)]
pub struct ElapsedTracker {
    elapsed: Mutex<f64>,
}

impl ElapsedTracker {
    /// Tracker starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds played so far
    pub fn elapsed(&self) -> f64 {
        *self.elapsed.lock()
    }

    /// Back to zero
    pub fn reset(&self) {
        *self.elapsed.lock() = 0.0;
    }
}

impl AudioEventListener for ElapsedTracker {
    fn on_audio_event(&self, event: &AudioEvent) {
        if event.kind == AudioEventKind::Play {
            *self.elapsed.lock() += event.duration;
        }
    }
}
