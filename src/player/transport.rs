//! Shared transport state: pause, mute, stop
//!
//! One `Transport` is shared (behind an `Arc`) between the thread that
//! plays and whoever controls playback. The player consults it before every
//! note; a paused transport parks the player on a condition variable until
//! it is resumed or stopped.

use super::events::{AudioEvent, AudioEventKind, AudioEventListener};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Playback state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is playing
    #[default]
    Stopped,
    /// A score is being played
    Playing,
    /// A score is being played but is parked
    Paused,
}

/// Handle returned by [`Transport::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// What the player should do with the next note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    Render,
    Skip,
    Stop,
}

#[derive(Debug, Default)]
struct Flags {
    paused: bool,
    muted: bool,
    stopped: bool,
    playing: bool,
}

/// Pause/mute/stop switches plus the listener list.
pub struct Transport {
    flags: Mutex<Flags>,
    changed: Condvar,
    listeners: Mutex<Vec<(ListenerId, Arc<dyn AudioEventListener>)>>,
    next_listener: AtomicU64,
}

impl Transport {
    /// New transport: not paused, not muted, not stopped.
    pub fn new() -> Self {
        Transport {
            flags: Mutex::new(Flags::default()),
            changed: Condvar::new(),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Pause or resume. A paused player blocks before its next note.
    pub fn set_paused(&self, paused: bool) {
        self.flags.lock().paused = paused;
        self.changed.notify_all();
        self.notify(&AudioEvent::new(if paused {
            AudioEventKind::Pause
        } else {
            AudioEventKind::Unpause
        }));
    }

    /// Mute or unmute. Muted notes are skipped immediately but still
    /// reported to listeners.
    pub fn set_muted(&self, muted: bool) {
        self.flags.lock().muted = muted;
        self.changed.notify_all();
        self.notify(&AudioEvent::new(if muted {
            AudioEventKind::Mute
        } else {
            AudioEventKind::Unmute
        }));
    }

    /// Abort playback before the next note. Also releases a paused player.
    ///
    /// Stays in effect until [`Transport::reset`].
    pub fn stop(&self) {
        {
            let mut flags = self.flags.lock();
            flags.stopped = true;
            flags.paused = false;
        }
        self.changed.notify_all();
        self.notify(&AudioEvent::new(AudioEventKind::Stop));
    }

    /// Clear the pause, mute and stop switches.
    pub fn reset(&self) {
        {
            let mut flags = self.flags.lock();
            flags.paused = false;
            flags.muted = false;
            flags.stopped = false;
        }
        self.changed.notify_all();
    }

    /// True while paused
    pub fn is_paused(&self) -> bool {
        self.flags.lock().paused
    }

    /// True while muted
    pub fn is_muted(&self) -> bool {
        self.flags.lock().muted
    }

    /// True once stopped, until reset
    pub fn is_stopped(&self) -> bool {
        self.flags.lock().stopped
    }

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        let flags = self.flags.lock();
        match (flags.playing, flags.paused) {
            (false, _) => PlaybackState::Stopped,
            (true, false) => PlaybackState::Playing,
            (true, true) => PlaybackState::Paused,
        }
    }

    pub(crate) fn set_playing(&self, playing: bool) {
        self.flags.lock().playing = playing;
    }

    /// Block while paused, then report what to do with the next note.
    ///
    /// Stop wins over mute, and mute wins over pause.
    pub(crate) fn wait_gate(&self) -> Gate {
        let mut flags = self.flags.lock();
        loop {
            if flags.stopped {
                return Gate::Stop;
            }
            if flags.muted {
                return Gate::Skip;
            }
            if !flags.paused {
                return Gate::Render;
            }
            self.changed.wait(&mut flags);
        }
    }

    /// Register a listener.
    pub fn add_listener(&self, listener: Arc<dyn AudioEventListener>) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Unregister every listener.
    pub fn clear_listeners(&self) {
        self.listeners.lock().clear();
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Deliver an event to every listener.
    pub fn notify(&self, event: &AudioEvent) {
        // Listeners may call back into the transport
        let listeners: Vec<Arc<dyn AudioEventListener>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_audio_event(event);
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
