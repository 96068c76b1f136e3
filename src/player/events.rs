//! Playback events and listeners

use crate::note::{format_seconds, Note};
use std::fmt;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioEventKind {
    /// A note was rendered (or skipped while muted)
    Play,
    /// A closed repeat region starts its second pass
    Loop,
    /// Transport paused
    Pause,
    /// Transport resumed
    Unpause,
    /// Playback stopped
    Stop,
    /// Output muted
    Mute,
    /// Output unmuted
    Unmute,
}

impl AudioEventKind {
    /// Upper-case event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEventKind::Play => "PLAY",
            AudioEventKind::Loop => "LOOP",
            AudioEventKind::Pause => "PAUSE",
            AudioEventKind::Unpause => "UNPAUSE",
            AudioEventKind::Stop => "STOP",
            AudioEventKind::Mute => "MUTE",
            AudioEventKind::Unmute => "UNMUTE",
        }
    }
}

impl fmt::Display for AudioEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    /// Event type
    pub kind: AudioEventKind,
    /// Note involved, for `Play`
    pub note: Option<Note>,
    /// Seconds of playback the event accounts for
    pub duration: f64,
}

impl AudioEvent {
    /// Event without a note or duration.
    pub fn new(kind: AudioEventKind) -> Self {
        AudioEvent {
            kind,
            note: None,
            duration: 0.0,
        }
    }

    /// `Play` event for a note.
    pub fn play(note: &Note) -> Self {
        AudioEvent {
            kind: AudioEventKind::Play,
            note: Some(*note),
            duration: note.duration(),
        }
    }
}

impl fmt::Display for AudioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioEvent{{Type={}", self.kind)?;
        if let Some(note) = &self.note {
            write!(f, ", note={}", note)?;
        }
        if self.duration != 0.0 {
            write!(f, ", duration={}", format_seconds(self.duration))?;
        }
        f.write_str("}")
    }
}

/// Receives transport and playback events.
///
/// Called on whichever thread raised the event, so implementations must be
/// cheap and must not block.
pub trait AudioEventListener: Send + Sync {
    /// Handle one event.
    fn on_audio_event(&self, event: &AudioEvent);
}

impl<F> AudioEventListener for F
where
    F: Fn(&AudioEvent) + Send + Sync,
{
    fn on_audio_event(&self, event: &AudioEvent) {
        self(event)
    }
}
