//! Melody: a monophonic text-score player
//!
//! Parses line-oriented text scores into a sequence of notes and rests, applies
//! non-destructive transformations (octave shift, tempo scaling, reversal), and
//! renders the sequence to audio by sine synthesis.
//!
//! # Features
//! - Pitch/octave/accidental to frequency mapping (A4 = 440 Hz, 12-TET)
//! - Toggle-style repeat sections, replayed when the closing marker is reached
//! - Offline rendering to memory or to a 16-bit WAV file
//! - Pause, mute and stop through a shared [`Transport`]
//! - Optional real-time playback on the default output device
//!
//! # Crate feature flags
//! - `streaming` (opt-in): Real-time audio output (enables optional `rodio` dep)
//!
//! # Quick start
//! ## Parse and inspect a score
//! ```
//! use melody::parse_score;
//! let source = "Scale\nNobody\n3\n0.5 C 4 NATURAL true\n0.5 D 4 NATURAL false\n0.5 E 4 FLAT true\n";
//! let score = parse_score(source).unwrap();
//! assert_eq!(score.len(), 3);
//! assert_eq!(score.total_duration(), 3.0);
//! ```
//!
//! ## Render to a WAV file
//! ```no_run
//! use melody::{load_file, render_score, PlayerConfig, WavSink};
//! let score = load_file("song.txt").unwrap();
//! let config = PlayerConfig::default();
//! let mut sink = WavSink::create("song.wav", &config).unwrap();
//! render_score(&score, &mut sink, config.amplitude).unwrap();
//! ```
//!
//! ## Play on a worker thread
//! ```no_run
//! use std::sync::Arc;
//! use melody::{load_file, spawn_playback, BufferSink, PlayerConfig, Transport};
//! let score = load_file("song.txt").unwrap();
//! let transport = Arc::new(Transport::new());
//! let config = PlayerConfig::default();
//! let handle = spawn_playback(&score, config, transport, move || Ok(BufferSink::new(config.sample_rate))).unwrap();
//! handle.transport().set_paused(true);
//! handle.transport().set_paused(false);
//! let outcome = handle.join().unwrap();
//! ```

#![warn(missing_docs)]

pub mod config; // Player configuration
pub mod loader; // Score file I/O
pub mod note; // Pitch, accidental and single note model
pub mod parser; // Text score format parsing
pub mod player; // Playback orchestration, transport and events
pub mod score; // Note sequence and aggregate operations
pub mod sink; // Audio sinks (memory, WAV, device)
pub mod synth; // Sine tone synthesis

/// Error types for score loading, editing and playback
#[derive(thiserror::Error, Debug)]
pub enum MelodyError {
    /// Malformed score source
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// A value outside its legal range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required value was absent
    #[error("Missing required value: {0}")]
    NullArgument(&'static str),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    AudioFileError(String),

    /// Audio device error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl MelodyError {
    /// Build a parse error for the given 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        MelodyError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<String> for MelodyError {
    /// Converts a String into `MelodyError::Other`.
    ///
    /// Prefer the specific variants (`Parse`, `InvalidArgument`, `ConfigError`, ...)
    /// where the failure has a known category.
    fn from(msg: String) -> Self {
        MelodyError::Other(msg)
    }
}

impl From<&str> for MelodyError {
    /// Converts a string slice into `MelodyError::Other`.
    fn from(msg: &str) -> Self {
        MelodyError::Other(msg.to_string())
    }
}

/// Result type for melody operations
pub type Result<T> = std::result::Result<T, MelodyError>;

// Public API exports
pub use config::PlayerConfig;
pub use loader::load_file;
pub use note::{Accidental, Note, Pitch};
pub use parser::parse_score;
pub use player::{
    render_score, spawn_playback, AudioEvent, AudioEventKind, AudioEventListener, ElapsedTracker,
    ListenerId, PlaybackHandle, PlaybackOutcome, PlaybackState, ScorePlayer, Transport,
};
pub use score::{PlaybackOrder, PlaybackStep, Score};
#[cfg(feature = "streaming")]
pub use sink::DeviceSink;
pub use sink::{AudioSink, BufferSink, RenderRequest, WavSink};
pub use synth::DEFAULT_SAMPLE_RATE;
