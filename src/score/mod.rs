//! Score Model
//!
//! Title, artist and an ordered, fixed-length sequence of notes. All
//! transformations mutate the score in place.

pub mod playback_order;

pub use playback_order::{PlaybackOrder, PlaybackStep};

use crate::note::{format_seconds, Note};
use crate::{MelodyError, Result};
use std::fmt;

/// A parsed song.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    title: String,
    artist: String,
    notes: Vec<Note>,
}

impl Score {
    /// Create a score from its parts.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, notes: Vec<Note>) -> Self {
        Score {
            title: title.into(),
            artist: artist.into(),
            notes,
        }
    }

    /// Song title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Song artist
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Notes in playback order (before repeats are expanded).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Mutable access to individual notes. The sequence length cannot change.
    pub fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if the score has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total duration in seconds with repeated regions counted twice.
    ///
    /// Repeat markers toggle the region; a marker note always counts twice,
    /// as does every note while a region is open.
    pub fn total_duration(&self) -> f64 {
        let mut total = 0.0;
        let mut in_repeat = false;
        for note in &self.notes {
            if note.is_repeat() {
                in_repeat = !in_repeat;
                total += 2.0 * note.duration();
            } else if in_repeat {
                total += 2.0 * note.duration();
            } else {
                total += note.duration();
            }
        }
        total
    }

    /// Notes in the order they are heard, repeated regions expanded.
    pub fn playback_order(&self) -> PlaybackOrder<'_> {
        PlaybackOrder::new(&self.notes)
    }

    /// Raise every sounding note by one octave.
    ///
    /// All or nothing: returns `false` without changing anything if any
    /// sounding note is already at [`Note::OCTAVE_MAX`].
    pub fn octave_up(&mut self) -> bool {
        self.shift_octaves(1)
    }

    /// Lower every sounding note by one octave.
    ///
    /// All or nothing: returns `false` without changing anything if any
    /// sounding note is already at [`Note::OCTAVE_MIN`].
    pub fn octave_down(&mut self) -> bool {
        self.shift_octaves(-1)
    }

    fn shift_octaves(&mut self, delta: i32) -> bool {
        let shifted = self.edit_all(|note| {
            if note.is_rest() {
                return Ok(());
            }
            note.set_octave(note.octave() + delta)
        });
        match shifted {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "octave shift rejected at boundary");
                false
            }
        }
    }

    /// Apply `edit` to a copy of every note and keep the copy only if every
    /// edit succeeded.
    fn edit_all(&mut self, mut edit: impl FnMut(&mut Note) -> Result<()>) -> Result<()> {
        let mut edited = self.notes.clone();
        for note in &mut edited {
            edit(note)?;
        }
        self.notes = edited;
        Ok(())
    }

    /// Multiply every duration (rests included) by `ratio`.
    ///
    /// The ratio must be finite and positive, and every scaled duration must
    /// stay finite; otherwise nothing changes and
    /// [`MelodyError::InvalidArgument`] is returned.
    pub fn change_tempo(&mut self, ratio: f64) -> Result<()> {
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(MelodyError::InvalidArgument(format!(
                "Tempo ratio must be a positive number, got {}",
                ratio
            )));
        }
        self.edit_all(|note| note.set_duration(note.duration() * ratio))
    }

    /// Reverse the note order in place. Repeat markers travel with their notes.
    pub fn reverse(&mut self) {
        self.notes.reverse();
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Artist: {}", self.artist)?;
        writeln!(f, "Total duration: {}", format_seconds(self.total_duration()))?;
        write!(f, "Scientific pitch notation:")?;
        for note in &self.notes {
            write!(f, "\n{}", note)?;
        }
        Ok(())
    }
}
