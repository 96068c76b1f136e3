//! Repeat-section sequencing
//!
//! A repeat marker toggles a region open or closed. Notes inside an open
//! region are collected; when the closing marker is reached the whole region,
//! both markers included, is played again. A region still open at the end of
//! the score is never replayed.

use crate::note::Note;
use std::mem;

/// Whether the walk is currently inside a repeated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Idle,
    InRepeat,
}

/// One note in playback order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackStep<'a> {
    /// Note to render
    pub note: &'a Note,
    /// True when this is the second pass over a repeated region
    pub replay: bool,
}

/// Iterator over a score's notes in the order they are heard.
#[derive(Debug, Clone)]
pub struct PlaybackOrder<'a> {
    notes: &'a [Note],
    next: usize,
    section: Section,
    pending: Vec<&'a Note>,
    replay: std::vec::IntoIter<&'a Note>,
}

impl<'a> PlaybackOrder<'a> {
    pub(crate) fn new(notes: &'a [Note]) -> Self {
        PlaybackOrder {
            notes,
            next: 0,
            section: Section::Idle,
            pending: Vec::new(),
            replay: Vec::new().into_iter(),
        }
    }

    /// Notes of a region that has been opened but not yet closed.
    pub fn pending(&self) -> &[&'a Note] {
        &self.pending
    }

    /// True while inside an open repeat region.
    pub fn in_repeat(&self) -> bool {
        self.section == Section::InRepeat
    }
}

impl<'a> Iterator for PlaybackOrder<'a> {
    type Item = PlaybackStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(note) = self.replay.next() {
            return Some(PlaybackStep { note, replay: true });
        }

        let note = self.notes.get(self.next)?;
        self.next += 1;

        match (note.is_repeat(), self.section) {
            (true, Section::Idle) => {
                self.pending.push(note);
                self.section = Section::InRepeat;
            }
            (true, Section::InRepeat) => {
                self.pending.push(note);
                self.replay = mem::take(&mut self.pending).into_iter();
                self.section = Section::Idle;
            }
            (false, Section::InRepeat) => self.pending.push(note),
            (false, Section::Idle) => {}
        }

        Some(PlaybackStep {
            note,
            replay: false,
        })
    }
}
