//! Pitch to frequency conversion
//!
//! 12-tone equal temperament around A4 = 440 Hz. Octave numbers change at C,
//! so A and B of a labelled octave sit above C..G of the same label.

use super::{Accidental, Pitch};

/// Reference pitch A4 in Hz.
pub const A4_HZ: f64 = 440.0;

/// Semitones in one octave.
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Reference octave of [`A4_HZ`].
const REFERENCE_OCTAVE: i32 = 4;

/// Signed semitone distance of a pitch from A4, or `None` for a rest.
pub fn semitones_from_a4(pitch: Pitch, octave: i32, accidental: Accidental) -> Option<i32> {
    // Two steps per letter from A, then pulled back onto the chromatic scale
    // (no black key between B-C and E-F).
    let mut steps = match pitch {
        Pitch::A => 0,
        Pitch::B => 2,
        Pitch::C => 4 - 1,
        Pitch::D => 6 - 1,
        Pitch::E => 8 - 1,
        Pitch::F => 10 - 2,
        Pitch::G => 12 - 2,
        Pitch::R => return None,
    };

    let a_or_b = matches!(pitch, Pitch::A | Pitch::B);

    if octave > REFERENCE_OCTAVE || (octave == REFERENCE_OCTAVE && a_or_b) {
        steps += (octave - REFERENCE_OCTAVE) * SEMITONES_PER_OCTAVE;
    } else {
        steps -= (REFERENCE_OCTAVE - octave) * SEMITONES_PER_OCTAVE;
    }

    // Octaves start at C
    if !a_or_b {
        steps -= SEMITONES_PER_OCTAVE;
    }

    Some(steps + accidental.semitones())
}

/// Convert a semitone distance from A4 to Hz.
pub fn semitones_to_hz(steps: i32) -> f64 {
    A4_HZ * 2f64.powf(steps as f64 / SEMITONES_PER_OCTAVE as f64)
}

/// Frequency in Hz, or `None` for a rest.
pub fn frequency_hz(pitch: Pitch, octave: i32, accidental: Accidental) -> Option<f64> {
    semitones_from_a4(pitch, octave, accidental).map(semitones_to_hz)
}
