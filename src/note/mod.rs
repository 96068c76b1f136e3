//! Note Model
//!
//! A single musical event: a sounding note or a rest, with a duration in
//! seconds and a flag marking the start or end of a repeated section.

pub mod accidental;
pub mod frequency;
pub mod pitch;

pub use accidental::Accidental;
pub use frequency::{frequency_hz, semitones_from_a4, A4_HZ};
pub use pitch::Pitch;

use crate::sink::{AudioSink, RenderRequest};
use crate::{MelodyError, Result};
use std::fmt;

/// One note or rest.
///
/// Rests still carry an octave ([`Note::REST_OCTAVE`]) and an accidental
/// (natural) so that printing and comparison stay well defined; both are
/// ignored when the note is played.
#[derive(Clone, Copy, Debug)]
pub struct Note {
    /// Duration in seconds
    duration: f64,
    /// Letter pitch, or `R` for a rest
    pitch: Pitch,
    /// Octave from `OCTAVE_MIN` through `OCTAVE_MAX`
    octave: i32,
    /// Sharp, natural or flat
    accidental: Accidental,
    /// Starts or ends a repeated section
    repeat: bool,
}

impl Note {
    /// Lowest legal octave.
    pub const OCTAVE_MIN: i32 = 1;

    /// Highest legal octave.
    pub const OCTAVE_MAX: i32 = 10;

    /// Octave stored on rests.
    pub const REST_OCTAVE: i32 = Self::OCTAVE_MIN + 1;

    /// Create a note.
    ///
    /// `pitch` and `accidental` accept either a value or an `Option`; `None`
    /// fails with [`MelodyError::NullArgument`]. A negative or non-finite
    /// duration, or an octave outside `OCTAVE_MIN..=OCTAVE_MAX` fails with
    /// [`MelodyError::InvalidArgument`]. Passing [`Pitch::R`] builds a rest.
    pub fn new(
        duration: f64,
        pitch: impl Into<Option<Pitch>>,
        octave: i32,
        accidental: impl Into<Option<Accidental>>,
        repeat: bool,
    ) -> Result<Self> {
        let pitch = pitch.into().ok_or(MelodyError::NullArgument("pitch"))?;
        let accidental = accidental
            .into()
            .ok_or(MelodyError::NullArgument("accidental"))?;
        check_duration(duration)?;
        check_octave(octave)?;

        let mut note = Note {
            duration,
            pitch,
            octave,
            accidental,
            repeat,
        };
        if pitch.is_rest() {
            note.reset_rest_fields();
        }
        Ok(note)
    }

    /// Create a rest of the given duration.
    pub fn rest(duration: f64, repeat: bool) -> Result<Self> {
        Self::new(
            duration,
            Pitch::R,
            Self::REST_OCTAVE,
            Accidental::Natural,
            repeat,
        )
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Letter pitch (`R` for rests).
    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// Octave; always [`Note::REST_OCTAVE`] for rests.
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Accidental; always natural for rests.
    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// True if this note starts or ends a repeated section.
    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    /// True if this note is a rest.
    pub fn is_rest(&self) -> bool {
        self.pitch.is_rest()
    }

    /// Set the duration in seconds. Negative or non-finite durations are
    /// rejected and the previous value is kept.
    pub fn set_duration(&mut self, duration: f64) -> Result<()> {
        check_duration(duration)?;
        self.duration = duration;
        Ok(())
    }

    /// Set the octave. Out-of-range values are rejected; on a rest the value
    /// is validated and then ignored.
    pub fn set_octave(&mut self, octave: i32) -> Result<()> {
        check_octave(octave)?;
        if !self.is_rest() {
            self.octave = octave;
        }
        Ok(())
    }

    /// Set the accidental. `None` is rejected; on a rest this is a no-op.
    pub fn set_accidental(&mut self, accidental: impl Into<Option<Accidental>>) -> Result<()> {
        let accidental = accidental
            .into()
            .ok_or(MelodyError::NullArgument("accidental"))?;
        if !self.is_rest() {
            self.accidental = accidental;
        }
        Ok(())
    }

    /// Set the pitch. `None` is rejected. Turning a note into a rest resets
    /// its octave and accidental to the rest defaults.
    pub fn set_pitch(&mut self, pitch: impl Into<Option<Pitch>>) -> Result<()> {
        let pitch = pitch.into().ok_or(MelodyError::NullArgument("pitch"))?;
        self.pitch = pitch;
        if pitch.is_rest() {
            self.reset_rest_fields();
        }
        Ok(())
    }

    /// Mark or unmark this note as a repeat boundary.
    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    /// Sounding frequency in Hz, `None` for rests.
    pub fn frequency_hz(&self) -> Option<f64> {
        frequency_hz(self.pitch, self.octave, self.accidental)
    }

    /// Describe this note as a sink request at the given amplitude.
    ///
    /// Rests become silence of the same duration.
    pub fn render_request(&self, amplitude: f64) -> RenderRequest {
        match self.frequency_hz() {
            Some(hz) => RenderRequest::tone(hz, self.duration, amplitude),
            None => RenderRequest::silence(self.duration),
        }
    }

    /// Render this note through a sink.
    pub fn render<S: AudioSink + ?Sized>(&self, sink: &mut S, amplitude: f64) -> Result<()> {
        if self.is_rest() {
            tracing::debug!("playing {} R", format_seconds(self.duration));
        } else {
            tracing::debug!(
                "playing {} {} {} {}",
                format_seconds(self.duration),
                self.pitch,
                self.octave,
                self.accidental
            );
        }
        sink.render(&self.render_request(amplitude))
    }

    fn reset_rest_fields(&mut self) {
        self.octave = Self::REST_OCTAVE;
        self.accidental = Accidental::Natural;
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        if self.is_rest() && other.is_rest() {
            self.duration == other.duration && self.repeat == other.repeat
        } else {
            self.duration == other.duration
                && self.pitch == other.pitch
                && self.octave == other.octave
                && self.accidental == other.accidental
                && self.repeat == other.repeat
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duration = format_seconds(self.duration);
        if self.is_rest() {
            write!(f, "{} {} {}", duration, self.pitch, self.repeat)
        } else {
            write!(
                f,
                "{} {} {} {} {}",
                duration, self.pitch, self.octave, self.accidental, self.repeat
            )
        }
    }
}

fn check_duration(duration: f64) -> Result<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(MelodyError::InvalidArgument(format!(
            "Illegal duration value: {}",
            duration
        )));
    }
    Ok(())
}

fn check_octave(octave: i32) -> Result<()> {
    if !(Note::OCTAVE_MIN..=Note::OCTAVE_MAX).contains(&octave) {
        return Err(MelodyError::InvalidArgument(format!(
            "Illegal octave value: {}",
            octave
        )));
    }
    Ok(())
}

/// Format seconds the way the score text form expects: integral values keep
/// a trailing `.0` (`6.0`, not `6`).
pub fn format_seconds(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e7 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;
    use approx::assert_relative_eq;

    fn note(duration: f64, pitch: Pitch, octave: i32, accidental: Accidental) -> Note {
        Note::new(duration, pitch, octave, accidental, false).unwrap()
    }

    #[test]
    fn test_octave_range() {
        let mut n = note(0.5, Pitch::C, 4, Accidental::Natural);
        for octave in Note::OCTAVE_MIN..=Note::OCTAVE_MAX {
            n.set_octave(octave).unwrap();
            assert_eq!(n.octave(), octave);
        }
        assert!(matches!(n.set_octave(0), Err(MelodyError::InvalidArgument(_))));
        assert!(matches!(n.set_octave(11), Err(MelodyError::InvalidArgument(_))));
        assert_eq!(n.octave(), Note::OCTAVE_MAX);

        assert!(Note::new(0.5, Pitch::C, 0, Accidental::Natural, false).is_err());
        assert!(Note::new(0.5, Pitch::C, 11, Accidental::Natural, false).is_err());
    }

    #[test]
    fn test_negative_or_infinite_duration_rejected() {
        let mut n = note(0.5, Pitch::D, 4, Accidental::Flat);
        assert!(matches!(n.set_duration(-0.1), Err(MelodyError::InvalidArgument(_))));
        assert!(n.set_duration(f64::NAN).is_err());
        assert!(n.set_duration(f64::INFINITY).is_err());
        assert_eq!(n.duration(), 0.5);
        n.set_duration(0.0).unwrap();
        assert_eq!(n.duration(), 0.0);

        assert!(Note::new(-1.0, Pitch::D, 4, Accidental::Flat, false).is_err());
        assert!(Note::rest(-1.0, false).is_err());
        assert!(Note::rest(f64::INFINITY, false).is_err());
    }

    #[test]
    fn test_absent_values_rejected() {
        let missing_pitch = Note::new(0.5, None, 4, Accidental::Natural, false);
        assert!(matches!(missing_pitch, Err(MelodyError::NullArgument("pitch"))));

        let missing_accidental = Note::new(0.5, Pitch::E, 4, None, false);
        assert!(matches!(
            missing_accidental,
            Err(MelodyError::NullArgument("accidental"))
        ));

        let mut n = note(0.5, Pitch::E, 4, Accidental::Natural);
        assert!(n.set_pitch(None).is_err());
        assert!(n.set_accidental(None).is_err());
        assert_eq!(n.pitch(), Pitch::E);
        assert_eq!(n.accidental(), Accidental::Natural);
    }

    #[test]
    fn test_rest_defaults() {
        let mut r = Note::rest(1.5, true).unwrap();
        assert!(r.is_rest());
        assert!(r.is_repeat());
        assert_eq!(r.octave(), Note::REST_OCTAVE);
        assert_eq!(r.accidental(), Accidental::Natural);

        // Validated, then ignored
        r.set_octave(7).unwrap();
        assert_eq!(r.octave(), Note::REST_OCTAVE);
        assert!(r.set_octave(42).is_err());
        r.set_accidental(Accidental::Sharp).unwrap();
        assert_eq!(r.accidental(), Accidental::Natural);

        assert_eq!(r.frequency_hz(), None);
    }

    #[test]
    fn test_pitch_r_builds_rest() {
        let r = Note::new(0.25, Pitch::R, 9, Accidental::Flat, false).unwrap();
        assert_eq!(r, Note::rest(0.25, false).unwrap());
        assert_eq!(r.octave(), Note::REST_OCTAVE);
        assert_eq!(r.accidental(), Accidental::Natural);
    }

    #[test]
    fn test_set_pitch_to_rest_resets_fields() {
        let mut n = note(0.5, Pitch::G, 6, Accidental::Sharp);
        n.set_pitch(Pitch::R).unwrap();
        assert!(n.is_rest());
        assert_eq!(n.octave(), Note::REST_OCTAVE);
        assert_eq!(n.accidental(), Accidental::Natural);

        n.set_pitch(Pitch::A).unwrap();
        assert!(!n.is_rest());
        assert_eq!(n.frequency_hz(), Some(110.0));
    }

    #[test]
    fn test_equality() {
        let a = note(0.5, Pitch::C, 4, Accidental::Natural);
        assert_eq!(a, note(0.5, Pitch::C, 4, Accidental::Natural));
        assert_ne!(a, note(0.5, Pitch::C, 5, Accidental::Natural));
        assert_ne!(a, note(0.5, Pitch::C, 4, Accidental::Sharp));
        assert_ne!(a, note(0.25, Pitch::C, 4, Accidental::Natural));
        assert_ne!(a, Note::new(0.5, Pitch::C, 4, Accidental::Natural, true).unwrap());
        assert_ne!(a, Note::rest(0.5, false).unwrap());

        assert_eq!(Note::rest(0.5, true).unwrap(), Note::rest(0.5, true).unwrap());
        assert_ne!(Note::rest(0.5, true).unwrap(), Note::rest(0.5, false).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            note(0.4, Pitch::C, 5, Accidental::Natural).to_string(),
            "0.4 C 5 NATURAL false"
        );
        assert_eq!(
            Note::new(1.0, Pitch::D, 4, Accidental::Sharp, true)
                .unwrap()
                .to_string(),
            "1.0 D 4 SHARP true"
        );
        assert_eq!(Note::rest(0.5, false).unwrap().to_string(), "0.5 R false");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(6.0), "6.0");
        assert_eq!(format_seconds(0.5), "0.5");
        assert_eq!(format_seconds(25.2), "25.2");
        assert_eq!(format_seconds(0.0), "0.0");
    }

    #[test]
    fn test_frequency() {
        assert_eq!(note(1.0, Pitch::A, 4, Accidental::Natural).frequency_hz(), Some(440.0));
        let middle_c = note(1.0, Pitch::C, 4, Accidental::Natural)
            .frequency_hz()
            .unwrap();
        assert_relative_eq!(middle_c, 261.63, max_relative = 0.01);
    }

    #[test]
    fn test_render_requests() {
        let tone = note(0.5, Pitch::A, 4, Accidental::Natural).render_request(0.5);
        assert_eq!(tone.frequency_hz, Some(440.0));
        assert_eq!(tone.duration, 0.5);
        assert_eq!(tone.amplitude, 0.5);

        let silence = Note::rest(0.25, false).unwrap().render_request(0.5);
        assert_eq!(silence.frequency_hz, None);
        assert_eq!(silence.duration, 0.25);
    }

    #[test]
    fn test_render_into_sink() {
        let mut sink = BufferSink::new(1000);
        note(0.01, Pitch::A, 4, Accidental::Natural)
            .render(&mut sink, 0.5)
            .unwrap();
        Note::rest(0.01, false).unwrap().render(&mut sink, 0.5).unwrap();

        assert_eq!(sink.requests().len(), 2);
        // 10 samples + 1 per request
        assert_eq!(sink.samples().len(), 22);
        assert!(sink.samples()[11..].iter().all(|&s| s == 0.0));
    }
}
