//! Accidentals: sharp, natural, flat

use std::fmt;

/// Musical accidental applied to a pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    /// Raise by one semitone
    Sharp,
    /// No alteration
    #[default]
    Natural,
    /// Lower by one semitone
    Flat,
}

impl Accidental {
    /// Every accidental, in declaration order.
    pub const ALL: [Accidental; 3] = [Accidental::Sharp, Accidental::Natural, Accidental::Flat];

    /// Decode from the canonical uppercase name (`SHARP`, `NATURAL`, `FLAT`).
    ///
    /// Matching is exact and case-sensitive; anything else yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SHARP" => Some(Accidental::Sharp),
            "NATURAL" => Some(Accidental::Natural),
            "FLAT" => Some(Accidental::Flat),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accidental::Sharp => "SHARP",
            Accidental::Natural => "NATURAL",
            Accidental::Flat => "FLAT",
        }
    }

    /// Semitone adjustment: +1, 0 or -1.
    pub fn semitones(&self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Natural => 0,
            Accidental::Flat => -1,
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for accidental in Accidental::ALL {
            assert_eq!(Accidental::from_name(accidental.as_str()), Some(accidental));
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(Accidental::from_name("sharp"), None);
        assert_eq!(Accidental::from_name("DOUBLE_SHARP"), None);
        assert_eq!(Accidental::from_name(""), None);
    }

    #[test]
    fn test_default_is_natural() {
        assert_eq!(Accidental::default(), Accidental::Natural);
        assert_eq!(Accidental::Natural.semitones(), 0);
    }
}
