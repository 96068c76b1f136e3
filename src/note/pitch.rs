//! Letter pitches
//!
//! `R` stands for a rest: it has no sounding frequency.

use std::fmt;

/// Musical pitch letter, or `R` for a rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// A
    A,
    /// B
    B,
    /// C
    C,
    /// D
    D,
    /// E
    E,
    /// F
    F,
    /// G
    G,
    /// Rest (no pitch)
    R,
}

impl Pitch {
    /// Every pitch, in declaration order.
    pub const ALL: [Pitch; 8] = [
        Pitch::A,
        Pitch::B,
        Pitch::C,
        Pitch::D,
        Pitch::E,
        Pitch::F,
        Pitch::G,
        Pitch::R,
    ];

    /// Decode from the canonical uppercase name.
    ///
    /// Matching is exact and case-sensitive; anything else yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "A" => Some(Pitch::A),
            "B" => Some(Pitch::B),
            "C" => Some(Pitch::C),
            "D" => Some(Pitch::D),
            "E" => Some(Pitch::E),
            "F" => Some(Pitch::F),
            "G" => Some(Pitch::G),
            "R" => Some(Pitch::R),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pitch::A => "A",
            Pitch::B => "B",
            Pitch::C => "C",
            Pitch::D => "D",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::G => "G",
            Pitch::R => "R",
        }
    }

    /// True for `R`.
    pub fn is_rest(&self) -> bool {
        *self == Pitch::R
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
