//! Note line grammar
//!
//! ```text
//! <duration> <pitch> <octave> <accidental> <repeat>   sounding note
//! <duration> <ignored> <repeat>                       rest
//! ```

use crate::note::{Accidental, Note, Pitch};
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_till1},
    character::complete::{space0, space1},
    combinator::{all_consuming, value},
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Split a line into whitespace-separated fields.
fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(delimited(
        space0,
        separated_list1(space1, take_till1(|c: char| c.is_whitespace())),
        space0,
    ))(input)
}

/// Run `parser` over a whole field.
fn whole<'a, O>(
    field: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Option<O> {
    all_consuming(parser)(field).ok().map(|(_, out)| out)
}

fn boolean(input: &str) -> IResult<&str, bool> {
    alt((
        value(true, tag_no_case("true")),
        value(false, tag_no_case("false")),
    ))(input)
}

fn duration(field: &str) -> Result<f64, String> {
    whole(field, double)
        .filter(|d| d.is_finite())
        .ok_or_else(|| format!("invalid duration '{}'", field))
}

fn octave(field: &str) -> Result<i32, String> {
    whole(field, nom::character::complete::i32).ok_or_else(|| format!("invalid octave '{}'", field))
}

fn repeat_flag(field: &str) -> Result<bool, String> {
    whole(field, boolean).ok_or_else(|| format!("invalid repeat flag '{}'", field))
}

fn pitch(field: &str) -> Result<Pitch, String> {
    Pitch::from_name(field).ok_or_else(|| format!("unknown pitch '{}'", field))
}

fn accidental(field: &str) -> Result<Accidental, String> {
    Accidental::from_name(field).ok_or_else(|| format!("unknown accidental '{}'", field))
}

/// Parse one non-empty note line.
pub(crate) fn parse_note_line(line: &str) -> Result<Note, String> {
    let (_, parts) = fields(line).map_err(|_| format!("unreadable note line '{}'", line))?;

    let note = match parts.as_slice() {
        [dur, _, repeat] => Note::rest(duration(dur)?, repeat_flag(repeat)?),
        [dur, p, oct, acc, repeat] => Note::new(
            duration(dur)?,
            pitch(p)?,
            octave(oct)?,
            accidental(acc)?,
            repeat_flag(repeat)?,
        ),
        other => {
            return Err(format!(
                "expected 3 or 5 fields, found {}",
                other.len()
            ))
        }
    };

    note.map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_note() {
        let note = parse_note_line("0.4 C 5 NATURAL false").unwrap();
        assert_eq!(
            note,
            Note::new(0.4, Pitch::C, 5, Accidental::Natural, false).unwrap()
        );
    }

    #[test]
    fn test_rest_discards_middle_field() {
        let rest = parse_note_line("0.5 R true").unwrap();
        assert_eq!(rest, Note::rest(0.5, true).unwrap());

        let odd = parse_note_line("0.5 whatever false").unwrap();
        assert!(odd.is_rest());
        assert!(!odd.is_repeat());
    }

    #[test]
    fn test_whitespace_tolerance() {
        let note = parse_note_line("  1.5\tD  4 SHARP   TRUE ").unwrap();
        assert_eq!(note.duration(), 1.5);
        assert_eq!(note.accidental(), Accidental::Sharp);
        assert!(note.is_repeat());
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(parse_note_line("1 A 4 NATURAL false").unwrap().duration(), 1.0);
        assert_eq!(parse_note_line(".25 A 4 NATURAL false").unwrap().duration(), 0.25);
        assert_eq!(parse_note_line("2.5e-1 R false").unwrap().duration(), 0.25);
    }

    #[test]
    fn test_malformed_fields() {
        assert!(parse_note_line("abc C 4 NATURAL false").unwrap_err().contains("duration"));
        assert!(parse_note_line("0.5 C four NATURAL false").unwrap_err().contains("octave"));
        assert!(parse_note_line("0.5 C 4.5 NATURAL false").unwrap_err().contains("octave"));
        assert!(parse_note_line("0.5 C 4 NATURAL yes").unwrap_err().contains("repeat"));
        assert!(parse_note_line("0.5 R maybe").unwrap_err().contains("repeat"));
        assert!(parse_note_line("inf R false").unwrap_err().contains("duration"));
        assert!(parse_note_line("NaN R false").unwrap_err().contains("duration"));
    }

    #[test]
    fn test_unknown_names() {
        assert!(parse_note_line("0.5 H 4 NATURAL false").unwrap_err().contains("pitch"));
        assert!(parse_note_line("0.5 c 4 NATURAL false").unwrap_err().contains("pitch"));
        assert!(parse_note_line("0.5 C 4 natural false").unwrap_err().contains("accidental"));
    }

    #[test]
    fn test_invalid_note_values() {
        assert!(parse_note_line("-0.5 C 4 NATURAL false").unwrap_err().contains("duration"));
        assert!(parse_note_line("0.5 C 11 NATURAL false").unwrap_err().contains("octave"));
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(parse_note_line("0.5").unwrap_err().contains("found 1"));
        assert!(parse_note_line("0.5 C 4 false").unwrap_err().contains("found 4"));
        assert!(parse_note_line("0.5 C 4 NATURAL false extra").unwrap_err().contains("found 6"));
    }
}
