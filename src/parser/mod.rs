//! Text Score Parser
//!
//! Format details:
//! - Line 1: title
//! - Line 2: artist
//! - Line 3: number of notes N
//! - Then N note lines (blank lines are skipped), see [`line`]
//!
//! Any malformed line aborts the whole parse; no partial score is returned.

mod line;

use crate::score::Score;
use crate::{MelodyError, Result};
use std::str::FromStr;

/// Parse a complete score.
pub fn parse_score(source: &str) -> Result<Score> {
    let mut lines = source.lines().enumerate().map(|(i, text)| (i + 1, text));

    let title = header_line(lines.next(), 1, "title")?;
    let artist = header_line(lines.next(), 2, "artist")?;

    let count_text = header_line(lines.next(), 3, "note count")?;
    let declared: usize = count_text.trim().parse().map_err(|_| {
        MelodyError::parse(3, format!("invalid note count '{}'", count_text.trim()))
    })?;

    let mut notes = Vec::new();
    for (line_no, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        if notes.len() == declared {
            return Err(MelodyError::parse(
                line_no,
                format!("more notes than the declared count of {}", declared),
            ));
        }
        let note = line::parse_note_line(text).map_err(|msg| MelodyError::parse(line_no, msg))?;
        notes.push(note);
    }

    if notes.len() != declared {
        return Err(MelodyError::parse(
            3,
            format!("declared {} notes but found {}", declared, notes.len()),
        ));
    }

    let score = Score::new(title, artist, notes);
    tracing::info!(
        title = score.title(),
        artist = score.artist(),
        notes = score.len(),
        "parsed score"
    );
    Ok(score)
}

fn header_line<'a>(line: Option<(usize, &'a str)>, number: usize, what: &str) -> Result<&'a str> {
    line.map(|(_, text)| text)
        .ok_or_else(|| MelodyError::parse(number, format!("missing {}", what)))
}

impl FromStr for Score {
    type Err = MelodyError;

    fn from_str(source: &str) -> Result<Self> {
        parse_score(source)
    }
}
