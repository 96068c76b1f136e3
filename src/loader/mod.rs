//! Score File Loader
//!
//! Reads score files from disk and hands them to the text parser.

use crate::parser::parse_score;
use crate::score::Score;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;

/// Load and parse a score file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Score> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Failed to read score '{}': {}", path.display(), e),
        )
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read score file");
    parse_score(&source)
}
