//! Command-line argument parsing for the melody player.
//!
//! Transformations are kept in the order they were given and applied to the
//! score one after another.

use std::env;
use std::fmt;

/// One score transformation requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Raise every sounding note by one octave
    OctaveUp,
    /// Lower every sounding note by one octave
    OctaveDown,
    /// Multiply every duration by a ratio
    Tempo(f64),
    /// Reverse note order
    Reverse,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::OctaveUp => f.write_str("octave up"),
            Transform::OctaveDown => f.write_str("octave down"),
            Transform::Tempo(ratio) => write!(f, "tempo x{}", ratio),
            Transform::Reverse => f.write_str("reverse"),
        }
    }
}

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Score file to load
    pub file_path: Option<String>,
    /// Transformations, in command-line order
    pub transforms: Vec<Transform>,
    /// Render the score to this WAV file
    pub wav_path: Option<String>,
    /// Play on the default output device
    pub play: bool,
    /// JSON player configuration
    pub config_path: Option<String>,
    /// Only log warnings and errors
    pub quiet: bool,
    /// Whether help was requested
    pub show_help: bool,
}

impl CliArgs {
    /// Parse arguments from the command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse arguments from any string sequence (program name excluded).
    pub fn parse_from<I>(input: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Self::default();
        let mut iter = input.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--octave-up" => args.transforms.push(Transform::OctaveUp),
                "--octave-down" => args.transforms.push(Transform::OctaveDown),
                "--reverse" => args.transforms.push(Transform::Reverse),
                "--play" => args.play = true,
                "--quiet" | "-q" => args.quiet = true,
                "--help" | "-h" => args.show_help = true,
                "--tempo" => match iter.next() {
                    Some(value) => args.push_tempo(&value),
                    None => {
                        eprintln!("--tempo requires a ratio");
                        args.show_help = true;
                    }
                },
                "--wav" => match iter.next() {
                    Some(value) => args.wav_path = Some(value),
                    None => {
                        eprintln!("--wav requires an output path");
                        args.show_help = true;
                    }
                },
                "--config" => match iter.next() {
                    Some(value) => args.config_path = Some(value),
                    None => {
                        eprintln!("--config requires a JSON file path");
                        args.show_help = true;
                    }
                },
                _ if arg.starts_with("--tempo=") => args.push_tempo(&arg[8..]),
                _ if arg.starts_with("--wav=") => args.wav_path = Some(arg[6..].to_string()),
                _ if arg.starts_with("--config=") => {
                    args.config_path = Some(arg[9..].to_string())
                }
                _ if arg.starts_with('-') => {
                    eprintln!("Unknown flag: {}", arg);
                    args.show_help = true;
                }
                _ => {
                    if args.file_path.is_some() {
                        eprintln!("Only one score file can be given (extra: {})", arg);
                        args.show_help = true;
                    } else {
                        args.file_path = Some(arg);
                    }
                }
            }
        }

        args
    }

    fn push_tempo(&mut self, value: &str) {
        match value.parse::<f64>() {
            Ok(ratio) => self.transforms.push(Transform::Tempo(ratio)),
            Err(_) => {
                eprintln!("Invalid tempo ratio: {}", value);
                self.show_help = true;
            }
        }
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  melody [flags] <score.txt>\n\n\
             Flags:\n\
             \x20 --octave-up          Raise every note by one octave\n\
             \x20 --octave-down        Lower every note by one octave\n\
             \x20 --tempo <ratio>      Multiply every duration by <ratio> (2 = half speed)\n\
             \x20 --reverse            Reverse the note order\n\
             \x20 --wav <out.wav>      Render the score to a 16-bit WAV file\n\
             \x20 --play               Play on the default output device (streaming feature)\n\
             \x20 --config <file>      Load sample rate, amplitude and channels from JSON\n\
             \x20 -q, --quiet          Only log warnings and errors\n\
             \x20 -h, --help           Show this help\n\n\
             Transformations are applied in the order given.\n\n\
             Playback keys (with --play, followed by Enter):\n\
             \x20 p  pause / resume\n\
             \x20 m  mute / unmute\n\
             \x20 q  stop\n\n\
             Examples:\n\
             \x20 melody song.txt                         # Print the score\n\
             \x20 melody --octave-up --tempo 0.5 song.txt  # Transform, then print\n\
             \x20 melody --wav song.wav song.txt          # Export audio\n"
        );
    }
}
