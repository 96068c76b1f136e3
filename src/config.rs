//! Player configuration
//!
//! Loaded from JSON (every field optional) or built in code with the
//! `with_*` methods.

use crate::synth::{DEFAULT_AMPLITUDE, DEFAULT_SAMPLE_RATE};
use crate::{MelodyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output settings shared by every sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Sample rate in Hz (default: 44100)
    pub sample_rate: u32,
    /// Peak amplitude of sounding notes, 0.0 exclusive to 1.0 (default: 0.5)
    pub amplitude: f64,
    /// Output channels, 1 = mono, 2 = stereo (default: 1)
    pub channels: u16,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: DEFAULT_AMPLITUDE,
            channels: 1,
        }
    }
}

impl PlayerConfig {
    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the note amplitude
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the channel count
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(MelodyError::ConfigError(
                "sample_rate must be greater than zero".into(),
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(MelodyError::ConfigError(format!(
                "amplitude {} outside (0.0, 1.0]",
                self.amplitude
            )));
        }
        if !(1..=2).contains(&self.channels) {
            return Err(MelodyError::ConfigError(format!(
                "channels must be 1 or 2, got {}",
                self.channels
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)
            .map_err(|e| MelodyError::ConfigError(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MelodyError::ConfigError(format!(
                "Failed to read config '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.amplitude, 0.5);
        assert_eq!(config.channels, 1);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlayerConfig::from_json_str(r#"{ "sample_rate": 22050 }"#).unwrap();
        assert_eq!(config.sample_rate, 22_050);
        assert_eq!(config.amplitude, 0.5);

        let empty = PlayerConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, PlayerConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(PlayerConfig::default().with_sample_rate(0).validate().is_err());
        assert!(PlayerConfig::default().with_amplitude(0.0).validate().is_err());
        assert!(PlayerConfig::default().with_amplitude(1.5).validate().is_err());
        assert!(PlayerConfig::default().with_amplitude(f64::NAN).validate().is_err());
        assert!(PlayerConfig::default().with_channels(3).validate().is_err());

        let err = PlayerConfig::from_json_str(r#"{ "channels": 0 }"#).unwrap_err();
        assert!(matches!(err, MelodyError::ConfigError(_)));
        assert!(PlayerConfig::from_json_str(r#"{ "volume": 1 }"#).is_err());
        assert!(PlayerConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "amplitude": 0.25, "channels": 2 }}"#).unwrap();

        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.amplitude, 0.25);
        assert_eq!(config.channels, 2);

        assert!(PlayerConfig::load("/definitely/not/here.json").is_err());
    }
}
