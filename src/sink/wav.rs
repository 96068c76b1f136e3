//! WAV file sink
//!
//! Streams 16-bit PCM to disk as requests arrive, so long scores never sit
//! in memory as one sample buffer.

use super::{AudioSink, RenderRequest};
use crate::config::PlayerConfig;
use crate::synth;
use crate::{MelodyError, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sink writing 16-bit signed PCM to a WAV file.
pub struct WavSink {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    sample_rate: u32,
    channels: u16,
    frames_written: u64,
}

impl WavSink {
    /// Create (or truncate) a WAV file using the configured sample rate and channel count.
    pub fn create<P: AsRef<Path>>(path: P, config: &PlayerConfig) -> Result<Self> {
        config.validate()?;
        let spec = hound::WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(path.as_ref(), spec).map_err(|e| {
            MelodyError::AudioFileError(format!(
                "Failed to create WAV file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(WavSink {
            writer: Some(writer),
            sample_rate: config.sample_rate,
            channels: config.channels,
            frames_written: 0,
        })
    }

    /// Number of sample frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Seconds of audio written so far.
    pub fn seconds_written(&self) -> f64 {
        self.frames_written as f64 / self.sample_rate as f64
    }
}

impl AudioSink for WavSink {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| MelodyError::AudioFileError("WAV file already finalized".into()))?;

        let samples = synth::synthesize(request, self.sample_rate)?;
        for &sample in &samples {
            let pcm = synth::to_i16(sample);
            for _ in 0..self.channels {
                writer
                    .write_sample(pcm)
                    .map_err(|e| MelodyError::AudioFileError(format!("Failed to write sample: {}", e)))?;
            }
        }
        self.frames_written += samples.len() as u64;
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().map_err(|e| {
                MelodyError::AudioFileError(format!("Failed to finalize WAV file: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let config = PlayerConfig::default().with_sample_rate(8_000);

        let mut sink = WavSink::create(&path, &config).unwrap();
        sink.render(&RenderRequest::tone(440.0, 0.5, 0.5)).unwrap();
        sink.render(&RenderRequest::silence(0.25)).unwrap();
        assert_eq!(sink.frames_written(), 4_001 + 2_001);
        sink.finish().unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 8_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 6_002);
        assert!(samples.iter().take(4_001).any(|&s| s > 16_000));
        assert!(samples.iter().skip(4_001).all(|&s| s == 0));
    }

    #[test]
    fn test_stereo_duplicates_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let config = PlayerConfig::default()
            .with_sample_rate(1_000)
            .with_channels(2);

        let mut sink = WavSink::create(&path, &config).unwrap();
        sink.render(&RenderRequest::tone(100.0, 0.1, 0.5)).unwrap();
        sink.finish().unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 2 * 101);
        for frame in samples.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn test_render_after_finish_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = WavSink::create(dir.path().join("x.wav"), &PlayerConfig::default()).unwrap();
        sink.finish().unwrap();
        assert!(sink.render(&RenderRequest::silence(0.1)).is_err());
        // finishing twice is harmless
        sink.finish().unwrap();
    }
}
