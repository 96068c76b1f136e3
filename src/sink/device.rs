//! Audio device integration using rodio
//!
//! Plays each request on the default output device and blocks until it has
//! been heard, so playback pacing follows the score.

use super::{AudioSink, RenderRequest};
use crate::config::PlayerConfig;
use crate::synth;
use crate::{MelodyError, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};

/// Real-time sink on the system output device.
///
/// Holds the rodio output stream, so it must be created on the thread that
/// renders (see [`crate::spawn_playback`]).
pub struct DeviceSink {
    _stream: OutputStream,
    sink: Sink,
    sample_rate: u32,
    channels: u16,
}

impl DeviceSink {
    /// Open the default output device.
    pub fn new(config: &PlayerConfig) -> Result<Self> {
        config.validate()?;

        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            MelodyError::AudioDeviceError(format!("Failed to create audio stream: {}", e))
        })?;

        let sink = Sink::try_new(&stream_handle).map_err(|e| {
            MelodyError::AudioDeviceError(format!("Failed to create audio sink: {}", e))
        })?;

        Ok(DeviceSink {
            _stream: stream,
            sink,
            sample_rate: config.sample_rate,
            channels: config.channels,
        })
    }
}

impl AudioSink for DeviceSink {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        let mono = synth::synthesize(request, self.sample_rate)?;
        let samples = if self.channels == 2 {
            synth::mono_to_stereo(&mono)
        } else {
            mono
        };
        self.sink
            .append(SamplesBuffer::new(self.channels, self.sample_rate, samples));
        self.sink.sleep_until_end();
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn finish(&mut self) -> Result<()> {
        self.sink.sleep_until_end();
        Ok(())
    }
}

impl Drop for DeviceSink {
    fn drop(&mut self) {
        self.sink.stop();
    }
}
