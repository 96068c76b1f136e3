//! Audio Sinks
//!
//! A sink consumes render requests (frequency or silence, duration, amplitude)
//! and turns them into sound or samples. Playback code only ever talks to the
//! [`AudioSink`] trait, so tests can render into memory while the CLI writes
//! WAV files or drives the output device.

#[cfg(feature = "streaming")]
pub mod device;
pub mod wav;

#[cfg(feature = "streaming")]
pub use device::DeviceSink;
pub use wav::WavSink;

use crate::synth::{self, DEFAULT_SAMPLE_RATE};
use crate::Result;

/// One sound event for a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Tone frequency in Hz, `None` for silence
    pub frequency_hz: Option<f64>,
    /// Duration in seconds
    pub duration: f64,
    /// Peak amplitude (0.0 to 1.0)
    pub amplitude: f64,
}

impl RenderRequest {
    /// A sine tone.
    pub fn tone(frequency_hz: f64, duration: f64, amplitude: f64) -> Self {
        RenderRequest {
            frequency_hz: Some(frequency_hz),
            duration,
            amplitude,
        }
    }

    /// Silence of the given length.
    pub fn silence(duration: f64) -> Self {
        RenderRequest {
            frequency_hz: None,
            duration,
            amplitude: 0.0,
        }
    }

    /// True if this request produces no sound.
    pub fn is_silence(&self) -> bool {
        self.frequency_hz.is_none()
    }
}

/// Consumer of render requests.
pub trait AudioSink {
    /// Render one request. Real-time sinks return once the sound has played.
    fn render(&mut self, request: &RenderRequest) -> Result<()>;

    /// Output sample rate in Hz.
    fn sample_rate(&self) -> u32 {
        DEFAULT_SAMPLE_RATE
    }

    /// Flush any buffered output. Called once after the last request.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: AudioSink + ?Sized> AudioSink for &mut S {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        (**self).render(request)
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        (**self).render(request)
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// In-memory sink: keeps every request and the synthesized samples.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    sample_rate: u32,
    requests: Vec<RenderRequest>,
    samples: Vec<f32>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new(sample_rate: u32) -> Self {
        BufferSink {
            sample_rate,
            requests: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Every request rendered so far, in order.
    pub fn requests(&self) -> &[RenderRequest] {
        &self.requests
    }

    /// All synthesized samples, concatenated.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the sink and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Sum of the requested durations in seconds.
    pub fn requested_seconds(&self) -> f64 {
        self.requests.iter().map(|r| r.duration).sum()
    }

    /// Drop everything rendered so far.
    pub fn clear(&mut self) {
        self.requests.clear();
        self.samples.clear();
    }
}

impl AudioSink for BufferSink {
    fn render(&mut self, request: &RenderRequest) -> Result<()> {
        self.samples
            .extend(synth::synthesize(request, self.sample_rate)?);
        self.requests.push(*request);
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
