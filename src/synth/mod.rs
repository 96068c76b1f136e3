//! Sine Tone Synthesis
//!
//! Turns render requests into mono `f32` sample blocks and converts samples
//! to 16-bit PCM.

use crate::sink::RenderRequest;
use crate::{MelodyError, Result};
use std::f64::consts::PI;

/// Default output sample rate (CD quality).
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Amplitude notes are played at, as a fraction of full scale.
pub const DEFAULT_AMPLITUDE: f64 = 0.5;

/// Largest block a single request may produce (the 32-bit WAV size limit).
pub const MAX_SAMPLES: usize = u32::MAX as usize;

/// Number of samples a request of `duration` seconds produces.
///
/// One more than `floor(sample_rate * duration)`: the block includes both
/// its first and its last sample point. Negative, non-finite or oversized
/// durations are rejected.
pub fn sample_count(duration: f64, sample_rate: u32) -> Result<usize> {
    let span = sample_rate as f64 * duration;
    if !(span.is_finite() && span >= 0.0 && span < MAX_SAMPLES as f64) {
        return Err(MelodyError::InvalidArgument(format!(
            "Cannot render {} seconds at {} Hz",
            duration, sample_rate
        )));
    }
    (span as usize).checked_add(1).ok_or_else(|| {
        MelodyError::InvalidArgument(format!("Cannot render {} seconds", duration))
    })
}

/// Synthesize one request.
///
/// Tones are `amplitude * sin(2π·i·hz / sample_rate)`; silence is all zeros.
pub fn synthesize(request: &RenderRequest, sample_rate: u32) -> Result<Vec<f32>> {
    let count = sample_count(request.duration, sample_rate)?;
    let samples = match request.frequency_hz {
        Some(hz) => {
            let phase_inc = 2.0 * PI * hz / sample_rate as f64;
            (0..count)
                .map(|i| (request.amplitude * (phase_inc * i as f64).sin()) as f32)
                .collect()
        }
        None => vec![0.0; count],
    };
    Ok(samples)
}

/// Convert mono samples to stereo (duplicate each sample)
pub fn mono_to_stereo(mono: &[f32]) -> Vec<f32> {
    let mut stereo = Vec::with_capacity(mono.len() * 2);
    for &sample in mono {
        stereo.push(sample);
        stereo.push(sample);
    }
    stereo
}

/// Convert a sample to signed 16-bit PCM, clipping to [-1.0, 1.0].
pub fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
