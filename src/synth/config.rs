#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::SineLfo;
use crate::synth::error::{check_duration, SynthError};

/// Envelope parameters shared by every segment of a run.
///
/// Built once at startup and handed to the synthesizer by value; nothing
/// mutates it afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Multiplier lifting target frequencies into the audible range
    pub transpose_factor: f64,
    /// LFO rate in Hz
    pub modulation_frequency: f64,
    /// LFO peak deviation in Hz
    pub modulation_depth: f64,
    /// Fade / crossfade window in seconds
    pub fade_duration: f64,
}

impl SynthConfig {
    pub const DEFAULT_SAMPLE_RATE: u32 = 192_000;

    /// Longest fade or segment accepted, in seconds
    pub const MAX_DURATION_SECS: f64 = 3_600.0;

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(self.sample_rate));
        }
        if !(self.transpose_factor.is_finite() && self.transpose_factor > 0.0) {
            return Err(SynthError::InvalidParameter {
                name: "transpose factor",
                value: self.transpose_factor,
            });
        }
        if !(self.modulation_frequency.is_finite() && self.modulation_frequency >= 0.0) {
            return Err(SynthError::InvalidParameter {
                name: "modulation frequency",
                value: self.modulation_frequency,
            });
        }
        if !(self.modulation_depth.is_finite() && self.modulation_depth >= 0.0) {
            return Err(SynthError::InvalidParameter {
                name: "modulation depth",
                value: self.modulation_depth,
            });
        }
        if !(self.fade_duration.is_finite() && self.fade_duration >= 0.0) {
            return Err(self.fade_error());
        }
        self.fade_samples()?;
        Ok(())
    }

    /// Number of samples in `seconds` of audio, rounded down.
    ///
    /// `None` when `seconds` is negative or longer than
    /// [`MAX_DURATION_SECS`](Self::MAX_DURATION_SECS), or the count does not
    /// fit in a `usize`.
    #[inline]
    pub fn samples_for(&self, seconds: f64) -> Option<usize> {
        if !(0.0..=Self::MAX_DURATION_SECS).contains(&seconds) {
            return None;
        }
        let samples = (seconds * self.sample_rate as f64).floor();
        (samples <= usize::MAX as f64).then_some(samples as usize)
    }

    /// Length of the fade / crossfade window in samples.
    #[inline]
    pub fn fade_samples(&self) -> Result<usize, SynthError> {
        self.samples_for(self.fade_duration)
            .ok_or_else(|| self.fade_error())
    }

    /// Sample count for a segment of `duration` seconds.
    pub fn segment_samples(&self, duration: f64) -> Result<usize, SynthError> {
        let duration = check_duration(duration)?;
        self.samples_for(duration)
            .ok_or(SynthError::InvalidDuration(duration))
    }

    fn fade_error(&self) -> SynthError {
        SynthError::InvalidParameter {
            name: "fade duration",
            value: self.fade_duration,
        }
    }

    /// The modulation source these parameters describe.
    pub fn lfo(&self) -> SineLfo {
        SineLfo::new(self.modulation_frequency, self.modulation_depth)
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            transpose_factor: 100.0,
            modulation_frequency: 0.1,
            modulation_depth: 2.0,
            fade_duration: 1.0,
        }
    }
}
