/// Errors raised before a segment is synthesized.
///
/// Every variant is detected up front, before any sample buffer is
/// allocated, so a failed call leaves nothing half-rendered behind.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// Sample rate must be at least 1 Hz
    InvalidSampleRate(u32),
    /// A target frequency was zero, negative or not finite
    InvalidFrequency { name: &'static str, value: f64 },
    /// Segment duration was zero, negative or not finite
    InvalidDuration(f64),
    /// An envelope parameter is out of range
    InvalidParameter { name: &'static str, value: f64 },
    /// Segment has no room for a fade-in and a fade-out
    SegmentTooShort { samples: usize, fade_samples: usize },
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::InvalidSampleRate(rate) => {
                write!(f, "Invalid sample rate: {} Hz (must be positive)", rate)
            }
            SynthError::InvalidFrequency { name, value } => {
                write!(
                    f,
                    "Invalid {} frequency: {} Hz (must be positive and finite)",
                    name, value
                )
            }
            SynthError::InvalidDuration(duration) => {
                write!(
                    f,
                    "Invalid segment duration: {} s (must be positive and finite)",
                    duration
                )
            }
            SynthError::InvalidParameter { name, value } => {
                write!(f, "Invalid {}: {}", name, value)
            }
            SynthError::SegmentTooShort {
                samples,
                fade_samples,
            } => {
                write!(
                    f,
                    "Segment too short: {} samples cannot hold two {}-sample fades",
                    samples, fade_samples
                )
            }
        }
    }
}

impl std::error::Error for SynthError {}

/// Reject zero, negative, NaN and infinite frequencies.
pub(crate) fn check_frequency(name: &'static str, value: f64) -> Result<f64, SynthError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SynthError::InvalidFrequency { name, value })
    }
}

/// Reject zero, negative, NaN and infinite durations.
pub(crate) fn check_duration(value: f64) -> Result<f64, SynthError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SynthError::InvalidDuration(value))
    }
}
