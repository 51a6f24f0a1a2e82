//! Output sink contract and an in-memory implementation.

/// Errors raised by an output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// No output device is available
    NoDevice,
    /// The sink could not be opened
    Open(String),
    /// A write was rejected or the stream failed mid-write
    Write(String),
    /// The sink could not be closed cleanly
    Close(String),
    /// `write` was called before `open`
    NotOpen,
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::NoDevice => write!(f, "No default output device available"),
            SinkError::Open(reason) => write!(f, "Failed to open output: {}", reason),
            SinkError::Write(reason) => write!(f, "Failed to write audio: {}", reason),
            SinkError::Close(reason) => write!(f, "Failed to close output: {}", reason),
            SinkError::NotOpen => write!(f, "Output written before it was opened"),
        }
    }
}

impl std::error::Error for SinkError {}

/// A destination for interleaved stereo `f32` audio at a fixed rate.
///
/// `write` blocks until the whole buffer has been handed off. Sinks are
/// exclusively owned and never see overlapping writes.
pub trait AudioSink {
    /// Frame rate the sink plays at.
    fn sample_rate(&self) -> u32;

    fn open(&mut self) -> Result<(), SinkError>;

    /// Write interleaved `[L, R, ...]` samples, blocking until consumed.
    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError>;

    fn close(&mut self) -> Result<(), SinkError>;
}

/// Sink that appends everything it receives to memory.
///
/// Used for dry runs and for inspecting rendered programs offline.
#[derive(Debug, Default)]
pub struct BufferSink {
    sample_rate: u32,
    samples: Vec<f32>,
    is_open: bool,
    writes: usize,
    /// Keep only the sample count, not the audio
    count_only: bool,
    written: usize,
}

impl BufferSink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// A sink that discards audio but still counts it.
    pub fn counting(sample_rate: u32) -> Self {
        Self {
            count_only: true,
            ..Self::new(sample_rate)
        }
    }

    /// Everything written so far, interleaved.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Stereo frames written so far.
    pub fn frames_written(&self) -> usize {
        self.written / 2
    }

    /// Seconds of audio written so far.
    pub fn seconds_written(&self) -> f64 {
        self.frames_written() as f64 / self.sample_rate as f64
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

impl AudioSink for BufferSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open(&mut self) -> Result<(), SinkError> {
        if self.is_open {
            return Err(SinkError::Open("already open".into()));
        }
        self.is_open = true;
        Ok(())
    }

    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
        if !self.is_open {
            return Err(SinkError::NotOpen);
        }
        if samples.len() % 2 != 0 {
            return Err(SinkError::Write(format!(
                "{} samples is not a whole number of stereo frames",
                samples.len()
            )));
        }
        if !self.count_only {
            self.samples.extend_from_slice(samples);
        }
        self.written += samples.len();
        self.writes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if !self.is_open {
            return Err(SinkError::Close("not open".into()));
        }
        self.is_open = false;
        Ok(())
    }
}
