// Purpose: Segment rendering - one stereo transition segment per band pair
// This layer sits above the dsp primitives and below the sequence player

pub mod config;
pub mod error;
pub mod segment;

pub use config::SynthConfig;
pub use error::SynthError;
pub use segment::{AudioSegment, SegmentSynthesizer};
