pub mod dsp; // Ramps, crossfades, LFO and carrier math
pub mod io; // Output sinks and status notifications
pub mod sequencing; // Schedules and the sequence player
pub mod synth; // Segment synthesis

pub use sequencing::{FrequencyBand, ProgramConfig, Schedule, SequencePlayer};
pub use synth::{AudioSegment, SegmentSynthesizer, SynthConfig};
