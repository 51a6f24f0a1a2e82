//! Low-level DSP primitives used by the segment synthesizer.
//!
//! These components work on plain `f32` slices and never allocate. They stay
//! focused on the signal-processing math so the synthesizer can layer
//! segment-level orchestration on top.

/// Binaural carrier pairs and per-sample carrier evaluation.
pub mod carrier;
/// Stateless sine LFO for carrier drift.
pub mod lfo;
/// Crossfade splicing.
pub mod mix;
/// Linear ramps and in-place fades.
pub mod ramp;

pub use carrier::CarrierPair;
pub use lfo::SineLfo;
