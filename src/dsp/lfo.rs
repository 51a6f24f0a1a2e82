//! Low Frequency Oscillator (LFO) used to drift carrier frequencies.

/*
Low Frequency Modulation
========================

An LFO is simply an oscillator running at sub-audio frequencies. Here it does
not make sound itself: its output is ADDED to every carrier frequency so the
tones drift slowly instead of sitting perfectly still.

Vocabulary
----------

  control-rate  Frequencies below human hearing: ~0.01 Hz to ~20 Hz.
                The default modulation runs at 0.1 Hz, one cycle every
                ten seconds.

  depth         Peak deviation in hertz. A depth of 2.0 swings each carrier
                between (carrier - 2 Hz) and (carrier + 2 Hz).

  shared phase  All four carriers of a segment (current left/right and the
                lookahead left/right) read the SAME modulation value at the
                same instant. Because the offset is identical on both ears,
                the interaural difference, and so the beat, is unaffected.


The Math
--------

    mod(t) = sin(2π × frequency × t) × depth

The LFO is evaluated from the absolute sample time of the segment, so it
restarts at phase 0 at the beginning of every segment. There is no state to
carry between segments.


Typical Rates
-------------

    0.01 - 0.1 Hz   Very slow sweeps, evolving textures   ← this crate
    0.1 - 0.5 Hz    Slow sweeps, gradual filter movement
    2 - 7 Hz        Vibrato territory (too fast for entrainment use)
*/

use std::f64::consts::TAU;

/// A stateless sine LFO evaluated at absolute time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineLfo {
    /// Rate in hertz
    pub frequency: f64,
    /// Peak deviation in hertz
    pub depth: f64,
}

impl SineLfo {
    pub fn new(frequency: f64, depth: f64) -> Self {
        Self { frequency, depth }
    }

    /// Modulation offset in hertz at time `t` seconds.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        (TAU * self.frequency * t).sin() * self.depth
    }
}

/// Calculate LFO period in seconds from frequency.
///
/// # Example
/// ```
/// use binaura::dsp::lfo::period_from_frequency;
/// let period = period_from_frequency(0.1);
/// assert!((period - 10.0).abs() < 1e-9); // 0.1 Hz = 10 s period
/// ```
#[inline]
pub fn period_from_frequency(frequency_hz: f64) -> f64 {
    1.0 / frequency_hz
}
