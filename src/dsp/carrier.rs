//! Binaural carrier frequencies and per-sample carrier evaluation.

/*
Binaural Carriers
=================

A binaural beat is not in the audio signal itself. Each ear gets a pure sine
tone; the two tones differ by a few hertz; the brain perceives the difference
as a slow "beat".

Vocabulary
----------

  target        The beat frequency we want to evoke (e.g. 8 Hz for Alpha).

  offset        ±1 Hz applied to the target before transposition. Left gets
                (target - 1), right gets (target + 1).

  transpose     Multiplier that lifts the (sub-audible) target into an
                audible carrier range. With a factor of 100, an 8 Hz target
                becomes a 700 Hz left / 900 Hz right pair.

  carrier       The actual frequency synthesized for one ear, after
                transposition and modulation.


The Math
--------

    left(t)  = (target - 1) × transpose + mod(t)
    right(t) = (target + 1) × transpose + mod(t)
    sample   = sin(2π × carrier(t) × t)

Note the carrier frequency is multiplied by ABSOLUTE time rather than
integrated into a running phase. When mod(t) varies, the instantaneous
frequency therefore deviates slightly from carrier(t). That is the intended
character of the sweep and keeps every sample a pure function of t.

No clamping is performed: a low target with a small transpose factor can
produce a negative or sub-audible carrier. Picking sensible values is up to
the caller.


Precision
---------

Carrier arguments grow large (2π × 3100 Hz × 30 s ≈ 5.8e5 rad), which is past
the point where f32 can place a phase to better than a few hundredths of a
radian. The argument is therefore formed and reduced in f64; only the final
sample is narrowed to f32.
*/

use std::f64::consts::TAU;

/// Hertz added/subtracted around the target before transposition.
pub const BINAURAL_OFFSET_HZ: f64 = 1.0;

/// Left/right carrier base frequencies for one target, before modulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarrierPair {
    pub left: f64,
    pub right: f64,
}

impl CarrierPair {
    /// Derive the carrier pair for a target beat frequency.
    pub fn for_target(target_hz: f64, transpose_factor: f64) -> Self {
        Self {
            left: (target_hz - BINAURAL_OFFSET_HZ) * transpose_factor,
            right: (target_hz + BINAURAL_OFFSET_HZ) * transpose_factor,
        }
    }

    /// Frequency difference between the ears after transposition.
    pub fn beat_spread(&self) -> f64 {
        self.right - self.left
    }

    /// Render both channels at time `t` with a shared modulation offset.
    #[inline]
    pub fn sample_at(&self, t: f64, modulation: f64) -> (f32, f32) {
        (
            carrier_sample(self.left + modulation, t),
            carrier_sample(self.right + modulation, t),
        )
    }
}

/// Evaluate `sin(2π × frequency × t)` for one sample.
#[inline]
pub fn carrier_sample(frequency: f64, t: f64) -> f32 {
    (TAU * frequency * t).sin() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transposes_offset_pair() {
        let pair = CarrierPair::for_target(8.0, 100.0);
        assert_eq!(pair.left, 700.0);
        assert_eq!(pair.right, 900.0);
        assert_eq!(pair.beat_spread(), 200.0);
    }

    #[test]
    fn no_clamping_below_one_hertz() {
        let pair = CarrierPair::for_target(0.5, 10.0);
        assert_eq!(pair.left, -5.0);
    }

    #[test]
    fn carrier_is_zero_at_time_origin() {
        let pair = CarrierPair::for_target(30.0, 100.0);
        assert_eq!(pair.sample_at(0.0, 1.5), (0.0, 0.0));
    }

    #[test]
    fn carrier_quarter_cycle_peaks() {
        // 250 Hz at t = 1 ms is a quarter cycle
        assert!((carrier_sample(250.0, 0.001) - 1.0).abs() < 1e-6);
    }
}
