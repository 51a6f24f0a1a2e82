//! Crossfade splicing between the tail of one signal and the head of another.

/*
Crossfade Splicing
==================

Two segments played back-to-back will click at the seam unless the end of the
first already "sounds like" the start of the second. A crossfade splice makes
that happen: over the final window of the outgoing signal, its samples are
blended with the opening samples of the incoming signal.

Vocabulary
----------

  outgoing      The signal currently playing. Its tail is rewritten in place.

  incoming      The signal that follows. Only its head (the first `window`
                samples) is read; nothing else of it is emitted here.

  weight        Share of the outgoing signal at a given sample. Ramps
                linearly from 1.0 at the start of the window to 0.0 at the
                end. The incoming signal gets (1.0 - weight).


The Math: Linear Crossfade
--------------------------

For k in 0..window, with i the matching index in the outgoing tail:

    w           = 1.0 - k / (window - 1)
    outgoing[i] = outgoing[i] × w + incoming[k] × (1.0 - w)

The weights always sum to 1.0, so two full-scale inputs never exceed
full scale.

    Weight
      1.0 ──────╲      ╱──────   incoming
                 ╲    ╱
      0.5         ╲  ╱
                   ╲╱
                   ╱╲
      0.0 ───────╱────╲───────   outgoing
          start of      end of
          window        window

Linear (rather than equal-power) weights dip slightly in perceived loudness
mid-window. With the fade shaping already applied to both inputs this is
inaudible for the slow transitions this crate renders.


Why Blend Against the Head
--------------------------

The incoming head is evaluated on the SAME time axis as the outgoing tail
would be if it were a fresh segment, i.e. from t = 0. That is exactly what
the next segment will start with, so the splice ends on the sample values
the next segment opens on.
*/

use crate::dsp::ramp::ramp_value;

/// Blend the last `incoming.len()` samples of `outgoing` against `incoming`.
///
/// The outgoing weight ramps 1.0 → 0.0 across the window. If `incoming` is
/// longer than `outgoing`, only its first `outgoing.len()` samples are used.
#[inline]
pub fn crossfade_tail(outgoing: &mut [f32], incoming: &[f32]) {
    let window = incoming.len().min(outgoing.len());
    let start = outgoing.len() - window;

    for (k, (out, &inc)) in outgoing[start..]
        .iter_mut()
        .zip(incoming.iter())
        .enumerate()
    {
        let weight = ramp_value(1.0, 0.0, k, window);
        *out = blend(*out, inc, weight);
    }
}

/// Blend two samples with an outgoing `weight` (1.0 = all `a`, 0.0 = all `b`).
#[inline]
pub fn blend(a: f32, b: f32, weight: f32) -> f32 {
    let weight = weight.clamp(0.0, 1.0);
    (a * weight) + (b * (1.0 - weight))
}
