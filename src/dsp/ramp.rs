//! Linear amplitude ramps and in-place fades.

/*
Linear Fades
============

A fade is an amplitude envelope that only ever moves in one direction. Every
segment in this crate is shaped by two of them: a fade-in over its head and a
fade-out over its tail.

Vocabulary
----------

  ramp          A sequence of gain values moving in a straight line from a
                start value to an end value.

  fade-in       Multiply the head of a signal by a ramp 0.0 → 1.0.

  fade-out      Multiply the tail of a signal by a ramp 1.0 → 0.0.

  window        The number of samples a fade spans (fade_samples).


The Shape
---------

  Gain
    1.0 ┐    ╱‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾╲
        │   ╱                    ╲
        │  ╱                      ╲
    0.0 └─╱────────────────────────╲──→ Sample
         fade-in              fade-out
         (window)             (window)


Endpoint Convention
-------------------

Both endpoints are INCLUDED in the ramp. For a window of N samples:

    gain[k] = start + (end - start) × k / (N - 1)

So a fade-in's first sample is exactly 0.0 and its last sample is exactly
1.0; a fade-out's last sample is exactly 0.0. The sample right after a
fade-in window is untouched, i.e. full unity scale.

A one-sample window cannot interpolate, so it holds the start value. An
empty window is a no-op.

    N = 5, fade-in:   0.00  0.25  0.50  0.75  1.00
    N = 5, fade-out:  1.00  0.75  0.50  0.25  0.00
    N = 1, fade-in:   0.00
*/

/// Gain at position `index` of an inclusive linear ramp of `len` samples.
///
/// Matches the endpoint convention described above: `index == 0` yields
/// `start`, `index == len - 1` yields `end`.
#[inline]
pub fn ramp_value(start: f32, end: f32, index: usize, len: usize) -> f32 {
    debug_assert!(index < len.max(1));
    if len <= 1 {
        return start;
    }
    let step = (end - start) / (len - 1) as f32;
    start + step * index as f32
}

/// Iterate the gains of an inclusive linear ramp.
pub fn linear_ramp(start: f32, end: f32, len: usize) -> impl Iterator<Item = f32> {
    (0..len).map(move |i| ramp_value(start, end, i, len))
}

/// Multiply `signal` by a ramp from `start` to `end` spanning the whole slice.
#[inline]
pub fn apply_ramp(signal: &mut [f32], start: f32, end: f32) {
    let len = signal.len();
    for (i, sample) in signal.iter_mut().enumerate() {
        *sample *= ramp_value(start, end, i, len);
    }
}

/// Fade the first `window` samples of `signal` in from silence.
#[inline]
pub fn fade_in(signal: &mut [f32], window: usize) {
    let window = window.min(signal.len());
    apply_ramp(&mut signal[..window], 0.0, 1.0);
}

/// Fade the last `window` samples of `signal` out to silence.
#[inline]
pub fn fade_out(signal: &mut [f32], window: usize) {
    let start = signal.len() - window.min(signal.len());
    apply_ramp(&mut signal[start..], 1.0, 0.0);
}
