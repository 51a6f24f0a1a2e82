use crate::dsp::{
    mix::crossfade_tail,
    ramp::{fade_in, fade_out},
    CarrierPair, SineLfo,
};
use crate::synth::{
    config::SynthConfig,
    error::{check_frequency, SynthError},
};

/*
Segment Synthesis
=================

A program is a chain of segments, one per band transition. Each segment is a
stereo binaural tone centered on the CURRENT target whose tail already
dissolves into the NEXT target, so that segments can be written back-to-back
with no click at the seam.

Pipeline
--------

    time axis      t[i] = i / sample_rate,  i in [0, samples)
        │
        ▼
    LFO            mod(t) = sin(2π · mod_freq · t) · depth   (shared phase)
        │
        ├──────────────────────────┐
        ▼                          ▼
    current pair              lookahead pair (next target)
    sin(2π·f(t)·t)            sin(2π·f(t)·t), first `fade` samples only
        │                          │
    fade-in head              fade-out head (mirror shaping)
    fade-out tail                  │
        │                          │
        └──────► crossfade tail ◄──┘
                       │
                       ▼
                  interleave L/R


Amplitude Through a Segment
---------------------------

    1.0 ┐     ╱‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾╲
        │    ╱                      ╲ ← current (faded out, then weighted)
        │   ╱                        ╲
    0.0 └──╱──────────────────────────╲──→ t
         fade                     crossfade
        (head)                     (tail)

Over the tail window both the current tone and the lookahead are weighted,
so the last emitted sample is silent and the next segment (which starts with
a fade-in from silence) joins without a jump.


Lookahead
---------

The lookahead channels are evaluated on the same time axis starting at t = 0,
i.e. exactly the opening of the next segment. Only their first window is ever
blended into the output; the rest would be discarded, so it is never
rendered.


Degenerate Input
----------------

current == next is not special-cased: the tone splices against itself and is
still faded and crossfaded like any other segment.
*/

/// One rendered stereo segment: interleaved `[L, R, L, R, ...]` frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioSegment {
    /// Interleave two equal-length channels into a segment.
    pub fn from_channels(left: &[f32], right: &[f32], sample_rate: u32) -> Self {
        debug_assert_eq!(left.len(), right.len());

        let mut samples = Vec::with_capacity(left.len() * 2);
        for (&l, &r) in left.iter().zip(right.iter()) {
            samples.push(l);
            samples.push(r);
        }

        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of stereo frames.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Interleaved samples, ready for a 2-channel sink.
    pub fn interleaved(&self) -> &[f32] {
        &self.samples
    }

    /// Stereo frame at `index`, as `(left, right)`.
    pub fn frame(&self, index: usize) -> Option<(f32, f32)> {
        let i = index.checked_mul(2)?;
        Some((*self.samples.get(i)?, *self.samples.get(i + 1)?))
    }

    pub fn frames(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.samples.chunks_exact(2).map(|f| (f[0], f[1]))
    }

    pub fn left(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().step_by(2).copied()
    }

    pub fn right(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().skip(1).step_by(2).copied()
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// Renders transition segments from a fixed set of envelope parameters.
///
/// Stateless between calls: the same inputs always give the same output.
#[derive(Debug, Clone)]
pub struct SegmentSynthesizer {
    config: SynthConfig,
    lfo: SineLfo,
}

impl SegmentSynthesizer {
    pub fn new(config: SynthConfig) -> Result<Self, SynthError> {
        config.validate()?;
        Ok(Self {
            lfo: config.lfo(),
            config,
        })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Render `duration` seconds centered on `current_hz` whose tail blends
    /// into `next_hz`.
    ///
    /// Returns exactly `floor(duration × sample_rate)` frames. The segment
    /// must be longer than two fade windows.
    pub fn synthesize(
        &self,
        current_hz: f64,
        next_hz: f64,
        duration: f64,
    ) -> Result<AudioSegment, SynthError> {
        let current_hz = check_frequency("current", current_hz)?;
        let next_hz = check_frequency("next", next_hz)?;
        let samples = self.segment_samples(duration)?;
        let fade_samples = self.config.fade_samples()?;

        let current = CarrierPair::for_target(current_hz, self.config.transpose_factor);
        let (mut left, mut right) = self.render_carriers(&current, samples);

        fade_in(&mut left, fade_samples);
        fade_out(&mut left, fade_samples);
        fade_in(&mut right, fade_samples);
        fade_out(&mut right, fade_samples);

        let next = CarrierPair::for_target(next_hz, self.config.transpose_factor);
        let (next_left, next_right) = self.render_lookahead(&next, fade_samples);

        crossfade_tail(&mut left, &next_left);
        crossfade_tail(&mut right, &next_right);

        tracing::debug!(
            current_hz,
            next_hz,
            frames = samples,
            fade_samples,
            "synthesized segment"
        );

        Ok(AudioSegment::from_channels(
            &left,
            &right,
            self.config.sample_rate,
        ))
    }

    /// Frame count for a segment of `duration` seconds.
    ///
    /// Fails if the duration is invalid or leaves no room between the
    /// fade-in and the fade-out.
    pub fn segment_samples(&self, duration: f64) -> Result<usize, SynthError> {
        let samples = self.config.segment_samples(duration)?;
        let fade_samples = self.config.fade_samples()?;

        let too_short = fade_samples
            .checked_mul(2)
            .map_or(true, |both_fades| samples <= both_fades);
        if too_short {
            return Err(SynthError::SegmentTooShort {
                samples,
                fade_samples,
            });
        }
        Ok(samples)
    }

    /// Evaluate a carrier pair on `t = i / sample_rate` for `samples` samples.
    fn render_carriers(&self, pair: &CarrierPair, samples: usize) -> (Vec<f32>, Vec<f32>) {
        let rate = self.config.sample_rate as f64;
        let mut left = Vec::with_capacity(samples);
        let mut right = Vec::with_capacity(samples);

        for i in 0..samples {
            let t = i as f64 / rate;
            let (l, r) = pair.sample_at(t, self.lfo.value_at(t));
            left.push(l);
            right.push(r);
        }

        (left, right)
    }

    /// Opening window of the next segment, faded out so it can be weighted
    /// into the current tail.
    fn render_lookahead(&self, pair: &CarrierPair, window: usize) -> (Vec<f32>, Vec<f32>) {
        let (mut left, mut right) = self.render_carriers(pair, window);
        fade_out(&mut left, window);
        fade_out(&mut right, window);
        (left, right)
    }
}
