#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    io::{AudioSink, StatusNotifier},
    sequencing::{
        band::Schedule,
        clock::Clock,
        player::{budget_duration, PlayerError, RunSummary, SequencePlayer},
    },
    synth::{SegmentSynthesizer, SynthConfig},
};

/// Everything a run needs, fixed for its whole length.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    /// Envelope parameters shared by every segment
    pub synth: SynthConfig,
    /// Seconds per band, including the crossfade window
    pub segment_duration: f64,
    /// Seconds after which no new schedule pass starts
    pub total_budget: f64,
    /// Bands to cycle through
    pub schedule: Schedule,
}

impl ProgramConfig {
    /// Check the envelope parameters and the run timing fit together.
    pub fn validate(&self) -> Result<(), PlayerError> {
        self.synth.validate()?;

        budget_duration(self.total_budget)?;
        if !(self.segment_duration.is_finite() && self.segment_duration > self.synth.fade_duration)
        {
            return Err(PlayerError::InvalidParameter {
                name: "segment duration",
                value: self.segment_duration,
            });
        }
        Ok(())
    }

    /// Length of each synthesized segment: the band time minus one fade.
    pub fn synth_duration(&self) -> f64 {
        self.segment_duration - self.synth.fade_duration
    }

    /// Clock time of the first pass, which skips the opening band.
    pub fn first_pass_secs(&self) -> f64 {
        (self.schedule.len() - 1) as f64 * self.synth_duration()
    }

    /// Clock time of every pass after the first.
    pub fn pass_secs(&self) -> f64 {
        self.schedule.len() as f64 * self.synth_duration()
    }

    /// Validate the program and build a player for it.
    pub fn player<S, N, C>(
        &self,
        sink: S,
        notifier: N,
        clock: C,
    ) -> Result<SequencePlayer<S, N, C>, PlayerError>
    where
        S: AudioSink,
        N: StatusNotifier,
        C: Clock,
    {
        self.validate()?;
        let synth = SegmentSynthesizer::new(self.synth)?;
        Ok(SequencePlayer::new(synth, sink, notifier, clock))
    }

    /// Run this program on `player` until the budget is spent.
    pub fn run_on<S, N, C>(
        &self,
        player: &mut SequencePlayer<S, N, C>,
    ) -> Result<RunSummary, PlayerError>
    where
        S: AudioSink,
        N: StatusNotifier,
        C: Clock,
    {
        player.run(&self.schedule, self.segment_duration, self.total_budget)
    }

    /// Build a player for this program and run it to completion.
    pub fn play<S, N, C>(&self, sink: S, notifier: N, clock: C) -> Result<RunSummary, PlayerError>
    where
        S: AudioSink,
        N: StatusNotifier,
        C: Clock,
    {
        let mut player = self.player(sink, notifier, clock)?;
        self.run_on(&mut player)
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            synth: SynthConfig::default(),
            segment_duration: 30.0,
            total_budget: 180.0,
            schedule: Schedule::brainwaves(),
        }
    }
}
