//! SequencePlayer - walks a schedule and streams one segment per transition
//!
//! Simple model: one pass = one walk over the schedule, one transition =
//! one synthesized segment written synchronously to the sink.

use std::time::Duration;

use crate::{
    io::{AudioSink, SinkError, StatusColor, StatusNotifier},
    sequencing::{
        band::{Schedule, ScheduleError},
        clock::Clock,
    },
    synth::{SegmentSynthesizer, SynthError},
};

/*
Playback State Machine
======================

    ┌───────────────────┐  first step   ┌───────────────┐
    │ AwaitingFirstBand │ ────────────→ │ Transitioning │ ──┐
    └───────────────────┘  (notify only)└───────────────┘   │ every later step:
                                               ↑            │ notify, synthesize,
                                               └────────────┘ write

The very first step of a run only announces the starting band. Every step
after that synthesizes transition k (band k → band k+1, modulo the schedule
length) and writes it before moving on.

Pass 1 therefore holds n - 1 segments, every later pass n.


Budget
------

The time budget is checked once, at the top of each pass. A pass that starts
inside the budget always runs to completion, so a run can overshoot the
budget by up to one pass.

    budget:   |──────────── 65 s ────────────|
    pass 1:   |─ 29 ─|─ 29 ─|─ 29 ─|─ 29 ─|          (116 s, then stop)
*/

/// Where a run is in its schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing announced yet
    AwaitingFirstBand,
    /// Next step synthesizes transition `next_transition`
    Transitioning { next_transition: usize },
}

/// What a finished run did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Schedule passes started
    pub passes: usize,
    /// Segments synthesized and written
    pub segments: usize,
    /// Stereo frames written
    pub frames: usize,
    /// Clock time the run took
    pub elapsed: Duration,
}

/// Errors that end a run
#[derive(Debug)]
pub enum PlayerError {
    /// The schedule cannot be played
    Schedule(ScheduleError),
    /// A run parameter is out of range
    InvalidParameter { name: &'static str, value: f64 },
    /// Synthesizer and sink disagree on the sample rate
    SampleRateMismatch { synth: u32, sink: u32 },
    /// A segment could not be synthesized
    Synth(SynthError),
    /// The output sink failed
    Sink(SinkError),
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerError::Schedule(err) => write!(f, "Invalid schedule: {}", err),
            PlayerError::InvalidParameter { name, value } => {
                write!(f, "Invalid {}: {}", name, value)
            }
            PlayerError::SampleRateMismatch { synth, sink } => {
                write!(
                    f,
                    "Sample rate mismatch: synthesizer renders {} Hz, output plays {} Hz",
                    synth, sink
                )
            }
            PlayerError::Synth(err) => write!(f, "Synthesis failed: {}", err),
            PlayerError::Sink(err) => write!(f, "Output failed: {}", err),
        }
    }
}

impl std::error::Error for PlayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayerError::Schedule(err) => Some(err),
            PlayerError::Synth(err) => Some(err),
            PlayerError::Sink(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScheduleError> for PlayerError {
    fn from(err: ScheduleError) -> Self {
        PlayerError::Schedule(err)
    }
}

impl From<SynthError> for PlayerError {
    fn from(err: SynthError) -> Self {
        PlayerError::Synth(err)
    }
}

impl From<SinkError> for PlayerError {
    fn from(err: SinkError) -> Self {
        PlayerError::Sink(err)
    }
}

/// Convert a budget in seconds, rejecting values no `Duration` can hold.
pub(crate) fn budget_duration(total_budget: f64) -> Result<Duration, PlayerError> {
    Duration::try_from_secs_f64(total_budget)
        .ok()
        .filter(|budget| !budget.is_zero())
        .ok_or(PlayerError::InvalidParameter {
            name: "total budget",
            value: total_budget,
        })
}

/// Drives a schedule through the synthesizer into a sink.
pub struct SequencePlayer<S, N, C> {
    synth: SegmentSynthesizer,
    sink: S,
    notifier: N,
    clock: C,
}

impl<S, N, C> SequencePlayer<S, N, C>
where
    S: AudioSink,
    N: StatusNotifier,
    C: Clock,
{
    pub fn new(synth: SegmentSynthesizer, sink: S, notifier: N, clock: C) -> Self {
        Self {
            synth,
            sink,
            notifier,
            clock,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Take the player apart (to inspect a sink after an offline run).
    pub fn into_parts(self) -> (S, N, C) {
        (self.sink, self.notifier, self.clock)
    }

    /// Play `schedule` pass after pass while the budget lasts.
    ///
    /// Each segment is `segment_duration - fade_duration` seconds long. The
    /// sink is opened once for the whole run and closed at the end, also
    /// when a segment fails.
    pub fn run(
        &mut self,
        schedule: &Schedule,
        segment_duration: f64,
        total_budget: f64,
    ) -> Result<RunSummary, PlayerError> {
        let (synth_duration, budget) = self.check_run(schedule, segment_duration, total_budget)?;

        self.sink.open()?;
        let played = self.play_passes(schedule, synth_duration, budget);
        let closed = self.sink.close();

        let summary = played?;
        closed?;

        tracing::info!(
            passes = summary.passes,
            segments = summary.segments,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "run finished"
        );
        Ok(summary)
    }

    /// Validate everything up front and return the per-segment duration
    /// and the budget.
    fn check_run(
        &self,
        schedule: &Schedule,
        segment_duration: f64,
        total_budget: f64,
    ) -> Result<(f64, Duration), PlayerError> {
        if schedule.is_empty() {
            return Err(ScheduleError::Empty.into());
        }
        let budget = budget_duration(total_budget)?;

        let synth_rate = self.synth.config().sample_rate;
        let sink_rate = self.sink.sample_rate();
        if synth_rate != sink_rate {
            return Err(PlayerError::SampleRateMismatch {
                synth: synth_rate,
                sink: sink_rate,
            });
        }

        let synth_duration = segment_duration - self.synth.config().fade_duration;
        if !(segment_duration.is_finite() && synth_duration > 0.0) {
            return Err(PlayerError::InvalidParameter {
                name: "segment duration",
                value: segment_duration,
            });
        }
        self.synth.segment_samples(synth_duration)?;

        Ok((synth_duration, budget))
    }

    fn play_passes(
        &mut self,
        schedule: &Schedule,
        synth_duration: f64,
        budget: Duration,
    ) -> Result<RunSummary, PlayerError> {
        let started = self.clock.elapsed();
        let mut state = PlayerState::AwaitingFirstBand;
        let mut summary = RunSummary::default();

        while self.clock.elapsed().saturating_sub(started) < budget {
            summary.passes += 1;
            tracing::info!(pass = summary.passes, "starting schedule pass");

            for step in 0..schedule.len() {
                state = self.step(schedule, state, step, synth_duration, &mut summary)?;
            }
        }

        summary.elapsed = self.clock.elapsed().saturating_sub(started);
        Ok(summary)
    }

    /// Advance the state machine by one schedule slot.
    fn step(
        &mut self,
        schedule: &Schedule,
        state: PlayerState,
        step: usize,
        synth_duration: f64,
        summary: &mut RunSummary,
    ) -> Result<PlayerState, PlayerError> {
        let color = StatusColor::for_step(step);

        match state {
            PlayerState::AwaitingFirstBand => {
                let message = format!("Stimulating {} brainwaves...", schedule.band(0));
                self.notifier.notify(&message, color);
                Ok(PlayerState::Transitioning { next_transition: 0 })
            }
            PlayerState::Transitioning { next_transition } => {
                let transition = schedule.transition(next_transition);
                let message = format!(
                    "Transitioning from {} to {} brainwaves...",
                    transition.from, transition.to
                );
                self.notifier.notify(&message, color);
                tracing::debug!(
                    transition = transition.index,
                    from_hz = transition.from.hertz,
                    to_hz = transition.to.hertz,
                    "rendering transition"
                );

                let segment = self.synth.synthesize(
                    transition.from.hertz,
                    transition.to.hertz,
                    synth_duration,
                )?;
                self.sink.write(segment.interleaved())?;
                self.clock
                    .advance(Duration::from_secs_f64(segment.duration_secs()));

                summary.segments += 1;
                summary.frames += segment.frame_count();

                Ok(PlayerState::Transitioning {
                    next_transition: next_transition + 1,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BufferSink;
    use crate::sequencing::{band::FrequencyBand, clock::StreamClock};
    use crate::synth::SynthConfig;

    const SAMPLE_RATE: u32 = 1_000;

    #[derive(Default)]
    struct RecordingNotifier {
        lines: Vec<(String, StatusColor)>,
    }

    impl StatusNotifier for RecordingNotifier {
        fn notify(&mut self, message: &str, color: StatusColor) {
            self.lines.push((message.to_string(), color));
        }
    }

    /// Which sink call fails
    #[derive(Clone, Copy)]
    enum Failure {
        Open,
        Write(usize),
        Close,
    }

    /// Sink that fails on a chosen call
    struct FailingSink {
        failure: Failure,
        writes: usize,
        closed: bool,
    }

    impl FailingSink {
        fn new(failure: Failure) -> Self {
            Self {
                failure,
                writes: 0,
                closed: false,
            }
        }
    }

    impl AudioSink for FailingSink {
        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn open(&mut self) -> Result<(), SinkError> {
            match self.failure {
                Failure::Open => Err(SinkError::Open("no such device".into())),
                _ => Ok(()),
            }
        }

        fn write(&mut self, _samples: &[f32]) -> Result<(), SinkError> {
            self.writes += 1;
            match self.failure {
                Failure::Write(n) if n == self.writes => {
                    Err(SinkError::Write("device unplugged".into()))
                }
                _ => Ok(()),
            }
        }

        fn close(&mut self) -> Result<(), SinkError> {
            self.closed = true;
            match self.failure {
                Failure::Close => Err(SinkError::Close("stream already gone".into())),
                _ => Ok(()),
            }
        }
    }

    fn failing_player(
        failure: Failure,
    ) -> SequencePlayer<FailingSink, RecordingNotifier, StreamClock> {
        SequencePlayer::new(
            synth(),
            FailingSink::new(failure),
            RecordingNotifier::default(),
            StreamClock::new(),
        )
    }

    fn synth() -> SegmentSynthesizer {
        SegmentSynthesizer::new(SynthConfig {
            sample_rate: SAMPLE_RATE,
            fade_duration: 0.1,
            ..SynthConfig::default()
        })
        .unwrap()
    }

    fn player() -> SequencePlayer<BufferSink, RecordingNotifier, StreamClock> {
        SequencePlayer::new(
            synth(),
            BufferSink::counting(SAMPLE_RATE),
            RecordingNotifier::default(),
            StreamClock::new(),
        )
    }

    #[test]
    fn first_step_only_announces() {
        let mut player = player();
        let schedule = Schedule::brainwaves();

        // 1 s segments, budget ends inside the first pass
        let summary = player.run(&schedule, 1.0, 0.5).unwrap();

        assert_eq!(summary.passes, 1);
        assert_eq!(summary.segments, schedule.len() - 1);

        let lines = &player.notifier().lines;
        assert_eq!(lines[0].0, "Stimulating Delta (1 Hz) brainwaves...");
        assert_eq!(lines[0].1, StatusColor::Green);
        assert_eq!(
            lines[1].0,
            "Transitioning from Delta (1 Hz) to Theta (4 Hz) brainwaves..."
        );
        assert_eq!(lines[1].1, StatusColor::Cyan);
        assert_eq!(lines.len(), schedule.len());
    }

    #[test]
    fn second_pass_wraps_to_first_band() {
        let mut player = player();
        let schedule = Schedule::brainwaves();

        // Pass 1 = 4 × 0.9 s = 3.6 s, so a 4 s budget allows exactly two passes
        let summary = player.run(&schedule, 1.0, 4.0).unwrap();
        assert_eq!(summary.passes, 2);
        assert_eq!(summary.segments, 9);

        let lines: Vec<&str> = player
            .notifier()
            .lines
            .iter()
            .map(|(m, _)| m.as_str())
            .collect();
        assert_eq!(
            lines[5],
            "Transitioning from Gamma (30 Hz) to Delta (1 Hz) brainwaves..."
        );
        assert_eq!(
            lines[6],
            "Transitioning from Delta (1 Hz) to Theta (4 Hz) brainwaves..."
        );
    }

    #[test]
    fn writes_reserve_the_fade_window() {
        let mut player = player();
        let summary = player.run(&Schedule::brainwaves(), 1.0, 0.1).unwrap();

        // 4 segments × floor(0.9 s × 1000 Hz)
        assert_eq!(summary.frames, 4 * 900);
        assert_eq!(player.sink().frames_written(), 4 * 900);
        assert_eq!(player.sink().write_count(), 4);
        assert!(!player.sink().is_open());
    }

    #[test]
    fn single_band_schedule_plays_against_itself() {
        let mut player = player();
        let schedule = Schedule::new(vec![FrequencyBand::new("Alpha", 8.0)]).unwrap();

        let summary = player.run(&schedule, 1.0, 2.0).unwrap();

        // Pass 1 only announces, later passes hold one 0.9 s segment each
        assert_eq!(summary.segments, 3);
        assert_eq!(summary.passes, 4);
    }

    #[test]
    fn rejects_segment_shorter_than_fade() {
        let mut player = player();
        let err = player.run(&Schedule::brainwaves(), 0.1, 10.0).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidParameter {
                name: "segment duration",
                ..
            }
        ));
        assert_eq!(player.sink().write_count(), 0);
    }

    #[test]
    fn rejects_segment_without_room_for_fades() {
        let mut player = player();
        // 0.3 - 0.1 = 0.2 s = 200 samples, two 100-sample fades
        let err = player.run(&Schedule::brainwaves(), 0.3, 10.0).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::Synth(SynthError::SegmentTooShort { .. })
        ));
    }

    #[test]
    fn rejects_sample_rate_mismatch() {
        let mut player = SequencePlayer::new(
            synth(),
            BufferSink::new(48_000),
            RecordingNotifier::default(),
            StreamClock::new(),
        );
        let err = player.run(&Schedule::brainwaves(), 1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::SampleRateMismatch {
                synth: SAMPLE_RATE,
                sink: 48_000
            }
        ));
    }

    #[test]
    fn sink_failure_aborts_and_closes() {
        let mut player = failing_player(Failure::Write(2));

        let err = player.run(&Schedule::brainwaves(), 1.0, 100.0).unwrap_err();

        assert!(matches!(err, PlayerError::Sink(SinkError::Write(_))));
        assert_eq!(player.sink().writes, 2);
        assert!(player.sink().closed);
        assert!(err.to_string().contains("device unplugged"));
    }

    #[test]
    fn rejects_non_positive_budget() {
        let mut player = player();
        assert!(matches!(
            player.run(&Schedule::brainwaves(), 1.0, 0.0),
            Err(PlayerError::InvalidParameter {
                name: "total budget",
                ..
            })
        ));
    }

    #[test]
    fn open_failure_stops_before_any_work() {
        let mut player = failing_player(Failure::Open);

        let err = player.run(&Schedule::brainwaves(), 1.0, 10.0).unwrap_err();

        assert!(matches!(err, PlayerError::Sink(SinkError::Open(_))));
        assert!(player.notifier().lines.is_empty());
        assert_eq!(player.sink().writes, 0);
        assert!(!player.sink().closed);
    }

    #[test]
    fn close_failure_replaces_the_summary() {
        let mut player = failing_player(Failure::Close);

        let err = player.run(&Schedule::brainwaves(), 1.0, 0.5).unwrap_err();

        assert!(matches!(err, PlayerError::Sink(SinkError::Close(_))));
        assert_eq!(player.sink().writes, 4);
        assert!(player.sink().closed);
    }

    #[test]
    fn rejects_budget_too_large_for_a_duration() {
        let mut player = player();
        let err = player.run(&Schedule::brainwaves(), 1.0, 1e20).unwrap_err();
        assert!(matches!(
            err,
            PlayerError::InvalidParameter {
                name: "total budget",
                ..
            }
        ));
        assert!(!player.sink().is_open());
        assert_eq!(player.sink().write_count(), 0);
    }
}
