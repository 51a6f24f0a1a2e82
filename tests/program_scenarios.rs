use binaura::{
    io::{BufferSink, StatusColor, StatusNotifier},
    sequencing::{FrequencyBand, Schedule, StreamClock},
    ProgramConfig, SegmentSynthesizer, SequencePlayer, SynthConfig,
};
use rustfft::{num_complex::Complex, FftPlanner};

#[derive(Default)]
struct RecordingNotifier {
    lines: Vec<String>,
}

impl StatusNotifier for RecordingNotifier {
    fn notify(&mut self, message: &str, _color: StatusColor) {
        self.lines.push(message.to_string());
    }
}

fn config(sample_rate: u32, fade_duration: f64) -> SynthConfig {
    SynthConfig {
        sample_rate,
        fade_duration,
        ..SynthConfig::default()
    }
}

fn numbered_schedule(hertz: &[f64]) -> Schedule {
    Schedule::new(
        hertz
            .iter()
            .map(|&hz| FrequencyBand::new(format!("{hz}"), hz))
            .collect(),
    )
    .unwrap()
}

/// Index of the strongest bin below Nyquist.
fn peak_bin(signal: &[f32]) -> usize {
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(signal.len());
    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer[..signal.len() / 2]
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn budget_is_checked_once_per_pass() {
    // 30 s bands with a 1 s fade: pass 1 holds four 29 s segments (116 s),
    // which overruns a 65 s budget, so the run stops after that one pass.
    let program = ProgramConfig {
        synth: config(1_000, 1.0),
        segment_duration: 30.0,
        total_budget: 65.0,
        schedule: numbered_schedule(&[1.0, 4.0, 8.0, 12.0, 30.0]),
    };

    let synth = SegmentSynthesizer::new(program.synth).unwrap();
    let mut player = SequencePlayer::new(
        synth,
        BufferSink::counting(1_000),
        RecordingNotifier::default(),
        StreamClock::new(),
    );
    let summary = player
        .run(&program.schedule, program.segment_duration, program.total_budget)
        .unwrap();

    assert_eq!(summary.passes, 1);
    assert_eq!(summary.segments, 4);
    assert_eq!(summary.frames, 4 * 29_000);
    assert_eq!(summary.elapsed.as_secs(), 116);

    let (sink, notifier, _) = player.into_parts();
    assert_eq!(sink.frames_written(), 4 * 29_000);

    let starts = notifier
        .lines
        .iter()
        .filter(|l| l.starts_with("Stimulating"))
        .count();
    assert_eq!(starts, 1);
    assert_eq!(notifier.lines[0], "Stimulating 1 (1 Hz) brainwaves...");
    assert_eq!(
        notifier.lines[1],
        "Transitioning from 1 (1 Hz) to 4 (4 Hz) brainwaves..."
    );
    assert_eq!(
        notifier.lines[2],
        "Transitioning from 4 (4 Hz) to 8 (8 Hz) brainwaves..."
    );
}

#[test]
fn consecutive_segments_join_without_a_jump() {
    let synth = SegmentSynthesizer::new(config(8_000, 0.1)).unwrap();

    let first = synth.synthesize(4.0, 8.0, 0.5).unwrap();
    let second = synth.synthesize(8.0, 12.0, 0.5).unwrap();

    let (last_l, last_r) = first.frame(first.frame_count() - 1).unwrap();
    let (next_l, next_r) = second.frame(0).unwrap();

    assert!((last_l - next_l).abs() < 0.05);
    assert!((last_r - next_r).abs() < 0.05);
}

#[test]
fn streamed_program_has_no_seam_jumps() {
    let program = ProgramConfig {
        synth: config(8_000, 0.05),
        segment_duration: 0.3,
        total_budget: 1.5,
        schedule: Schedule::brainwaves(),
    };

    let synth = SegmentSynthesizer::new(program.synth).unwrap();
    let frames_per_segment = synth.segment_samples(program.synth_duration()).unwrap();
    let mut player = SequencePlayer::new(
        synth,
        BufferSink::new(8_000),
        RecordingNotifier::default(),
        StreamClock::new(),
    );
    let summary = player
        .run(&program.schedule, program.segment_duration, program.total_budget)
        .unwrap();
    assert!(summary.segments > program.schedule.len());

    let samples = player.sink().samples();
    for seam in 1..summary.segments {
        let i = seam * frames_per_segment * 2;
        let before = &samples[i - 2..i];
        let after = &samples[i..i + 2];
        for ch in 0..2 {
            assert!(
                (before[ch] - after[ch]).abs() < 0.05,
                "jump at seam {seam}, channel {ch}"
            );
        }
    }
}

#[test]
fn carriers_sit_one_transposed_hertz_either_side() {
    let synth = SegmentSynthesizer::new(SynthConfig {
        sample_rate: 8_000,
        fade_duration: 0.1,
        modulation_depth: 0.0,
        transpose_factor: 100.0,
        ..SynthConfig::default()
    })
    .unwrap();

    let segment = synth.synthesize(8.0, 30.0, 2.0).unwrap();
    let left: Vec<f32> = segment.left().skip(2_000).take(8_000).collect();
    let right: Vec<f32> = segment.right().skip(2_000).take(8_000).collect();

    // One-second window, so bin index == hertz
    assert_eq!(peak_bin(&left), 700);
    assert_eq!(peak_bin(&right), 900);
}

#[test]
fn synthesis_is_deterministic() {
    let a = SegmentSynthesizer::new(config(4_000, 0.1)).unwrap();
    let b = SegmentSynthesizer::new(config(4_000, 0.1)).unwrap();

    assert_eq!(
        a.synthesize(12.0, 30.0, 1.0).unwrap().interleaved(),
        b.synthesize(12.0, 30.0, 1.0).unwrap().interleaved()
    );
}
