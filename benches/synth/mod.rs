//! Benchmarks for whole-segment synthesis.

use std::hint::black_box;

use binaura::{SegmentSynthesizer, SynthConfig};
use criterion::{BenchmarkId, Criterion};

pub fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/segment");
    group.sample_size(10);

    let synth = SegmentSynthesizer::new(SynthConfig::default()).unwrap();

    for &seconds in &[2.5, 5.0, 10.0] {
        group.bench_with_input(
            BenchmarkId::new("alpha_to_beta", seconds),
            &seconds,
            |b, &seconds| {
                b.iter(|| {
                    synth
                        .synthesize(black_box(8.0), black_box(12.0), black_box(seconds))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}
