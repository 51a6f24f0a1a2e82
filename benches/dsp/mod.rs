//! Benchmarks for low-level DSP primitives.

use std::hint::black_box;

use binaura::dsp::{
    mix::crossfade_tail,
    ramp::{fade_in, fade_out},
    CarrierPair, SineLfo,
};
use criterion::{BenchmarkId, Criterion};

use crate::WINDOW_SIZES;

pub fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramp");

    for &size in WINDOW_SIZES {
        let source: Vec<f32> = (0..size * 3).map(|i| (i as f32 * 0.01).sin()).collect();
        let mut buffer = source.clone();

        group.bench_with_input(BenchmarkId::new("fade_in_out", size), &size, |b, &size| {
            b.iter(|| {
                buffer.copy_from_slice(&source);
                fade_in(black_box(&mut buffer), size);
                fade_out(black_box(&mut buffer), size);
            })
        });
    }

    group.finish();
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in WINDOW_SIZES {
        let outgoing: Vec<f32> = (0..size * 2).map(|i| (i as f32 * 0.1).sin()).collect();
        let incoming: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();
        let mut buffer = outgoing.clone();

        group.bench_with_input(BenchmarkId::new("crossfade_tail", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&outgoing);
                crossfade_tail(black_box(&mut buffer), black_box(&incoming));
            })
        });
    }

    group.finish();
}

pub fn bench_carrier(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/carrier");
    let pair = CarrierPair::for_target(8.0, 100.0);
    let lfo = SineLfo::new(0.1, 2.0);

    for &size in WINDOW_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("modulated_pair", size), &size, |b, _| {
            b.iter(|| {
                for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
                    let t = black_box(i as f64 / 192_000.0);
                    (*l, *r) = pair.sample_at(t, lfo.value_at(t));
                }
            })
        });
    }

    group.finish();
}
