//! Criterion benchmarks for brume-core DSP primitives
//!
//! Run with: cargo bench -p brume-core
#![allow(missing_docs)]

use brume_core::{
    BandNoise, DampedComb, DiffusionAllpass, HighpassFilter, JitterLfo, OnePole, SmoothedParam,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[32, 64, 128, 256];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_highpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("HighpassFilter");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut filter = HighpassFilter::new(SAMPLE_RATE, 200.0);
                b.iter(|| {
                    for &sample in &input {
                        black_box(filter.process(black_box(sample)));
                    }
                });
            },
        );
    }

    // set_cutoff recalculation cost (called whenever the knob steps)
    group.bench_function("set_cutoff_recalc", |b| {
        let mut filter = HighpassFilter::new(SAMPLE_RATE, 200.0);
        b.iter(|| {
            filter.set_cutoff(black_box(800.0));
        });
    });

    group.finish();
}

fn bench_comb(c: &mut Criterion) {
    let mut group = c.benchmark_group("DampedComb");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut comb = DampedComb::new(1557, SAMPLE_RATE);
                comb.set_feedback(0.84);
                comb.set_damping_hz(6000.0);
                b.iter(|| {
                    for &sample in &input {
                        black_box(comb.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("DiffusionAllpass");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut allpass = DiffusionAllpass::new(556);
                b.iter(|| {
                    for &sample in &input {
                        black_box(allpass.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_one_pole(c: &mut Criterion) {
    let mut group = c.benchmark_group("OnePole");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut filter = OnePole::new(SAMPLE_RATE, 1000.0);
                b.iter(|| {
                    for &sample in &input {
                        black_box(filter.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("BandNoise");

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                let mut noise = BandNoise::new(1, SAMPLE_RATE, 6000.0);
                b.iter(|| {
                    for _ in 0..size {
                        black_box(noise.next_sample());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_jitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("JitterLfo");

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                let mut lfo = JitterLfo::new(1, SAMPLE_RATE, 1.0, 25.0);
                b.iter(|| {
                    for _ in 0..size {
                        black_box(lfo.advance());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_smoothed_param(c: &mut Criterion) {
    let mut group = c.benchmark_group("SmoothedParam");

    for &block_size in BLOCK_SIZES {
        // Ramping: set a new target each block
        group.bench_with_input(
            BenchmarkId::new("ramping", block_size),
            &block_size,
            |b, &size| {
                let mut param = SmoothedParam::with_config(1.0, SAMPLE_RATE, 50.0);
                b.iter(|| {
                    param.set_target(black_box(0.5));
                    for _ in 0..size {
                        black_box(param.advance());
                    }
                });
            },
        );

        // Settled: already at target
        group.bench_with_input(
            BenchmarkId::new("settled", block_size),
            &block_size,
            |b, &size| {
                let mut param = SmoothedParam::with_config(1.0, SAMPLE_RATE, 50.0);
                param.snap_to_target();
                b.iter(|| {
                    for _ in 0..size {
                        black_box(param.advance());
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_highpass,
    bench_comb,
    bench_allpass,
    bench_one_pole,
    bench_noise,
    bench_jitter,
    bench_smoothed_param,
);

criterion_main!(benches);
