//! Criterion benchmarks for the per-block engine
//!
//! Run with: cargo bench -p brume-engine
#![allow(missing_docs)]

use brume_controls::ControlIo;
use brume_engine::{BlockEngine, EngineConfig, NullDiag, SharedState};
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

struct BenchIo {
    cv: [f32; 4],
    toggle: bool,
}

impl ControlIo for BenchIo {
    fn read_cv(&mut self, channel: usize) -> f32 {
        self.cv.get(channel).copied().unwrap_or(0.0)
    }

    fn read_button_raw(&mut self) -> bool {
        false
    }

    fn read_toggle_raw(&mut self) -> bool {
        self.toggle
    }

    fn set_indicator(&mut self, _high: bool) {}
}

fn bench_block_steady(c: &mut Criterion) {
    let mut group = c.benchmark_group("BlockEngine");

    // Steady controls: the common case, the change gate skips every map.
    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("steady_controls", block_size),
            &block_size,
            |b, _| {
                let shared = SharedState::new(true);
                let mut engine = BlockEngine::new(EngineConfig::default(), &shared);
                let mut io = BenchIo {
                    cv: [0.5, 0.4, 0.6, 0.5],
                    toggle: true,
                };
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    engine.process_block(
                        &mut io,
                        &mut NullDiag,
                        black_box(&mut left),
                        black_box(&mut right),
                    );
                });
            },
        );
    }

    // Worst case: every channel crosses a grid step every block.
    group.bench_function("moving_controls_32", |b| {
        let shared = SharedState::new(true);
        let mut engine = BlockEngine::new(EngineConfig::default(), &shared);
        let mut io = BenchIo {
            cv: [0.0; 4],
            toggle: true,
        };
        let input = generate_test_signal(32);
        let mut left = input.clone();
        let mut right = input.clone();
        let mut step = 0u32;
        b.iter(|| {
            step = step.wrapping_add(1);
            let x = (step % 50) as f32 / 50.0;
            io.cv = [x, x, x, x];
            left.copy_from_slice(&input);
            right.copy_from_slice(&input);
            engine.process_block(
                &mut io,
                &mut NullDiag,
                black_box(&mut left),
                black_box(&mut right),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_block_steady);
criterion_main!(benches);
