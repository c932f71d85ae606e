//! The additive bank and the full stereo pipeline.
//!
//! Each block has to finish well inside its deadline (see the table in
//! `dsp_bench.rs`); the pipeline numbers are the ones that matter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_dsp::drone::AdditiveSynth;
use drone_dsp::{DroneConfig, Pipeline};

use crate::BLOCK_SIZES;

pub fn bench_additive(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/additive");

    for harmonics in [3usize, 10, 32] {
        let mut synth = AdditiveSynth::new(48_000.0, harmonics, 60.0).unwrap();
        let mut buffer = vec![0.0f32; 256];
        group.bench_with_input(
            BenchmarkId::new("harmonics", harmonics),
            &harmonics,
            |b, _| b.iter(|| synth.render(black_box(&mut buffer))),
        );
    }

    group.finish();
}

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pipeline");
    let config = DroneConfig::default();

    for &size in BLOCK_SIZES {
        let mut pipeline = Pipeline::from_config(&config).unwrap();
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("stereo_block", size), &size, |b, _| {
            b.iter(|| pipeline.process_block(black_box(&mut left), black_box(&mut right)))
        });

        // Interleaved stereo, what the cpal callback does
        let mut pipeline = Pipeline::from_config(&config).unwrap();
        let mut data = vec![0.0f32; size * 2];
        group.bench_with_input(BenchmarkId::new("interleaved", size), &size, |b, _| {
            b.iter(|| pipeline.process_interleaved(black_box(&mut data), 2))
        });
    }

    group.finish();
}
