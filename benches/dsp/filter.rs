//! Benchmarks for the TPT low-pass, static and swept.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_dsp::dsp::filter::LowPassFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Coefficients fixed across the block
        let mut filter = LowPassFilter::new(48_000.0, 1_000.0, 0.707).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Coefficients rebuilt every sample, as the drone's sweep does (tan per sample)
        let mut filter = LowPassFilter::new(48_000.0, 1_000.0, 10.0).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &x)) in buffer.iter_mut().zip(&input).enumerate() {
                    filter.set_params(600.0 + i as f32, 15.0);
                    *out = filter.next_sample(black_box(x));
                }
            })
        });
    }

    group.finish();
}
