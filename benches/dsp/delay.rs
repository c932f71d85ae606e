//! Benchmarks for the feedback delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_dsp::dsp::delay::FeedbackDelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        28800, // 600ms, the drone preset
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let mut delay = FeedbackDelayLine::new(480_000).unwrap();
            delay.set_delay_time_in_samples(delay_samples).unwrap();
            delay.set_feedback(0.4).unwrap();
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_samples / 48), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.render(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
