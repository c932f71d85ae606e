//! Benchmarks for phase-accumulator waveforms.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_dsp::dsp::oscillator::{PhaseOscillator, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let waveforms = [
        ("sine", Waveform::Sine),
        ("triangle", Waveform::Triangle),
        ("saw", Waveform::Saw),
        ("square", Waveform::Square),
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in waveforms {
            let mut osc = PhaseOscillator::new(waveform, 48_000.0)
                .and_then(|osc| osc.with_frequency(440.0))
                .unwrap();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| osc.render(black_box(&mut buffer)))
            });
        }
    }

    group.finish();
}
