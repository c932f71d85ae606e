//! Scenario benchmarks: the drone's own building blocks at realistic sizes.

mod drone;

pub use drone::{bench_additive, bench_pipeline};
