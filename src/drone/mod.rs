//! The drone instrument: components built from the `dsp` primitives and the
//! per-sample pipeline that wires them together.
//!
//! Construction is fallible and happens once; after that every `process`
//! call is total and realtime-safe.

/// Harmonic oscillator bank with in-place retuning.
pub mod additive;
/// Construction parameters and the default preset.
pub mod config;
/// Low-pass swept by two LFOs, fed through an amplitude carrier.
pub mod modulated_filter;
/// Phase-override auto-panner with a gain floor.
pub mod panner;
/// Per-sample orchestration of the whole signal chain.
pub mod pipeline;

pub use additive::{midi_note_to_freq, AdditiveSynth};
pub use config::{DelayConfig, DroneConfig, FilterConfig, PannerConfig, SynthConfig, TriggerConfig};
pub use modulated_filter::ResonantFilterModulator;
pub use panner::{pan_gains, AutoPanner};
pub use pipeline::{Pipeline, PipelineSnapshot};
