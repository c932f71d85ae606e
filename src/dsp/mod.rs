//! Low-level DSP primitives used by the drone components.
//!
//! These components are allocation-free once built and realtime-safe, making
//! them safe to embed directly inside larger processors. They stay focused on
//! the signal-processing math; the `drone` layer composes and modulates them.

/// Circular-buffer feedback delay.
pub mod delay;
/// Topology-preserving resonant low-pass filter.
pub mod filter;
/// LFO conversions and timing helpers.
pub mod lfo;
/// Phase accumulator and waveform shapes.
pub mod oscillator;
/// Square-wave trigger clock.
pub mod pulse;

pub use delay::FeedbackDelayLine;
pub use filter::LowPassFilter;
pub use oscillator::{PhaseOscillator, Waveform};
pub use pulse::{PulseGenerator, TriggerMode};
