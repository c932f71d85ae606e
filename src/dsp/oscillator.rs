use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_sample_rate, ConfigError};

/*
Phase Accumulating Oscillator
=============================

Every oscillator in the drone is the same machine: a phase in [0, 1) that
advances by a fixed increment each sample, and a waveform function that
turns the phase into an output value.

    phase_delta = frequency / sample_rate

    each sample:
        phase += phase_delta
        if phase >= 1.0 { phase -= 1.0 }
        output = waveform(phase)

The wrap is a single subtraction, so it only holds while phase_delta < 1.0,
i.e. while the frequency stays below the sample rate. Constructors reject
frequencies that break this.

Note that the phase is advanced BEFORE the waveform is evaluated, so the
first sample after a reset is waveform(phase_delta), not waveform(0).

Waveforms
---------

    kind       output(phase)              range
    sine       sin(2π·phase)              [-1, 1]
    triangle   |phase - 0.5| - 0.5        [-0.5, 0]
    saw        phase - 0.5                [-0.5, 0.5]
    square     +0.5 if phase <= 0.5       {-0.5, 0.5}
               -0.5 otherwise

The triangle is unipolar-negative and the saw/square are half amplitude.
These ranges are part of the instrument's gain staging; do not normalize.

Writing the phase directly (`set_phase`) is allowed at any time. The panner
uses it to slam a raw sine value into another oscillator's phase, which can
leave the phase outside [0, 1) until the next wrap. The waveform functions
are defined for any real phase, so that is harmless.
*/

/// Closed set of waveform shapes, evaluated as a pure function of phase.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
}

impl Waveform {
    #[inline]
    pub fn evaluate(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => (phase - 0.5).abs() - 0.5,
            Waveform::Saw => phase - 0.5,
            Waveform::Square => {
                if phase <= 0.5 {
                    0.5
                } else {
                    -0.5
                }
            }
        }
    }
}

/// Phase accumulator producing one waveform value per call to [`process`].
///
/// An oscillator always carries a validated sample rate, so the phase
/// increment is well defined from the moment it exists.
///
/// [`process`]: PhaseOscillator::process
#[derive(Debug, Clone)]
pub struct PhaseOscillator {
    waveform: Waveform,
    sample_rate: f32,
    frequency: f32,
    phase: f32,
    phase_delta: f32,
}

impl PhaseOscillator {
    pub fn new(waveform: Waveform, sample_rate: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            waveform,
            sample_rate: check_sample_rate(sample_rate)?,
            frequency: 0.0,
            phase: 0.0,
            phase_delta: 0.0,
        })
    }

    pub fn sine(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(Waveform::Sine, sample_rate)
    }

    pub fn triangle(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(Waveform::Triangle, sample_rate)
    }

    pub fn saw(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(Waveform::Saw, sample_rate)
    }

    pub fn square(sample_rate: f32) -> Result<Self, ConfigError> {
        Self::new(Waveform::Square, sample_rate)
    }

    /// Builder form of [`set_frequency`](Self::set_frequency).
    pub fn with_frequency(mut self, frequency: f32) -> Result<Self, ConfigError> {
        self.set_frequency(frequency)?;
        Ok(self)
    }

    /// Builder form of [`set_phase`](Self::set_phase).
    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Change the sample rate and rescale the phase increment to match.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), ConfigError> {
        let sample_rate = check_sample_rate(sample_rate)?;
        check_frequency(self.frequency, sample_rate)?;
        self.sample_rate = sample_rate;
        self.phase_delta = self.frequency / sample_rate;
        Ok(())
    }

    /// Set the frequency in Hz. It must stay strictly below the sample rate
    /// so one wrap per sample is enough.
    pub fn set_frequency(&mut self, frequency: f32) -> Result<(), ConfigError> {
        check_frequency(frequency, self.sample_rate)?;
        self.retune(frequency);
        Ok(())
    }

    /// Unchecked retune for the audio path. Callers validate the reachable
    /// frequency range at setup.
    #[inline]
    pub(crate) fn retune(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.phase_delta = frequency / self.sample_rate;
    }

    #[inline]
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        self.phase += self.phase_delta;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.waveform.evaluate(self.phase)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process();
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_delta(&self) -> f32 {
        self.phase_delta
    }
}

// Negative rates would walk the phase below zero, where the single upward
// wrap never catches it.
fn check_frequency(frequency: f32, sample_rate: f32) -> Result<(), ConfigError> {
    if !(frequency.is_finite() && frequency >= 0.0) {
        return Err(ConfigError::InvalidFrequency(frequency));
    }
    if frequency < sample_rate {
        Ok(())
    } else {
        Err(ConfigError::FrequencyTooHigh {
            frequency,
            sample_rate,
        })
    }
}
