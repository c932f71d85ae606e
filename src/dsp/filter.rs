use std::f32::consts::PI;

use crate::error::{check_sample_rate, ConfigError};

/*
Resonant Low-Pass (TPT State-Variable Filter)
=============================================

A two-pole low-pass in the topology-preserving-transform form. It has the
same magnitude response as the bilinear "cookbook" biquad low-pass for a
given cutoff and Q, but its state lives in two integrators instead of past
input/output samples. That matters here: the drone rewrites cutoff and Q
on EVERY sample, and the SVF stays well behaved under that kind of
continuous modulation where a direct-form biquad can click or blow up.

Coefficients
------------

    g = tan(π · cutoff / sample_rate)     prewarped integrator gain
    k = 1 / Q                             damping
    h = 1 / (1 + g · (g + k))

Per sample:

    v3 = x - ic2eq
    v1 = h · (ic1eq + g · v3)             bandpass
    v2 = ic2eq + g · v1                   lowpass (the output)
    ic1eq = 2 · v1 - ic1eq
    ic2eq = 2 · v2 - ic2eq

Q here is the classic quality factor: 0.707 is flat (Butterworth), the gain
at the cutoff frequency equals Q. The drone sweeps Q between 10 and 25, so
expect a strong whistle at the cutoff.

The cutoff must stay below Nyquist; tan() runs off to infinity as the
cutoff approaches sample_rate / 2.
*/

/// Resonant low-pass whose coefficients can be replaced every sample.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    sample_rate: f32,
    cutoff_hz: f32,
    resonance: f32,

    g: f32,
    k: f32,
    h: f32,
}

impl LowPassFilter {
    pub fn new(sample_rate: f32, cutoff_hz: f32, resonance: f32) -> Result<Self, ConfigError> {
        let sample_rate = check_sample_rate(sample_rate)?;
        check_cutoff(cutoff_hz, sample_rate)?;
        check_resonance(resonance)?;

        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate,
            cutoff_hz,
            resonance,
            g: 0.0,
            k: 0.0,
            h: 0.0,
        };
        filter.set_params(cutoff_hz, resonance);
        Ok(filter)
    }

    /// Recompute the coefficients for a new cutoff (Hz) and Q.
    ///
    /// Unchecked: the caller keeps the cutoff inside (0, Nyquist) and Q
    /// positive. Safe to call once per sample.
    #[inline]
    pub fn set_params(&mut self, cutoff_hz: f32, resonance: f32) {
        self.cutoff_hz = cutoff_hz;
        self.resonance = resonance;
        self.g = (PI * cutoff_hz / self.sample_rate).tan();
        self.k = 1.0 / resonance;
        self.h = 1.0 / (1.0 + self.g * (self.g + self.k));
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) -> Result<(), ConfigError> {
        check_cutoff(cutoff_hz, self.sample_rate)?;
        self.set_params(cutoff_hz, self.resonance);
        Ok(())
    }

    pub fn set_resonance(&mut self, resonance: f32) -> Result<(), ConfigError> {
        check_resonance(resonance)?;
        self.set_params(self.cutoff_hz, resonance);
        Ok(())
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let v3 = sample - self.ic2eq;
        let v1 = self.h * (self.ic1eq + self.g * v3);
        let v2 = self.ic2eq + self.g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }
}

pub(crate) fn check_cutoff(cutoff_hz: f32, sample_rate: f32) -> Result<(), ConfigError> {
    let nyquist = sample_rate * 0.5;
    if cutoff_hz.is_finite() && cutoff_hz > 0.0 && cutoff_hz < nyquist {
        Ok(())
    } else {
        Err(ConfigError::InvalidCutoff {
            cutoff: cutoff_hz,
            nyquist,
        })
    }
}

pub(crate) fn check_resonance(resonance: f32) -> Result<(), ConfigError> {
    if resonance.is_finite() && resonance > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidResonance(resonance))
    }
}
