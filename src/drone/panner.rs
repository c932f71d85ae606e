use crate::dsp::lfo::bipolar_to_unipolar;
use crate::dsp::oscillator::PhaseOscillator;
use crate::error::ConfigError;

/*
Self-Modulating Auto-Panner
===========================

Two sine oscillators: a "panning" oscillator whose output becomes the
right-channel gain, and a slow "modulator" that warps it.

The warp is unusual. Each sample, the modulator's raw output (a sine
value in [-1, 1]) is written straight into the panning oscillator's PHASE:

    panning.phase = modulator.process()
    raw           = (panning.process() + 1) × 0.5

This is neither FM nor PM. The panning oscillator never accumulates phase
of its own across samples; what you hear is sin(2π · (m + δ)) where m is
the modulator's current value and δ the panning increment. As m drifts
slowly through [-1, 1] the pan position swings through several cycles and
back, which gives the instrument its lazy, chorus-like stereo warble.
Keep it exactly like this.

Gain Floor
----------

    raw   = max(raw, threshold)
    right = raw
    left  = max(1 - raw, threshold)

Both channels therefore stay at or above `threshold`, so neither side
ever goes fully silent. Only the low side is clamped: when raw is near 1,
right ≈ 1 and left is floored at `threshold`, so left + right can exceed
1. That loudness bump at the extremes is part of the sound.
*/

/// Apply the threshold floor to a unipolar pan position, returning
/// `(right, left)`.
#[inline]
pub fn pan_gains(raw: f32, threshold: f32) -> (f32, f32) {
    let right = if raw <= threshold { threshold } else { raw };
    let left = 1.0 - right;
    let left = if left <= threshold { threshold } else { left };
    (right, left)
}

pub struct AutoPanner {
    panning: PhaseOscillator,
    modulator: PhaseOscillator,
    threshold: f32,
    right: f32,
    left: f32,
}

impl AutoPanner {
    const MODULATOR_PHASE: f32 = 0.25;

    pub fn new(
        sample_rate: f32,
        pan_hz: f32,
        modulation_hz: f32,
        threshold: f32,
    ) -> Result<Self, ConfigError> {
        check_threshold(threshold)?;

        let mut panning = PhaseOscillator::sine(sample_rate)?.with_frequency(pan_hz)?;
        let mut modulator = PhaseOscillator::sine(sample_rate)?
            .with_frequency(modulation_hz)?
            .with_phase(Self::MODULATOR_PHASE);

        // Seed the panning phase from one modulator step before the first sample.
        panning.set_phase(modulator.process());

        Ok(Self {
            panning,
            modulator,
            threshold,
            right: 0.0,
            left: 0.0,
        })
    }

    pub fn set_threshold(&mut self, threshold: f32) -> Result<(), ConfigError> {
        check_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    /// Advance one sample and update both channel gains.
    #[inline]
    pub fn process(&mut self) {
        self.panning.set_phase(self.modulator.process());
        let raw = bipolar_to_unipolar(self.panning.process());
        let (right, left) = pan_gains(raw, self.threshold);
        self.right = right;
        self.left = left;
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

fn check_threshold(threshold: f32) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn gains_respect_threshold_floor() {
        // Fast modulator so a short run covers the whole pan range.
        let mut panner = AutoPanner::new(1_000.0, 0.25, 1.0, 0.3).unwrap();
        for i in 0..5_000 {
            panner.process();
            assert!(panner.right() >= 0.3, "sample {i}: right {}", panner.right());
            assert!(panner.left() >= 0.3, "sample {i}: left {}", panner.left());
        }
    }

    #[test]
    fn extremes_sum_above_unity() {
        let (right, left) = pan_gains(0.95, 0.3);
        assert_eq!(right, 0.95);
        assert_eq!(left, 0.3);
        assert!(right + left > 1.0);

        let mut panner = AutoPanner::new(1_000.0, 0.25, 1.0, 0.3).unwrap();
        let mut max_sum = 0.0f32;
        for _ in 0..2_000 {
            panner.process();
            max_sum = max_sum.max(panner.left() + panner.right());
        }
        assert!(max_sum > 1.2, "expected the floor to push the pair past 1, got {max_sum}");
    }

    #[test]
    fn low_side_clamps_right() {
        assert_eq!(pan_gains(0.1, 0.3), (0.3, 0.7));
        assert_eq!(pan_gains(0.5, 0.0), (0.5, 0.5));
    }

    #[test]
    fn phase_is_overridden_by_modulator_output() {
        let sample_rate = 48_000.0;
        let (pan_hz, mod_hz) = (0.25, 0.00357);
        let mut panner = AutoPanner::new(sample_rate, pan_hz, mod_hz, 0.0).unwrap();

        // Reference: setup consumed one modulator step, process consumes the next.
        let mod_phase = 0.25 + 2.0 * mod_hz / sample_rate;
        let m = (TAU * mod_phase).sin();
        let raw = ((TAU * (m + pan_hz / sample_rate)).sin() + 1.0) * 0.5;

        panner.process();
        assert!(
            (panner.right() - raw).abs() < 1e-4,
            "expected {raw}, got {}",
            panner.right()
        );
        assert!((panner.left() - (1.0 - raw)).abs() < 1e-4);
    }

    #[test]
    fn validates_threshold() {
        assert_eq!(
            AutoPanner::new(48_000.0, 0.25, 0.1, 1.0).err(),
            Some(ConfigError::InvalidThreshold(1.0))
        );
        assert_eq!(
            AutoPanner::new(48_000.0, -0.25, 0.1, 0.122).err(),
            Some(ConfigError::InvalidFrequency(-0.25))
        );
        let mut panner = AutoPanner::new(48_000.0, 0.25, 0.1, 0.122).unwrap();
        assert!(panner.set_threshold(-0.1).is_err());
        assert_eq!(panner.threshold(), 0.122);
        panner.set_threshold(0.3).unwrap();
        assert_eq!(panner.threshold(), 0.3);
    }
}
