use crate::dsp::filter::{check_cutoff, check_resonance, LowPassFilter};
use crate::dsp::oscillator::PhaseOscillator;
use crate::error::ConfigError;

/*
Swept Resonant Filter with Amplitude Carrier
============================================

    input ──► × carrier (triangle) ──► low-pass ──► out
                                          ▲   ▲
                          cutoff LFO ─────┘   └───── resonance LFO
                            (sine)                    (sine)

Every sample, before filtering:

    cutoff    = lfo_cutoff × 500 + 1100        ∈ [600, 1600] Hz
    resonance = (3 + lfo_resonance) × 5        ∈ [10, 25]

and the filter coefficients are rebuilt from those two values. Nothing is
cached across samples: the LFOs move continuously, so yesterday's
coefficients are always stale.

The carrier multiplies the input (amplitude modulation). It is a triangle
whose output lives in [-0.5, 0], so it both attenuates and inverts the
signal, breathing in and out at the carrier rate.

The two LFOs start at phases 0.55 and 0.77 so the cutoff and resonance
sweeps begin out of step with each other.

The configured base cutoff and resonance only seed the filter before the
first sample; from then on the sweep formulas above own both values.
*/

const CUTOFF_CENTER_HZ: f32 = 1_100.0;
const CUTOFF_DEPTH_HZ: f32 = 500.0;
const RESONANCE_OFFSET: f32 = 3.0;
const RESONANCE_SCALE: f32 = 5.0;

const CUTOFF_LFO_PHASE: f32 = 0.55;
const RESONANCE_LFO_PHASE: f32 = 0.77;

/// Highest cutoff the sweep can reach. The sample rate must put Nyquist above it.
pub const MAX_SWEPT_CUTOFF_HZ: f32 = CUTOFF_CENTER_HZ + CUTOFF_DEPTH_HZ;

pub struct ResonantFilterModulator {
    carrier: PhaseOscillator,
    lfo_cutoff: PhaseOscillator,
    lfo_resonance: PhaseOscillator,
    filter: LowPassFilter,
}

impl ResonantFilterModulator {
    pub fn new(
        sample_rate: f32,
        carrier_hz: f32,
        cutoff_lfo_hz: f32,
        base_cutoff_hz: f32,
        resonance_lfo_hz: f32,
        base_resonance: f32,
    ) -> Result<Self, ConfigError> {
        check_cutoff(MAX_SWEPT_CUTOFF_HZ, sample_rate)?;
        check_resonance(base_resonance)?;

        let carrier = PhaseOscillator::triangle(sample_rate)?.with_frequency(carrier_hz)?;
        let lfo_cutoff = PhaseOscillator::sine(sample_rate)?
            .with_frequency(cutoff_lfo_hz)?
            .with_phase(CUTOFF_LFO_PHASE);
        let lfo_resonance = PhaseOscillator::sine(sample_rate)?
            .with_frequency(resonance_lfo_hz)?
            .with_phase(RESONANCE_LFO_PHASE);
        let filter = LowPassFilter::new(sample_rate, base_cutoff_hz, base_resonance)?;

        Ok(Self {
            carrier,
            lfo_cutoff,
            lfo_resonance,
            filter,
        })
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let cutoff = self.lfo_cutoff.process() * CUTOFF_DEPTH_HZ + CUTOFF_CENTER_HZ;
        let resonance = (RESONANCE_OFFSET + self.lfo_resonance.process()) * RESONANCE_SCALE;
        self.filter.set_params(cutoff, resonance);

        let modulated = self.carrier.process() * sample;
        self.filter.next_sample(modulated)
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Cutoff applied on the most recent sample (the base cutoff before any).
    pub fn cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz()
    }

    /// Resonance (Q) applied on the most recent sample.
    pub fn resonance(&self) -> f32 {
        self.filter.resonance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone_filter(sample_rate: f32) -> ResonantFilterModulator {
        ResonantFilterModulator::new(sample_rate, 0.5, 0.04, 220.0, 0.0025, 5.0).unwrap()
    }

    #[test]
    fn seeds_from_base_values() {
        let filter = drone_filter(48_000.0);
        assert_eq!(filter.cutoff_hz(), 220.0);
        assert_eq!(filter.resonance(), 5.0);
    }

    #[test]
    fn sweeps_stay_in_range() {
        // Fast LFOs so the test covers full cycles of both sweeps.
        let mut filter = ResonantFilterModulator::new(8_000.0, 3.0, 7.0, 220.0, 11.0, 5.0).unwrap();
        let (mut min_cut, mut max_cut) = (f32::MAX, f32::MIN);
        let (mut min_res, mut max_res) = (f32::MAX, f32::MIN);
        for _ in 0..8_000 {
            filter.process(0.1);
            let cutoff = filter.cutoff_hz();
            let resonance = filter.resonance();
            assert!((600.0 - 1e-3..=1_600.0 + 1e-3).contains(&cutoff), "cutoff {cutoff}");
            assert!((10.0 - 1e-4..=25.0 + 1e-4).contains(&resonance), "resonance {resonance}");
            min_cut = min_cut.min(cutoff);
            max_cut = max_cut.max(cutoff);
            min_res = min_res.min(resonance);
            max_res = max_res.max(resonance);
        }
        assert!(min_cut < 610.0 && max_cut > 1_590.0, "cutoff swept {min_cut}..{max_cut}");
        assert!(min_res < 10.5 && max_res > 24.5, "resonance swept {min_res}..{max_res}");
    }

    #[test]
    fn lfos_start_decorrelated() {
        let mut filter = drone_filter(48_000.0);
        filter.process(0.0);
        // First sample evaluates each LFO just past its seed phase.
        let expected_cutoff = (std::f32::consts::TAU * 0.55).sin() * 500.0 + 1_100.0;
        let expected_res = (3.0 + (std::f32::consts::TAU * 0.77).sin()) * 5.0;
        assert!((filter.cutoff_hz() - expected_cutoff).abs() < 0.1);
        assert!((filter.resonance() - expected_res).abs() < 0.01);
    }

    #[test]
    fn silence_in_silence_out() {
        let mut filter = drone_filter(48_000.0);
        let mut buffer = vec![0.0; 1_000];
        filter.render(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn modulated_output_is_finite() {
        let mut filter = drone_filter(48_000.0);
        for i in 0..48_000 {
            let x = (i as f32 * 0.05).sin() * 0.5;
            let y = filter.process(x);
            assert!(y.is_finite(), "sample {i}: {y}");
        }
    }

    #[test]
    fn rejects_sample_rates_below_sweep() {
        assert!(matches!(
            ResonantFilterModulator::new(3_000.0, 0.5, 0.04, 220.0, 0.0025, 5.0),
            Err(ConfigError::InvalidCutoff { .. })
        ));
        assert!(ResonantFilterModulator::new(48_000.0, 0.5, 0.04, 220.0, 0.0025, -1.0).is_err());
    }
}
