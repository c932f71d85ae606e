//! Low Frequency Oscillator (LFO) helpers.

/*
Low Frequency Oscillators in the Drone
======================================

An LFO is the same phase accumulator as an audio oscillator, just slow
enough that you hear it as movement rather than pitch. The drone runs
several of them, all far below 1 Hz:

    role                   shape      rate       period
    filter cutoff sweep    sine       0.04 Hz    25 s
    filter resonance       sine       0.0025 Hz  400 s
    amplitude carrier      triangle   0.5 Hz     2 s
    retune clock           square     0.04 Hz    25 s
    pan position           sine       0.25 Hz    4 s
    pan phase override     sine       0.00357 Hz ~280 s

Because the rates are unrelated, the combined texture takes a very long
time to repeat. The cutoff and resonance LFOs additionally start at
different phases (0.55 and 0.77) so they never sweep in lock-step.

Bipolar to Unipolar Conversion
------------------------------

A sine LFO is bipolar (-1..+1). Gains want unipolar (0..1):

    unipolar = (bipolar + 1.0) * 0.5

    bipolar   unipolar
    -1.0      0.0
     0.0      0.5
    +1.0      1.0

The panner uses exactly this mapping to turn its oscillator into a
right-channel gain.
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Calculate samples per LFO period.
///
/// # Example
/// ```
/// use drone_dsp::dsp::lfo::samples_per_period;
/// let samples = samples_per_period(0.04, 48000.0);
/// assert_eq!(samples, 1_200_000.0); // one retune cycle every 25 s
/// ```
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bipolar_to_unipolar() {
        assert!((bipolar_to_unipolar(-1.0) - 0.0).abs() < 1e-6);
        assert!((bipolar_to_unipolar(0.0) - 0.5).abs() < 1e-6);
        assert!((bipolar_to_unipolar(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_samples_per_period() {
        assert!((samples_per_period(5.0, 48000.0) - 9600.0).abs() < 1e-6);
        assert!((samples_per_period(1.0, 48000.0) - 48000.0).abs() < 1e-6);
    }
}
