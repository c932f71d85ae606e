use crate::dsp::oscillator::PhaseOscillator;
use crate::error::ConfigError;

/*
Additive Harmonic Bank
======================

A fixed bank of sine oscillators tuned to the harmonic series of one
fundamental:

    harmonic i   frequency        gain
    0            1 × f0           1/2
    1            2 × f0           1/4
    2            3 × f0           1/6
    ...          (i+1) × f0       1 / (2(i+1))

The weighted sum is then divided by the number of oscillators, so adding
harmonics thickens the timbre without making it much louder.

Retuning rescales every harmonic's frequency in place. Phases are NOT
reset, so each retune produces a small discontinuity; the drone relies on
that for its shifting, slightly grainy texture.
*/

/// Convert a (possibly fractional) MIDI note number to Hz. A4 = 69 = 440 Hz.
#[inline]
pub fn midi_note_to_freq(note: f32) -> f32 {
    440.0 * 2.0_f32.powf((note - 69.0) / 12.0)
}

pub struct AdditiveSynth {
    oscillators: Vec<PhaseOscillator>,
    note: f32,
}

impl AdditiveSynth {
    pub fn new(
        sample_rate: f32,
        oscillator_count: usize,
        fundamental_note: f32,
    ) -> Result<Self, ConfigError> {
        if oscillator_count == 0 {
            return Err(ConfigError::InvalidOscillatorCount);
        }

        let fundamental = midi_note_to_freq(fundamental_note);
        let oscillators = (0..oscillator_count)
            .map(|i| {
                PhaseOscillator::sine(sample_rate)?.with_frequency((i + 1) as f32 * fundamental)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            oscillators,
            note: fundamental_note,
        })
    }

    /// Check that every harmonic of `note` can run at this bank's sample
    /// rate, without retuning.
    pub fn check_note(&self, note: f32) -> Result<(), ConfigError> {
        let top = self.oscillators.len() as f32 * midi_note_to_freq(note);
        let sample_rate = self.sample_rate();
        if top.is_finite() && top < sample_rate {
            Ok(())
        } else {
            Err(ConfigError::FrequencyTooHigh {
                frequency: top,
                sample_rate,
            })
        }
    }

    /// Retune every harmonic to a new fundamental, keeping phases.
    ///
    /// Does not allocate or fail; pass notes already vetted with
    /// [`check_note`](Self::check_note).
    pub fn set_frequencies(&mut self, midi_note: f32) {
        let fundamental = midi_note_to_freq(midi_note);
        for (i, osc) in self.oscillators.iter_mut().enumerate() {
            osc.retune((i + 1) as f32 * fundamental);
        }
        self.note = midi_note;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let mut output = 0.0;
        for (i, osc) in self.oscillators.iter_mut().enumerate() {
            let tone_gain = 1.0 / (2 * (i + 1)) as f32;
            output += tone_gain * osc.process();
        }
        output / self.oscillators.len() as f32
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process();
        }
    }

    /// Put every harmonic at the same phase.
    pub fn reset_phases(&mut self, phase: f32) {
        for osc in &mut self.oscillators {
            osc.set_phase(phase);
        }
    }

    pub fn oscillator_count(&self) -> usize {
        self.oscillators.len()
    }

    pub fn note(&self) -> f32 {
        self.note
    }

    pub fn fundamental(&self) -> f32 {
        self.oscillators[0].frequency()
    }

    pub fn sample_rate(&self) -> f32 {
        self.oscillators[0].sample_rate()
    }

    pub fn harmonic_frequencies(&self) -> impl Iterator<Item = f32> + '_ {
        self.oscillators.iter().map(PhaseOscillator::frequency)
    }
}
