use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::dsp::delay::FeedbackDelayLine;
use crate::dsp::lfo::samples_per_period;
use crate::dsp::pulse::PulseGenerator;
use crate::error::ConfigError;
use crate::io::{AudioOutput, StereoFrame};

use super::additive::AdditiveSynth;
use super::config::DroneConfig;
use super::modulated_filter::ResonantFilterModulator;
use super::panner::AutoPanner;

/*
Per-Sample Signal Flow
======================

    pulse ──fires?──► draw note ──► retune synth
                                        │
    synth × gain ──► filter/AM ──► feedback delay ──► × pan gains ──► (L, R)

For every output frame, strictly in order:

  1. advance the pulse generator; on a trigger draw a random note in
     [note_low, note_low + note_span) and retune the additive bank
  2. one additive sample, times the output gain
  3. through the swept resonant filter (with amplitude carrier)
  4. through the feedback delay
  5. advance the panner
  6. left = left_gain × sample, right = right_gain × sample

Everything is allocated in `Pipeline::new`. The per-sample path has no
error returns, no allocation, no locks and no logging. The random source
is owned by the pipeline and injected at construction, so a seeded
generator gives bit-identical output run to run.

Output is not limited: a resonant filter peak or the panner's floor can
push samples past ±1. Downstream code should clip or limit if it cares.
*/

/// Read-only view of the pipeline's modulation state, cheap to copy out of
/// the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineSnapshot {
    pub note: f32,
    pub retune_count: u64,
    pub cutoff_hz: f32,
    pub resonance: f32,
    pub left_gain: f32,
    pub right_gain: f32,
}

pub struct Pipeline<R = Pcg32> {
    trigger: PulseGenerator,
    synth: AdditiveSynth,
    filter: ResonantFilterModulator,
    delay: FeedbackDelayLine,
    panner: AutoPanner,
    rng: R,
    output_gain: f32,
    note_low: f32,
    note_span: f32,
    retune_count: u64,
}

impl Pipeline<Pcg32> {
    /// Build a pipeline whose note generator is seeded from `config.seed`.
    pub fn from_config(config: &DroneConfig) -> Result<Self, ConfigError> {
        Self::new(config, Pcg32::seed_from_u64(config.seed))
    }
}

impl<R: Rng> Pipeline<R> {
    pub fn new(config: &DroneConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let sample_rate = config.sample_rate;

        let synth = AdditiveSynth::new(
            sample_rate,
            config.synth.oscillator_count,
            config.synth.fundamental_note,
        )?;
        // Every note the trigger can draw must be playable without aliasing.
        synth.check_note(config.trigger.note_low + config.trigger.note_span)?;
        debug!(
            "additive bank: {} harmonics from {:.2} Hz",
            synth.oscillator_count(),
            synth.fundamental()
        );

        let trigger = PulseGenerator::new(sample_rate, config.trigger.rate_hz, config.trigger.mode)?;
        debug!(
            "retune clock: {:?} every {:.0} samples, notes {}..{}",
            trigger.mode(),
            samples_per_period(config.trigger.rate_hz, sample_rate),
            config.trigger.note_low,
            config.trigger.note_low + config.trigger.note_span
        );

        let f = &config.filter;
        let filter = ResonantFilterModulator::new(
            sample_rate,
            f.carrier_hz,
            f.cutoff_lfo_hz,
            f.base_cutoff_hz,
            f.resonance_lfo_hz,
            f.base_resonance,
        )?;

        let (size, delay_samples) = config.delay.sizes(sample_rate);
        let exact_delay = config.delay.delay_seconds * sample_rate;
        if exact_delay - delay_samples as f32 > 0.01 {
            warn!(
                "delay of {}s is {exact_delay} samples, truncated to {delay_samples}",
                config.delay.delay_seconds
            );
        }
        let mut delay = FeedbackDelayLine::new(size)?;
        delay.set_delay_time_in_samples(delay_samples)?;
        delay.set_feedback(config.delay.feedback)?;
        debug!(
            "delay: {size} samples, tap at {delay_samples}, feedback {}",
            delay.feedback()
        );

        let p = &config.panner;
        let panner = AutoPanner::new(sample_rate, p.pan_hz, p.modulation_hz, p.threshold)?;

        info!(
            "drone pipeline ready at {sample_rate} Hz (gain {}, seed {})",
            config.output_gain, config.seed
        );

        Ok(Self {
            trigger,
            synth,
            filter,
            delay,
            panner,
            rng,
            output_gain: config.output_gain,
            note_low: config.trigger.note_low,
            note_span: config.trigger.note_span,
            retune_count: 0,
        })
    }

    /// Produce the next stereo frame.
    #[inline]
    pub fn process_frame(&mut self) -> StereoFrame {
        if self.trigger.process() {
            let note = self.note_low + self.rng.random::<f32>() * self.note_span;
            self.synth.set_frequencies(note);
            self.retune_count += 1;
        }

        let sample = self.output_gain * self.synth.process();
        let sample = self.filter.process(sample);
        let sample = self.delay.process(sample);
        self.panner.process();

        StereoFrame {
            left: self.panner.left() * sample,
            right: self.panner.right() * sample,
        }
    }

    /// Fill separate left/right buffers. Renders `min(left.len(), right.len())`
    /// frames.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let frame = self.process_frame();
            *l = frame.left;
            *r = frame.right;
        }
    }

    /// Fill an interleaved device buffer. Channel 0 is left and channel 1
    /// right; a mono buffer gets the average and extra channels are silenced.
    pub fn process_interleaved(&mut self, data: &mut [f32], channels: usize) {
        // chunks_exact_mut panics on zero
        if channels == 0 {
            return;
        }
        for frame in data.chunks_exact_mut(channels) {
            let out = self.process_frame();
            match frame {
                [mono] => *mono = (out.left + out.right) * 0.5,
                [left, right, rest @ ..] => {
                    *left = out.left;
                    *right = out.right;
                    rest.fill(0.0);
                }
                _ => {}
            }
        }
    }

    /// Offline convenience: render `frames` frames into fresh buffers.
    ///
    /// Allocates, so keep it off the audio thread.
    pub fn render(&mut self, frames: usize) -> AudioOutput {
        let mut output = AudioOutput::with_frames(frames);
        self.process_block(&mut output.left, &mut output.right);
        output
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        PipelineSnapshot {
            note: self.synth.note(),
            retune_count: self.retune_count,
            cutoff_hz: self.filter.cutoff_hz(),
            resonance: self.filter.resonance(),
            left_gain: self.panner.left(),
            right_gain: self.panner.right(),
        }
    }

    pub fn current_note(&self) -> f32 {
        self.synth.note()
    }

    pub fn retune_count(&self) -> u64 {
        self.retune_count
    }

    pub fn sample_rate(&self) -> f32 {
        self.synth.sample_rate()
    }

    pub fn synth(&self) -> &AdditiveSynth {
        &self.synth
    }

    pub fn filter(&self) -> &ResonantFilterModulator {
        &self.filter
    }

    pub fn delay(&self) -> &FeedbackDelayLine {
        &self.delay
    }

    pub fn panner(&self) -> &AutoPanner {
        &self.panner
    }
}
