#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::pulse::TriggerMode;
use crate::error::{check_sample_rate, ConfigError};

/// Longest delay buffer a config may ask for.
pub const MAX_DELAY_SECONDS: f32 = 60.0;

/// Complete construction parameters for a [`Pipeline`](super::Pipeline).
///
/// `Default` is the shipped drone preset. Every field has a default, so with
/// the `serde` feature a config file only needs the values it changes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct DroneConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: f32,
    /// Gain applied to the additive bank before filtering.
    pub output_gain: f32,
    /// Seed for the retune note generator.
    pub seed: u64,
    pub synth: SynthConfig,
    pub trigger: TriggerConfig,
    pub filter: FilterConfig,
    pub delay: DelayConfig,
    pub panner: PannerConfig,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub oscillator_count: usize,
    pub fundamental_note: f32,
}

/// Retune clock. Each trigger draws a note uniformly from
/// `[note_low, note_low + note_span)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerConfig {
    pub rate_hz: f32,
    pub note_low: f32,
    pub note_span: f32,
    pub mode: TriggerMode,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub carrier_hz: f32,
    pub cutoff_lfo_hz: f32,
    pub base_cutoff_hz: f32,
    pub resonance_lfo_hz: f32,
    pub base_resonance: f32,
}

/// Delay times are given in seconds and rounded down to whole samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct DelayConfig {
    pub buffer_seconds: f32,
    pub delay_seconds: f32,
    pub feedback: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct PannerConfig {
    pub pan_hz: f32,
    pub modulation_hz: f32,
    pub threshold: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            output_gain: 0.85,
            seed: 0x5eed,
            synth: SynthConfig::default(),
            trigger: TriggerConfig::default(),
            filter: FilterConfig::default(),
            delay: DelayConfig::default(),
            panner: PannerConfig::default(),
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            oscillator_count: 10,
            fundamental_note: 60.0,
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            rate_hz: 0.04,
            note_low: 60.0,
            note_span: 4.0,
            mode: TriggerMode::RisingEdge,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            carrier_hz: 0.5,
            cutoff_lfo_hz: 0.04,
            base_cutoff_hz: 220.0,
            resonance_lfo_hz: 0.0025,
            base_resonance: 5.0,
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            buffer_seconds: 10.0,
            delay_seconds: 0.6,
            feedback: 0.4,
        }
    }
}

impl Default for PannerConfig {
    fn default() -> Self {
        Self {
            pan_hz: 0.25,
            modulation_hz: 0.00357,
            threshold: 0.122,
        }
    }
}

impl DroneConfig {
    /// Same preset, rebound to another sample rate (e.g. the output device's).
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Checks that need the whole config rather than a single component.
    ///
    /// Component constructors validate their own parameters; this catches
    /// the rest before anything is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_sample_rate(self.sample_rate)?;

        if !(self.output_gain.is_finite() && self.output_gain >= 0.0) {
            return Err(ConfigError::InvalidGain(self.output_gain));
        }

        let TriggerConfig {
            note_low,
            note_span,
            ..
        } = self.trigger;
        if !(note_low.is_finite() && note_span.is_finite() && note_span >= 0.0 && note_low >= 0.0)
            || note_low + note_span > 128.0
        {
            return Err(ConfigError::InvalidNoteRange {
                low: note_low,
                span: note_span,
            });
        }

        for seconds in [self.delay.buffer_seconds, self.delay.delay_seconds] {
            if !(seconds.is_finite() && (0.0..=MAX_DELAY_SECONDS).contains(&seconds)) {
                return Err(ConfigError::InvalidDelayTime(seconds));
            }
        }
        let (size, delay) = self.delay.sizes(self.sample_rate);
        if size == 0 {
            return Err(ConfigError::EmptyDelayBuffer);
        }
        if delay >= size {
            return Err(ConfigError::DelayOutOfRange { delay, size });
        }
        if !(0.0..1.0).contains(&self.delay.feedback) {
            return Err(ConfigError::InvalidFeedback(self.delay.feedback));
        }
        if !(0.0..1.0).contains(&self.panner.threshold) {
            return Err(ConfigError::InvalidThreshold(self.panner.threshold));
        }

        Ok(())
    }
}

impl DelayConfig {
    /// Buffer size and delay time in samples at `sample_rate`.
    pub fn sizes(&self, sample_rate: f32) -> (usize, usize) {
        let to_samples = |seconds: f32| (seconds.max(0.0) * sample_rate) as usize;
        (to_samples(self.buffer_seconds), to_samples(self.delay_seconds))
    }
}
