#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::PhaseOscillator;
use crate::error::ConfigError;

/// How the pulse output is turned into trigger events.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerMode {
    /// Fire once each time the square output crosses above zero.
    #[default]
    RisingEdge,
    /// Fire on every sample while the square output is above zero.
    Gate,
}

/// Square-wave oscillator used as a periodic trigger clock.
///
/// The generator starts low, so in `RisingEdge` mode the very first sample
/// fires (the square is high for the first half of every period).
#[derive(Debug, Clone)]
pub struct PulseGenerator {
    osc: PhaseOscillator,
    mode: TriggerMode,
    high: bool,
}

impl PulseGenerator {
    pub fn new(sample_rate: f32, rate_hz: f32, mode: TriggerMode) -> Result<Self, ConfigError> {
        let osc = PhaseOscillator::square(sample_rate)?.with_frequency(rate_hz)?;
        Ok(Self {
            osc,
            mode,
            high: false,
        })
    }

    /// Advance one sample and report whether a trigger fired.
    #[inline]
    pub fn process(&mut self) -> bool {
        let was_high = self.high;
        self.high = self.osc.process() > 0.0;
        match self.mode {
            TriggerMode::RisingEdge => self.high && !was_high,
            TriggerMode::Gate => self.high,
        }
    }

    pub fn reset(&mut self) {
        self.osc.set_phase(0.0);
        self.high = false;
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn rate_hz(&self) -> f32 {
        self.osc.frequency()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}
