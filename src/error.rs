use thiserror::Error;

/// Raised while configuring components, before any audio is processed.
///
/// None of the `process` paths return this: once a component is built it can
/// be driven for the lifetime of the stream without failing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(f32),
    #[error("oscillator count must be at least 1")]
    InvalidOscillatorCount,
    #[error("frequency must be finite and non-negative, got {0}")]
    InvalidFrequency(f32),
    #[error("frequency {frequency} Hz is not below the sample rate {sample_rate} Hz")]
    FrequencyTooHigh { frequency: f32, sample_rate: f32 },
    #[error("delay buffer size must be at least 1 sample")]
    EmptyDelayBuffer,
    #[error("delay of {0} seconds must be finite and between 0 and {max} seconds", max = crate::drone::config::MAX_DELAY_SECONDS)]
    InvalidDelayTime(f32),
    #[error("delay time {delay} must be below the buffer size {size}")]
    DelayOutOfRange { delay: usize, size: usize },
    #[error("feedback must be in [0, 1), got {0}")]
    InvalidFeedback(f32),
    #[error("panning threshold must be in [0, 1), got {0}")]
    InvalidThreshold(f32),
    #[error("cutoff {cutoff} Hz must be positive and below Nyquist ({nyquist} Hz)")]
    InvalidCutoff { cutoff: f32, nyquist: f32 },
    #[error("resonance must be positive, got {0}")]
    InvalidResonance(f32),
    #[error("note range starting at {low} with span {span} is not a valid MIDI range")]
    InvalidNoteRange { low: f32, span: f32 },
    #[error("output gain must be finite and non-negative, got {0}")]
    InvalidGain(f32),
}

/// Shared sample rate check used by every component constructor.
pub(crate) fn check_sample_rate(sample_rate: f32) -> Result<f32, ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(ConfigError::InvalidSampleRate(sample_rate))
    }
}
