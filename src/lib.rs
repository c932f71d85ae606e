pub mod drone; // Instrument components and the per-sample pipeline
pub mod dsp;
pub mod error;
pub mod io;

pub use drone::{DroneConfig, Pipeline, PipelineSnapshot};
pub use error::ConfigError;

/// Largest block the binary renders per device callback chunk.
pub const MAX_BLOCK_SIZE: usize = 2048;
