//! drone - generative ambient drone, live or bounced to disk
//!
//! Run with: cargo run -- play
//!       or: cargo run -- render drone.wav --seconds 60

mod app;
mod render;
mod ui;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use drone_dsp::DroneConfig;

#[derive(Parser)]
#[command(name = "drone", version, about = "Generative ambient drone synthesizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play through the default output device with a live scope
    Play {
        /// TOML preset; missing keys fall back to the built-in drone
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render to a 32-bit float stereo WAV file
    Render {
        output: PathBuf,
        #[arg(long, default_value_t = 30.0)]
        seconds: f32,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Overrides the preset's note seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    // Pipeline setup logs before the TUI takes the screen, so `play` shows them too.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli.command {
        Command::Play { config } => app::run(load_config(config.as_deref())?),
        Command::Render {
            output,
            seconds,
            config,
            seed,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                config.seed = seed;
            }
            render::run(&config, &output, seconds)
        }
    }
}

fn load_config(path: Option<&Path>) -> EyreResult<DroneConfig> {
    let Some(path) = path else {
        return Ok(DroneConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).wrap_err_with(|| format!("failed to parse config {}", path.display()))
}
