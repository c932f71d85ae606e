//! Offline bounce to WAV

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use drone_dsp::{DroneConfig, Pipeline, MAX_BLOCK_SIZE};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::{info, warn};

pub fn run(config: &DroneConfig, output: &Path, seconds: f32) -> EyreResult<()> {
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(eyre!("--seconds must be positive, got {seconds}"));
    }

    let mut pipeline = Pipeline::from_config(config)?;
    let spec = WavSpec {
        channels: 2,
        sample_rate: config.sample_rate as u32,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(output, spec)
        .wrap_err_with(|| format!("failed to create {}", output.display()))?;

    let total_frames = (seconds * config.sample_rate) as usize;
    let mut left = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut right = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut peak = 0.0f32;
    let mut frames_written = 0;
    let mut next_report = config.sample_rate as usize * 10;

    info!("rendering {seconds}s ({total_frames} frames) to {}", output.display());

    while frames_written < total_frames {
        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
        let (l, r) = (&mut left[..frames], &mut right[..frames]);
        pipeline.process_block(l, r);

        for (&l, &r) in l.iter().zip(r.iter()) {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
            peak = peak.max(l.abs()).max(r.abs());
        }
        frames_written += frames;

        if frames_written >= next_report {
            let snap = pipeline.snapshot();
            info!(
                "{:>6.1}s  note {:.2}  cutoff {:.0} Hz  q {:.1}  retunes {}",
                frames_written as f32 / config.sample_rate,
                snap.note,
                snap.cutoff_hz,
                snap.resonance,
                snap.retune_count
            );
            next_report += config.sample_rate as usize * 10;
        }
    }

    writer.finalize().wrap_err("failed to finalize wav")?;
    info!("done, peak {peak:.3}");
    if peak > 1.0 {
        warn!("output peaked at {peak:.3}; players will clip it");
    }
    Ok(())
}
