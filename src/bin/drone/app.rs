//! Live playback: audio callback owns the pipeline, the UI reads rings

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use drone_dsp::{DroneConfig, Pipeline, PipelineSnapshot};
use rtrb::{PushError, RingBuffer};

use super::ui::{UiApp, VIS_BUFFER_SIZE};

/// Capacity in analysis windows for the audio→UI sample ring
const AUDIO_RING_BLOCKS: usize = 16;

pub fn run(config: DroneConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = (stream_config.channels() as usize).max(1);

    // Presets are written for 48 kHz; follow whatever the device runs at.
    let config = config.with_sample_rate(sample_rate);
    let mut pipeline = Pipeline::from_config(&config)?;

    let (audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);
    let (snapshot_tx, snapshot_rx) = RingBuffer::<PipelineSnapshot>::new(64);

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            {
                let mut audio_tx = audio_tx;
                let mut snapshot_tx = snapshot_tx;
                move |data: &mut [f32], _| {
                    pipeline.process_interleaved(data, channels);

                    // Mono fold-down for the scope, drop on overflow
                    for frame in data.chunks_exact(channels) {
                        let mono = match frame {
                            [left, right, ..] => (left + right) * 0.5,
                            [mono] => *mono,
                            [] => 0.0,
                        };
                        if let Err(PushError::Full(_)) = audio_tx.push(mono) {
                            break;
                        }
                    }

                    let _ = snapshot_tx.push(pipeline.snapshot());
                }
            },
            move |err| eprintln!("Stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let terminal = ratatui::init();
    let res = UiApp::new(audio_rx, snapshot_rx, &config).run(terminal);
    ratatui::restore();
    res
}
