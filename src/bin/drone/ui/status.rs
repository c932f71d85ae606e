//! Status bar: what the drone is doing right now

use drone_dsp::{DroneConfig, PipelineSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Fixed for the lifetime of the stream
pub struct StaticInfo {
    pub sample_rate: f32,
    pub harmonics: usize,
    pub seed: u64,
}

impl StaticInfo {
    pub fn from_config(config: &DroneConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            harmonics: config.synth.oscillator_count,
            seed: config.seed,
        }
    }
}

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Rough L/R balance meter, e.g. `L ▮▮▮▮····· R`
fn pan_meter(left: f32, right: f32) -> String {
    const WIDTH: usize = 11;
    let total = left + right;
    let position = if total > 0.0 { right / total } else { 0.5 };
    let mark = ((position * (WIDTH - 1) as f32).round() as usize).min(WIDTH - 1);
    let bar: String = (0..WIDTH).map(|i| if i == mark { '●' } else { '·' }).collect();
    format!("L {bar} R")
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    info: &StaticInfo,
    snapshot: &PipelineSnapshot,
    stats: &AudioStats,
) {
    let block = Block::default().title(" drone ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" note {:.2}  ", snapshot.note),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("cutoff {:>4.0} Hz  q {:>4.1}  ", snapshot.cutoff_hz, snapshot.resonance),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{}  ", pan_meter(snapshot.left_gain, snapshot.right_gain)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("retunes {}  ", snapshot.retune_count),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "{:.1}kHz  {}×  seed {:#x}  ",
                info.sample_rate / 1000.0,
                info.harmonics,
                info.seed
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
