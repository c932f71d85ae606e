//! Spectrum analyzer widget
//!
//! Hann-windowed FFT, folded into log-spaced bands. The drone lives below a
//! few kHz, so the display stops at `MAX_DISPLAY_HZ`.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const BANDS: usize = 64;
const MIN_DISPLAY_HZ: f32 = 40.0;
const MAX_DISPLAY_HZ: f32 = 5_000.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range `[start, end)` per band
    bands: Vec<(usize, usize)>,
    /// (log10 Hz, dB) per band
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = fft_len.saturating_sub(1).max(1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let half = (fft_len / 2).max(1);
        let hz_per_bin = sample_rate / fft_len.max(1) as f32;
        let top = MAX_DISPLAY_HZ.min(sample_rate * 0.5).max(MIN_DISPLAY_HZ * 2.0);
        let ratio = top / MIN_DISPLAY_HZ;

        let mut bands = Vec::with_capacity(BANDS);
        let mut spectrum = Vec::with_capacity(BANDS);
        for b in 0..BANDS {
            let lo = MIN_DISPLAY_HZ * ratio.powf(b as f32 / BANDS as f32);
            let hi = MIN_DISPLAY_HZ * ratio.powf((b + 1) as f32 / BANDS as f32);
            let start = ((lo / hz_per_bin) as usize).min(half - 1);
            let end = ((hi / hz_per_bin).ceil() as usize).clamp(start + 1, half);
            bands.push((start, end));
            spectrum.push((((lo * hi).sqrt() as f64).log10(), FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bands,
            spectrum,
        }
    }

    /// Recompute from the latest window. Ignored unless `buffer` is exactly
    /// one FFT long.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &(start, end)) in self.spectrum.iter_mut().zip(&self.bands) {
            // Loudest bin in the band, so single harmonics don't get averaged away.
            let power = self.scratch[start..end]
                .iter()
                .map(|c| c.norm_sqr())
                .fold(1e-12f32, f32::max);
            point.1 = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let x_min = spectrum.first().map_or(1.0, |p| p.0);
    let x_max = spectrum.last().map_or(4.0, |p| p.0).max(x_min + 0.1);
    let max_db = spectrum.iter().map(|p| p.1).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec!["40", "440", "5k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
