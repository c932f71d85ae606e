//! TUI for live playback
//!
//! Scope, spectrum and a status bar fed from the audio thread via rings.

mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use drone_dsp::{DroneConfig, PipelineSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats, StaticInfo};
use waveform::render_waveform;

/// Scope window and FFT size
pub const VIS_BUFFER_SIZE: usize = 1024;

pub struct UiApp {
    audio_rx: Consumer<f32>,
    snapshot_rx: Consumer<PipelineSnapshot>,
    info: StaticInfo,
    snapshot: PipelineSnapshot,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        snapshot_rx: Consumer<PipelineSnapshot>,
        config: &DroneConfig,
    ) -> Self {
        Self {
            audio_rx,
            snapshot_rx,
            info: StaticInfo::from_config(config),
            snapshot: PipelineSnapshot {
                note: config.synth.fundamental_note,
                ..PipelineSnapshot::default()
            },
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, config.sample_rate),
            should_quit: false,
        }
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_snapshot();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Drain the sample ring, keeping the last `VIS_BUFFER_SIZE` samples.
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        self.audio_buffer.reserve(available);
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    fn poll_snapshot(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            self.snapshot = snapshot;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status bar
                Constraint::Min(8),     // Waveform
                Constraint::Length(12), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, chunks[0], &self.info, &self.snapshot, &stats);
        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(" [Q] Quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
