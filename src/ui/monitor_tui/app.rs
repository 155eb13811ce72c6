use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::{KeyBindings, Settings};
use crate::core::system_monitor::{
    CompactAggregator, CompactSummary, MetricsAggregator, ProgressLine, SensorSet,
};
use crate::core::{ScreenRecorder, Screenshot};

use super::event_handler::{map_key, MonitorEvent};
use super::render::render_ui;

/// Monitor application state
pub struct MonitorApp {
    pub lines: Vec<ProgressLine>,
    pub summary: Option<CompactSummary>,
    pub compact: bool,
    pub should_quit: bool,
    pub status: Option<String>,
    pub interval: Duration,
    full_view: MetricsAggregator,
    compact_view: CompactAggregator,
    bindings: KeyBindings,
    recorder: ScreenRecorder,
    screenshot: Screenshot,
}

impl MonitorApp {
    pub fn new(sensors: Arc<SensorSet>, settings: &Settings, config: &MonitorAppConfig) -> Self {
        let poll = settings.poll_config_or_default();

        Self {
            lines: Vec::new(),
            summary: None,
            compact: config.start_compact,
            should_quit: false,
            status: None,
            interval: settings.refresh_interval(),
            full_view: MetricsAggregator::new(Arc::clone(&sensors), poll),
            compact_view: CompactAggregator::new(sensors, poll),
            bindings: settings.key_bindings(),
            recorder: ScreenRecorder::new(settings.recording(), config.recordings_dir.clone()),
            screenshot: Screenshot::new(settings.recording(), config.screenshots_dir.clone()),
        }
    }

    /// Poll the sensors for the active view. Blocks for the CPU interval.
    pub fn update_metrics(&mut self) {
        if self.compact {
            self.summary = Some(self.compact_view.collect_summary());
        } else {
            self.lines = self.full_view.collect();
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleCompact => {
                self.compact = !self.compact;
                self.update_metrics();
            }
            MonitorEvent::ToggleRecording => self.toggle_recording(),
            MonitorEvent::Screenshot => {
                self.status = Some(match self.screenshot.take() {
                    Ok(path) => format!("Screenshot saved: {}", path.display()),
                    Err(e) => format!("Screenshot failed: {}", e),
                });
            }
            MonitorEvent::None => {}
        }
    }

    fn toggle_recording(&mut self) {
        let status = if self.recorder.is_recording() {
            match self.recorder.stop() {
                Ok(Some(path)) => format!("Recording saved: {}", path.display()),
                Ok(None) => "Recording stopped".to_string(),
                Err(e) => format!("Failed to stop recording: {}", e),
            }
        } else {
            match self.recorder.start() {
                Ok(path) => format!("Recording to {}", path.display()),
                Err(e) => format!("Failed to start recording: {}", e),
            }
        };
        self.status = Some(status);
    }

    /// Stop capture and release the GPU driver
    pub fn shutdown(&mut self) {
        if let Err(e) = self.recorder.stop() {
            log::warn!("Failed to stop recording: {}", e);
        }
        self.full_view.sensors().release_driver();
    }
}

/// Configuration for the monitor app
#[derive(Debug, Clone)]
pub struct MonitorAppConfig {
    pub start_compact: bool,
    pub recordings_dir: PathBuf,
    pub screenshots_dir: PathBuf,
}

impl Default for MonitorAppConfig {
    fn default() -> Self {
        Self {
            start_compact: false,
            recordings_dir: PathBuf::from("recordings"),
            screenshots_dir: PathBuf::from("screenshots"),
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(
    sensors: Arc<SensorSet>,
    settings: &Settings,
    config: MonitorAppConfig,
) -> Result<()> {
    let mut app = MonitorApp::new(sensors, settings, &config);
    let mut terminal = setup_terminal()?;

    let result = run_loop(&mut terminal, &mut app);

    app.shutdown();

    let restored = restore_terminal(terminal.backend_mut());
    prefer_loop_error(result, restored)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let setup = (|| -> Result<_> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
    })();

    if setup.is_err() {
        if let Err(e) = restore_terminal(&mut io::stdout()) {
            log::warn!("Failed to restore terminal: {:#}", e);
        }
    }
    setup
}

/// Undo raw mode and the alternate screen. Every step runs even if an
/// earlier one fails.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    first_error([
        disable_raw_mode().context("Failed to disable raw mode"),
        execute!(out, LeaveAlternateScreen).context("Failed to leave alternate screen"),
        execute!(out, Show).context("Failed to show cursor"),
    ])
}

fn first_error<const N: usize>(results: [Result<()>; N]) -> Result<()> {
    results.into_iter().collect()
}

/// A failed loop is reported over a failed restore; the restore error is logged
fn prefer_loop_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            log::warn!("Failed to restore terminal: {:#}", restore_err);
            Err(e)
        }
        (result, restored) => result.and(restored),
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut MonitorApp,
) -> Result<()> {
    app.update_metrics();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        let timeout = app
            .interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let monitor_event = map_key(&key, &app.bindings);
                    app.handle_event(monitor_event);
                }
            }
        }

        if app.should_quit {
            break;
        }

        if last_tick.elapsed() >= app.interval {
            app.update_metrics();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
