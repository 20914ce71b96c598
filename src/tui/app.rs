//! Sorting TUI application state and logic.
//!
//! Terminal I/O is handled by the binary; all state management lives here.
//! The app is also the playback [`Renderer`]: each step replaces the current
//! bar frame.

use crossterm::event::KeyCode;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{VisualizerConfig, MAX_DELAY_MS, MAX_SIZE};
use crate::engine::{DataRng, PlaybackHandle, PlaybackOutcome, PlaybackReport, Step, Value};
use crate::error::SortResult;
use crate::export;
use crate::renderers::{BarFrame, Renderer};

/// Size change per `+`/`-` press.
pub const SIZE_STEP: usize = 5;

/// What the caller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing beyond redrawing.
    None,
    /// Start a playback over [`SortApp::data`].
    Start,
}

/// One terminal column of the bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColumn {
    /// Height relative to the tallest bar, in `[0, 1]`.
    pub height: f64,
    /// Whether the column belongs to a highlighted bar.
    pub highlighted: bool,
    /// Whether this column is a gap between bars.
    pub gap: bool,
}

/// Application state for the sorting TUI.
#[derive(Debug)]
pub struct SortApp {
    /// Current settings (algorithm, size, delay, value range).
    pub config: VisualizerConfig,
    /// Input for the next playback.
    pub data: Vec<Value>,
    /// Frame currently on screen.
    pub frame: BarFrame,
    /// Steps rendered in the current or last playback.
    pub steps_rendered: u64,
    /// Outcome of the last playback.
    pub last_outcome: Option<PlaybackOutcome>,
    /// Status message for the footer.
    pub message: String,
    /// Where `e` writes the README artifact.
    pub export_dir: PathBuf,
    /// Whether the app should quit.
    pub should_quit: bool,
    rng: DataRng,
    handle: PlaybackHandle,
}

impl SortApp {
    /// Create the app and generate the first input.
    #[must_use]
    pub fn new(config: VisualizerConfig, handle: PlaybackHandle) -> Self {
        handle.set_delay(config.delay());
        let mut rng = config.rng();
        let data = rng.generate(config.size, config.min_value, config.value_range);
        let frame = BarFrame::from_step(&Step::plain(&data), &config.frame_options());

        Self {
            config,
            data,
            frame,
            steps_rendered: 0,
            last_outcome: None,
            message: "Press s to start".to_string(),
            export_dir: PathBuf::from("."),
            should_quit: false,
            rng,
            handle,
        }
    }

    /// Whether a playback is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Current per-step delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.handle.delay()
    }

    /// Generate a fresh input of the configured size. Ignored while running.
    pub fn generate(&mut self) -> bool {
        if self.is_running() {
            self.message = "Stop the playback before generating".to_string();
            return false;
        }
        self.data = self.rng.generate(
            self.config.size,
            self.config.min_value,
            self.config.value_range,
        );
        self.frame = BarFrame::from_step(&Step::plain(&self.data), &self.config.frame_options());
        self.steps_rendered = 0;
        self.last_outcome = None;
        self.message = format!("Generated {} values", self.data.len());
        true
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                self.handle.stop();
            }
            KeyCode::Char('g') => {
                self.generate();
            }
            KeyCode::Char('s') | KeyCode::Enter => return self.request_start(),
            KeyCode::Char('r') => {
                if self.generate() {
                    return self.request_start();
                }
            }
            KeyCode::Char('x') => {
                if self.is_running() {
                    self.handle.stop();
                    self.message = "Stopping".to_string();
                }
            }
            KeyCode::Char('a') | KeyCode::Tab => {
                self.config.algorithm = self.config.algorithm.next();
                self.message = format!("Selected {}", self.config.algorithm);
            }
            KeyCode::Char('A') | KeyCode::BackTab => {
                self.config.algorithm = self.config.algorithm.previous();
                self.message = format!("Selected {}", self.config.algorithm);
            }
            KeyCode::Char('+' | '=') => self.resize((self.config.size + SIZE_STEP).min(MAX_SIZE)),
            KeyCode::Char('-') => self.resize(self.config.size.saturating_sub(SIZE_STEP)),
            KeyCode::Char('f') => self.set_delay_ms(self.config.delay_ms / 2),
            KeyCode::Char('d') => {
                self.set_delay_ms((self.config.delay_ms.max(1) * 2).min(MAX_DELAY_MS));
            }
            KeyCode::Char('e') => self.export_readme(),
            _ => {}
        }
        AppAction::None
    }

    fn request_start(&mut self) -> AppAction {
        if self.is_running() {
            tracing::debug!("start key ignored, playback running");
            self.message = "Already running".to_string();
            AppAction::None
        } else {
            AppAction::Start
        }
    }

    fn resize(&mut self, size: usize) {
        self.config.size = size;
        if !self.generate() {
            self.message = format!("Size {size} applies to the next input");
        }
    }

    fn set_delay_ms(&mut self, delay_ms: u64) {
        self.config.delay_ms = delay_ms;
        self.handle.set_delay(self.config.delay());
        self.message = format!("Delay {delay_ms} ms");
    }

    fn export_readme(&mut self) {
        self.message = match export::write_readme(&self.export_dir) {
            Ok(path) => format!("Wrote {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        };
    }

    /// Prepare state for a playback that is about to start.
    pub fn begin_run(&mut self) {
        self.steps_rendered = 0;
        self.last_outcome = None;
        self.message = format!("Running {}", self.config.algorithm);
    }

    /// Record the result of a playback.
    pub fn finish_run(&mut self, result: &SortResult<PlaybackReport>) {
        match result {
            Ok(report) => {
                self.last_outcome = Some(report.outcome);
                self.steps_rendered = report.steps_rendered;
                if let Some(step) = &report.final_step {
                    self.frame = BarFrame::from_step(step, &self.config.frame_options());
                }
                self.message = match report.outcome {
                    PlaybackOutcome::Completed => {
                        format!("Done in {} steps", report.steps_rendered)
                    }
                    PlaybackOutcome::Stopped => {
                        format!("Stopped after {} steps", report.steps_rendered)
                    }
                    PlaybackOutcome::AlreadyRunning => "Already running".to_string(),
                };
            }
            Err(e) => {
                self.last_outcome = None;
                self.message = format!("Playback failed: {e}");
            }
        }
    }

    /// Lay the frame out over `width` terminal columns.
    ///
    /// Bars wider than two columns get a one-column gap. When there are more
    /// bars than columns, each column shows the tallest bar it covers.
    #[must_use]
    pub fn columns(&self, width: usize) -> Vec<ChartColumn> {
        let bars = &self.frame.bars;
        if bars.is_empty() || width == 0 {
            return Vec::new();
        }

        if bars.len() <= width {
            let bar_width = width / bars.len();
            let gap = usize::from(bar_width > 2);
            bars.iter()
                .flat_map(|bar| {
                    let body = ChartColumn {
                        height: bar.height,
                        highlighted: bar.highlighted,
                        gap: false,
                    };
                    let spacer = ChartColumn {
                        height: 0.0,
                        highlighted: false,
                        gap: true,
                    };
                    std::iter::repeat(body)
                        .take(bar_width - gap)
                        .chain(std::iter::repeat(spacer).take(gap))
                })
                .collect()
        } else {
            (0..width)
                .map(|c| {
                    let start = c * bars.len() / width;
                    let end = ((c + 1) * bars.len() / width).max(start + 1);
                    let covered = &bars[start..end];
                    ChartColumn {
                        height: covered.iter().map(|b| b.height).fold(0.0, f64::max),
                        highlighted: covered.iter().any(|b| b.highlighted),
                        gap: false,
                    }
                })
                .collect()
        }
    }

    /// One-line status for the header.
    #[must_use]
    pub fn status_line(&self) -> String {
        let state = if self.is_running() { "RUNNING" } else { "IDLE" };
        format!(
            "{} | n={} | {} ms/step | steps {} | {state}",
            self.config.algorithm.label(),
            self.data.len(),
            self.delay().as_millis(),
            self.steps_rendered
        )
    }
}

impl Renderer for SortApp {
    fn render(&mut self, step: &Step) -> SortResult<()> {
        self.frame = BarFrame::from_step(step, &self.config.frame_options());
        self.steps_rendered += 1;
        Ok(())
    }
}
