//! sortviz TUI - interactive sorting visualizer
//!
//! Bars are drawn with ratatui; keys are read while the driver waits between
//! steps, so speed changes and stop requests land during playback.
//! App logic lives in `sortviz::tui::app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    let args = tui::TuiArgs::parse();
    // stderr shares the alternate screen, so logs only go to a file.
    if let Some(path) = &args.log_file {
        if let Err(e) = sortviz::cli::init_tracing_to_file(args.verbose, path) {
            eprintln!("Error: {e}");
            return std::process::ExitCode::from(2);
        }
    }
    match tui::run(&args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::ExitCode::from(1)
        }
    }
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use sortviz::config::VisualizerConfig;
    use sortviz::engine::{Pacer, PlaybackDriver, PlaybackHandle, Step};
    use sortviz::error::{SortError, SortResult};
    use sortviz::renderers::Renderer;
    use sortviz::tui::{AppAction, SortApp};
    use std::cell::RefCell;
    use std::io;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    /// Idle tick while no playback runs.
    const TICK: Duration = Duration::from_millis(100);

    /// Command-line options for the TUI.
    #[derive(Debug, clap::Parser)]
    #[command(name = "sortviz-tui", version, about = "Interactive sorting visualizer")]
    pub struct TuiArgs {
        /// YAML configuration file.
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Append logs to this file; without it nothing is logged.
        #[arg(long)]
        pub log_file: Option<PathBuf>,

        /// Raise log verbosity.
        #[arg(short, long, action = clap::ArgAction::Count)]
        pub verbose: u8,
    }

    /// App plus terminal, shared by the renderer and the pacer.
    struct Ui<B: Backend> {
        app: SortApp,
        terminal: Terminal<B>,
    }

    impl<B: Backend> Ui<B> {
        fn draw(&mut self) -> SortResult<()> {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;
            Ok(())
        }
    }

    fn borrow_ui<B: Backend>(cell: &RefCell<Ui<B>>) -> SortResult<std::cell::RefMut<'_, Ui<B>>> {
        cell.try_borrow_mut()
            .map_err(|_| SortError::render("terminal already borrowed"))
    }

    /// Waits out the delay while handling key presses.
    struct KeyPacer<'a, B: Backend> {
        ui: &'a RefCell<Ui<B>>,
    }

    impl<B: Backend> Pacer for KeyPacer<'_, B> {
        fn pause(&mut self, delay: Duration) -> SortResult<()> {
            let deadline = Instant::now() + delay;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if event::poll(remaining)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press {
                            let mut ui = borrow_ui(self.ui)?;
                            // Start requests are no-ops mid-run.
                            let _ = ui.app.handle_key(key.code);
                            ui.draw()?;
                            if ui.app.should_quit {
                                return Ok(());
                            }
                        }
                    }
                }
                if remaining.is_zero() {
                    return Ok(());
                }
            }
        }
    }

    /// Run the TUI application.
    pub fn run(args: &TuiArgs) -> SortResult<()> {
        let config = match &args.config {
            Some(path) => VisualizerConfig::load(path)?,
            None => VisualizerConfig::default(),
        };

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let handle = PlaybackHandle::new(config.delay());
        let guard = config.guard;
        let ui = RefCell::new(Ui {
            app: SortApp::new(config, handle.clone()),
            terminal,
        });
        let driver = PlaybackDriver::with_handle(handle, KeyPacer { ui: &ui }).with_guard(guard);

        let result = event_loop(&ui, &driver);
        drop(driver);

        disable_raw_mode()?;
        let mut ui = ui.into_inner();
        execute!(ui.terminal.backend_mut(), LeaveAlternateScreen)?;
        ui.terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(
        ui: &RefCell<Ui<B>>,
        driver: &PlaybackDriver<KeyPacer<'_, B>>,
    ) -> SortResult<()> {
        loop {
            borrow_ui(ui)?.draw()?;

            let mut action = AppAction::None;
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        action = borrow_ui(ui)?.app.handle_key(key.code);
                    }
                }
            }

            if borrow_ui(ui)?.app.should_quit {
                return Ok(());
            }

            if action == AppAction::Start {
                play(ui, driver);
            }
        }
    }

    fn play<B: Backend>(ui: &RefCell<Ui<B>>, driver: &PlaybackDriver<KeyPacer<'_, B>>) {
        let Ok(mut guard) = borrow_ui(ui) else {
            return;
        };
        guard.app.begin_run();
        let data = guard.app.data.clone();
        let algorithm = guard.app.config.algorithm;
        drop(guard);

        let mut render = |step: &Step| -> SortResult<()> {
            let mut ui = borrow_ui(ui)?;
            ui.app.render(step)?;
            ui.draw()
        };
        let result = driver.run(&data, algorithm, &mut render);

        if let Ok(mut ui) = borrow_ui(ui) {
            ui.app.finish_run(&result);
        }
        if let Err(e) = result {
            tracing::error!(error = %e, "playback failed");
        }
    }

    fn ui(f: &mut Frame, app: &SortApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_chart(f, chunks[1], app);
        render_message(f, chunks[2], app);
        render_help(f, chunks[3]);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &SortApp) {
        let running = app.is_running();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " SORTVIZ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                app.status_line(),
                Style::default().fg(if running { Color::Green } else { Color::White }),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn render_chart(f: &mut Frame, area: Rect, app: &SortApp) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(app.config.algorithm.label());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let label_rows = u16::from(app.frame.show_labels && inner.height > 2);
        let rows = inner.height.saturating_sub(label_rows);
        let columns = app.columns(usize::from(inner.width));

        let mut lines: Vec<Line> = (0..rows)
            .rev()
            .map(|row| {
                let spans: Vec<Span> = columns
                    .iter()
                    .map(|column| {
                        let filled = !column.gap
                            && (column.height * f64::from(rows)).ceil() as u16 > row;
                        let color = if column.highlighted {
                            Color::Rgb(0xf5, 0x9e, 0x0b)
                        } else {
                            Color::Rgb(0x60, 0xa5, 0xfa)
                        };
                        Span::styled(if filled { "█" } else { " " }, Style::default().fg(color))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        if label_rows > 0 {
            let width = usize::from(inner.width) / app.frame.len().max(1);
            let labels: String = app
                .frame
                .bars
                .iter()
                .map(|bar| {
                    let label = bar.label.as_deref().unwrap_or("");
                    format!("{label:^width$}")
                })
                .collect();
            lines.push(Line::from(labels));
        }

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn render_message(f: &mut Frame, area: Rect, app: &SortApp) {
        let message = Paragraph::new(app.message.as_str())
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(message, area);
    }

    fn render_help(f: &mut Frame, area: Rect) {
        let help = Paragraph::new(
            "g generate | s start | r random start | x stop | a/A algorithm | +/- size | f/d speed | e export | q quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, area);
    }

}
