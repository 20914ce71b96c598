//! CLI module for sortviz.
//!
//! All CLI logic lives here so it can be tested; `main.rs` only parses
//! arguments, installs logging and calls [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{execute_run, run_cli, verify_config};
pub use output::{print_algorithms, print_banner, summarize_report, version_line};

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{SortError, SortResult};

/// Level used when `RUST_LOG` is unset: 0 warn, 1 debug, 2+ trace.
#[must_use]
pub const fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)))
}

/// Install the `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level.
pub fn init_tracing(verbosity: u8) {
    // A second install (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install the `tracing` subscriber appending to `path`.
///
/// For full-screen frontends, where stderr shares the terminal.
///
/// # Errors
///
/// Returns error if the log file cannot be opened.
pub fn init_tracing_to_file(verbosity: u8, path: &Path) -> SortResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SortError::io(format!("Failed to open log file {}: {e}", path.display())))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
