//! CLI command handlers.
//!
//! Each handler prints its own report and maps failures to a non-zero exit
//! code. The work itself lives in small functions that take a writer so
//! tests can capture it.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use crate::config::VisualizerConfig;
use crate::engine::{PlaybackDriver, PlaybackReport, ThreadPacer};
use crate::error::SortResult;
use crate::export;
use crate::renderers::{NullRenderer, TextRenderer};
use crate::replay::{verify_determinism, StepTrace};

use super::args::RunOptions;
use super::output::{
    print_algorithms, print_banner, print_playback_report, print_verification, version_line,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run { options, quiet } => run_playback(&options, quiet),
        Command::Trace { options, output } => trace_run(&options, output.as_deref()),
        Command::Verify { options, runs } => verify_run(&options, runs),
        Command::List => {
            print_algorithms();
            ExitCode::SUCCESS
        }
        Command::ExportReadme { path } => export_readme(&path),
    }
}

/// Play a run as text bars on stdout.
#[must_use]
pub fn run_playback(options: &RunOptions, quiet: bool) -> ExitCode {
    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if !quiet {
        print_banner(&format!("{} - Playback", version_line()));
    }

    let stdout = io::stdout();
    match execute_run(&config, stdout.lock(), quiet) {
        Ok(report) => {
            print_playback_report(&report, &config);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Generate the configured input and play it into `out`.
///
/// Quiet runs render nothing and do not pause between steps.
///
/// # Errors
///
/// Returns error if playback aborts.
pub fn execute_run<W: Write>(
    config: &VisualizerConfig,
    out: W,
    quiet: bool,
) -> SortResult<PlaybackReport> {
    let input = config.generate_input();
    let driver = PlaybackDriver::from_config(config, ThreadPacer);

    if quiet {
        driver.handle().set_delay(std::time::Duration::ZERO);
        driver.run(&input, config.algorithm, &mut NullRenderer)
    } else {
        let mut renderer = TextRenderer::new(out, config.frame_options());
        driver.run(&input, config.algorithm, &mut renderer)
    }
}

/// Record a run and write it as JSON lines.
#[must_use]
pub fn trace_run(options: &RunOptions, output: Option<&Path>) -> ExitCode {
    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let trace = StepTrace::record(config.algorithm, &config.generate_input());
    let result = match output {
        Some(path) => export::write_trace(&trace, path).map(|()| {
            eprintln!(
                "✓ Wrote {} steps to {} (checksum {})",
                trace.len(),
                path.display(),
                trace.checksum_hex()
            );
        }),
        None => trace.write_json_lines(io::stdout().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Replay the configured run `runs` times and compare checksums.
#[must_use]
pub fn verify_run(options: &RunOptions, runs: usize) -> ExitCode {
    print_banner(&format!("{} - Determinism Verification", version_line()));

    let config = match options.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    match verify_config(&config, runs) {
        Ok(checksum) => {
            print_verification(&config, runs, Some(&checksum));
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_verification(&config, runs, None);
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Check determinism and replay of the configured run.
///
/// Returns the hex checksum shared by every run.
///
/// # Errors
///
/// Returns `Replay` if any run diverges, or a guard error if the trace is
/// malformed.
pub fn verify_config(config: &VisualizerConfig, runs: usize) -> SortResult<String> {
    let input = config.generate_input();
    let checksum = verify_determinism(config.algorithm, &input, runs.max(1))?;

    // A full headless pass through the driver exercises the step guard.
    let driver = PlaybackDriver::from_config(config, ThreadPacer);
    driver.handle().set_delay(std::time::Duration::ZERO);
    driver.run(&input, config.algorithm, &mut NullRenderer)?;

    Ok(blake3::Hash::from_bytes(checksum).to_hex().to_string())
}

/// Write the README artifact.
#[must_use]
pub fn export_readme(path: &Path) -> ExitCode {
    match export::write_readme(path) {
        Ok(written) => {
            println!("✓ Wrote {}", written.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
