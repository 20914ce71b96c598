//! sortviz CLI - step-by-step sorting visualizer
//!
//! Headless playback, trace export and determinism checks.

use clap::Parser;
use sortviz::cli::{init_tracing, run_cli, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    run_cli(args)
}
