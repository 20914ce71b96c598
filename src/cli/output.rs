//! CLI output formatting.

use crate::algorithms::Algorithm;
use crate::config::VisualizerConfig;
use crate::engine::{PlaybackOutcome, PlaybackReport};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print a boxed title.
pub fn print_banner(title: &str) {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║ {title:<61} ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");
}

/// Version string including the build's git hash when known.
#[must_use]
pub fn version_line() -> String {
    let hash = env!("SORTVIZ_GIT_HASH");
    if hash.is_empty() {
        format!("sortviz {}", env!("SORTVIZ_VERSION"))
    } else {
        format!("sortviz {} ({hash})", env!("SORTVIZ_VERSION"))
    }
}

/// Print the available algorithms.
pub fn print_algorithms() {
    println!("Available algorithms:\n");
    for algorithm in Algorithm::ALL {
        println!("  {:<10} {}", algorithm.id(), algorithm.label());
    }
    println!("\nUnrecognized names select {}.", Algorithm::default().label());
}

/// One-line summary of a playback.
#[must_use]
pub fn summarize_report(report: &PlaybackReport) -> String {
    let (sym, outcome) = match report.outcome {
        PlaybackOutcome::Completed => ("✓", "completed"),
        PlaybackOutcome::Stopped => ("■", "stopped"),
        PlaybackOutcome::AlreadyRunning => ("✗", "ignored (already running)"),
    };
    format!("{sym} Playback {outcome} after {} steps", report.steps_rendered)
}

/// Print a playback report.
pub fn print_playback_report(report: &PlaybackReport, config: &VisualizerConfig) {
    println!("{RULE}");
    println!("Algorithm: {}", config.algorithm.label());
    println!("Size:      {}", config.size);
    println!("Seed:      {}", config.seed);
    println!("Delay:     {} ms", config.delay_ms);
    println!("{RULE}");
    println!("{}", summarize_report(report));
}

/// Print the result of a determinism check. `checksum` is `None` on failure.
pub fn print_verification(config: &VisualizerConfig, runs: usize, checksum: Option<&str>) {
    let (sym, status) = if checksum.is_some() {
        ("✓", "PASSED")
    } else {
        ("✗", "FAILED")
    };

    println!("{RULE}");
    println!("Determinism Check");
    println!("{RULE}\n");
    println!("  Algorithm: {}", config.algorithm.label());
    println!("  Size:      {}", config.size);
    println!("  Seed:      {}", config.seed);
    println!("  Runs:      {runs}");
    if let Some(checksum) = checksum {
        println!("\n  Reference Hash: {checksum}");
    }
    println!("\n{RULE}");
    println!("{sym} Result: {status}");
    println!("{RULE}\n");
}
