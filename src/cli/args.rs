//! CLI argument parsing.
//!
//! Derived with `clap`; `Args::try_parse_from` keeps parsing testable
//! without touching the process arguments.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::algorithms::Algorithm;
use crate::config::VisualizerConfig;
use crate::error::SortResult;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "sortviz",
    version,
    about = "Step-by-step sorting algorithm visualizer"
)]
pub struct Args {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that plays or records a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct RunOptions {
    /// Sorting algorithm (unrecognized names select bubble).
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Number of values to sort.
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Pause after each step, in milliseconds.
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Seed for input generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML configuration file; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl RunOptions {
    /// Build the effective configuration: file (or defaults), then flags.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be loaded or the result is invalid.
    pub fn resolve(&self) -> SortResult<VisualizerConfig> {
        let mut config = match &self.config {
            Some(path) => VisualizerConfig::load(path)?,
            None => VisualizerConfig::default(),
        };

        if let Some(name) = &self.algorithm {
            config.algorithm = Algorithm::from_name(name);
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.check()?;
        Ok(config)
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Play a sort in the terminal as text bars
    Run {
        /// Run options.
        #[command(flatten)]
        options: RunOptions,
        /// Skip per-step output and pacing; print only the summary.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Record every step of a run as JSON lines
    Trace {
        /// Run options.
        #[command(flatten)]
        options: RunOptions,
        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a run several times and compare step checksums
    Verify {
        /// Run options.
        #[command(flatten)]
        options: RunOptions,
        /// Number of verification runs.
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
    /// List available algorithms
    List,
    /// Write the informational README file
    ExportReadme {
        /// Target file or directory.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
