//! # sortviz
//!
//! Step-by-step sorting algorithm visualizer.
//!
//! Each sorting algorithm is a lazy producer of [`Step`](engine::Step)s, one
//! immutable snapshot of the working sequence per observable moment, with up
//! to two highlighted positions. A [`PlaybackDriver`](engine::PlaybackDriver)
//! pulls those steps at a controllable pace and hands them to a renderer, with
//! a cooperative start/stop contract:
//!
//! - Starting while a playback runs is a no-op
//! - Stop is observed at the next step boundary
//! - Delay changes apply from the next step
//! - After the loop ends, the input sequence is rendered once with no highlights
//!
//! ## Example
//!
//! ```rust
//! use sortviz::prelude::*;
//! use std::time::Duration;
//!
//! let config = VisualizerConfig::builder()
//!     .algorithm(Algorithm::Quick)
//!     .size(16)
//!     .seed(42)
//!     .build();
//! let input = config.generate_input();
//!
//! let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
//! let mut last = None;
//! let mut render = |step: &Step| -> SortResult<()> {
//!     last = Some(step.clone());
//!     Ok(())
//! };
//! let report = driver.run(&input, config.algorithm, &mut render).unwrap();
//! assert_eq!(report.outcome, PlaybackOutcome::Completed);
//! assert_eq!(last.unwrap().values(), input.as_slice());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod renderers;
pub mod replay;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::{Algorithm, StepSource};
    pub use crate::config::{VisualizerConfig, VisualizerConfigBuilder};
    pub use crate::engine::guard::{GuardConfig, StepGuard};
    pub use crate::engine::rng::DataRng;
    pub use crate::engine::{
        Highlights, Pacer, PlaybackDriver, PlaybackHandle, PlaybackOutcome, PlaybackReport,
        PlaybackStatus, RecordingPacer, Step, ThreadPacer, Value,
    };
    pub use crate::error::{SortError, SortResult};
    pub use crate::renderers::{BarFrame, FrameOptions, Renderer, TextRenderer};
    pub use crate::replay::StepTrace;
}

/// Re-export for public API
pub use error::{SortError, SortResult};
