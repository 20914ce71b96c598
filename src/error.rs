//! Error types for sortviz.
//!
//! All fallible operations return `Result<T, SortError>` instead of panicking.
//! Sorting itself never fails on a well-formed sequence; errors come from the
//! edges (configuration, rendering, file output) or from the step guard when a
//! step source emits a snapshot that breaks its invariants.

use thiserror::Error;

/// Result type alias for sortviz operations.
pub type SortResult<T> = Result<T, SortError>;

/// Unified error type for all sortviz operations.
#[derive(Debug, Error)]
pub enum SortError {
    // ===== Step Guard Violations =====
    /// An emitted step is not a permutation of the input.
    #[error("Step {step}: snapshot is not a permutation of the input")]
    NotPermutation {
        /// Index of the offending step within the run.
        step: u64,
    },

    /// A highlight points outside the snapshot.
    #[error("Step {step}: highlight index {index} out of bounds for length {len}")]
    HighlightOutOfBounds {
        /// Index of the offending step within the run.
        step: u64,
        /// The out-of-range highlight.
        index: usize,
        /// Length of the snapshot.
        len: usize,
    },

    /// The terminal step is not sorted or still carries highlights.
    #[error("Terminal step invalid: {reason}")]
    InvalidTerminal {
        /// What was wrong with the terminal step.
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Playback Errors =====
    /// The renderer failed to draw a step.
    #[error("Render error: {0}")]
    Render(String),

    /// Replay produced a different trace.
    #[error("Replay error: {0}")]
    Replay(String),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SortError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a render error.
    #[must_use]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    /// Create a replay error.
    #[must_use]
    pub fn replay(message: impl Into<String>) -> Self {
        Self::Replay(message.into())
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error came from the step guard (the run must stop).
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::NotPermutation { .. }
                | Self::HighlightOutOfBounds { .. }
                | Self::InvalidTerminal { .. }
        )
    }
}

impl From<serde_json::Error> for SortError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
