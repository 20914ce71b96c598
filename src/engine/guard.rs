//! Step guard: stop the line on a malformed step.
//!
//! The playback driver runs the guard on every step it pulls, before the step
//! reaches the renderer. A step that is not a permutation of the input, or that
//! highlights a position outside the snapshot, aborts the run immediately so
//! the defect is never drawn.
//!
//! # Checks
//!
//! 1. **Bounds**: every highlight indexes into the snapshot
//! 2. **Permutation**: the snapshot holds exactly the input multiset
//! 3. **Terminal**: a completed run ends sorted and highlight-free

use serde::{Deserialize, Serialize};

use crate::engine::{Step, Value};
use crate::error::{SortError, SortResult};

/// Which checks the guard performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Verify every snapshot is a permutation of the input.
    pub check_permutation: bool,
    /// Verify highlights are in bounds.
    pub check_bounds: bool,
    /// Verify a completed run ends with a terminal step.
    pub check_terminal: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            check_permutation: true,
            check_bounds: true,
            check_terminal: true,
        }
    }
}

impl GuardConfig {
    /// A guard that checks nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            check_permutation: false,
            check_bounds: false,
            check_terminal: false,
        }
    }
}

/// Per-run invariant checker.
///
/// # Example
///
/// ```rust
/// use sortviz::engine::guard::{GuardConfig, StepGuard};
/// use sortviz::engine::Step;
///
/// let mut guard = StepGuard::new(&[3, 1, 2], GuardConfig::default());
/// assert!(guard.check(&Step::pair(&[1, 3, 2], 0, 1)).is_ok());
/// assert!(guard.check(&Step::plain(&[1, 1, 2])).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StepGuard {
    config: GuardConfig,
    /// Input values in ascending order, the reference multiset.
    reference: Vec<Value>,
    /// Steps checked so far.
    checked: u64,
}

impl StepGuard {
    /// Create a guard for a run over `input`.
    #[must_use]
    pub fn new(input: &[Value], config: GuardConfig) -> Self {
        let mut reference = input.to_vec();
        reference.sort_unstable();
        Self {
            config,
            reference,
            checked: 0,
        }
    }

    /// Number of steps checked.
    #[must_use]
    pub const fn checked(&self) -> u64 {
        self.checked
    }

    /// The sorted input, i.e. the expected terminal snapshot.
    #[must_use]
    pub fn expected_terminal(&self) -> &[Value] {
        &self.reference
    }

    /// Inspect one step.
    ///
    /// # Errors
    ///
    /// Returns `HighlightOutOfBounds` or `NotPermutation` on a violation.
    pub fn check(&mut self, step: &Step) -> SortResult<()> {
        let index = self.checked;
        self.checked += 1;

        if self.config.check_bounds {
            let len = step.len();
            if let Some(&bad) = step.highlights().indices().iter().find(|&&i| i >= len) {
                return Err(SortError::HighlightOutOfBounds {
                    step: index,
                    index: bad,
                    len,
                });
            }
        }

        if self.config.check_permutation && !self.is_permutation(step.values()) {
            return Err(SortError::NotPermutation { step: index });
        }

        Ok(())
    }

    /// Inspect the last step of a completed run.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTerminal` if the step is missing, highlighted or
    /// not sorted.
    pub fn check_terminal(&self, last: Option<&Step>) -> SortResult<()> {
        if !self.config.check_terminal {
            return Ok(());
        }
        let Some(step) = last else {
            return Err(SortError::InvalidTerminal {
                reason: "source produced no steps".to_string(),
            });
        };
        if !step.highlights().is_empty() {
            return Err(SortError::InvalidTerminal {
                reason: format!("terminal step highlights {:?}", step.highlights().indices()),
            });
        }
        if !step.is_sorted() {
            return Err(SortError::InvalidTerminal {
                reason: "terminal step is not in ascending order".to_string(),
            });
        }
        Ok(())
    }

    fn is_permutation(&self, values: &[Value]) -> bool {
        if values.len() != self.reference.len() {
            return false;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted == self.reference
    }
}
