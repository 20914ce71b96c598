//! Algorithm step sources.
//!
//! Each sorting variant is a lazy [`Iterator`] over [`Step`]s. A source copies
//! the caller's input on construction, advances its own working buffer only as
//! far as the next emission point, and always finishes with a single terminal
//! step (sorted, no highlights). Inputs of length 0 or 1 yield only that
//! terminal step.
//!
//! # Variants
//!
//! 1. [`bubble`] - adjacent exchanges, emits on every swap
//! 2. [`selection`] - minimum scan, emits when the minimum moves
//! 3. [`insertion`] - key shifted left by adjacent exchanges
//! 4. [`merge`] - bottom-up merge, emits once per block merge (always)
//! 5. [`quick`] - Lomuto partition over an explicit range stack
//! 6. [`heap`] - max-heap build and extraction with sift-down

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

pub use bubble::BubbleSteps;
pub use heap::HeapSteps;
pub use insertion::InsertionSteps;
pub use merge::MergeSteps;
pub use quick::QuickSteps;
pub use selection::SelectionSteps;

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::engine::{Step, Value};

/// Sorting variant selector.
///
/// Parsing never fails: an unrecognized name selects [`Algorithm::Bubble`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Algorithm {
    /// Bubble sort (the fallback variant).
    #[default]
    Bubble,
    /// Selection sort.
    Selection,
    /// Insertion sort.
    Insertion,
    /// Bottom-up merge sort.
    Merge,
    /// Iterative quick sort with Lomuto partition.
    Quick,
    /// Heap sort.
    Heap,
}

impl Algorithm {
    /// All variants in menu order.
    pub const ALL: [Self; 6] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
    ];

    /// Resolve a user-supplied name, falling back to Bubble.
    ///
    /// Matching ignores case, punctuation and a trailing "sort", so
    /// `"Quick Sort"`, `"quick"` and `"quick-sort"` are all accepted.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let key = normalized.strip_suffix("sort").unwrap_or(&normalized);

        match key {
            "bubble" => Self::Bubble,
            "selection" => Self::Selection,
            "insertion" => Self::Insertion,
            "merge" => Self::Merge,
            "quick" => Self::Quick,
            "heap" => Self::Heap,
            _ => {
                tracing::debug!(name, "unrecognized algorithm, using bubble sort");
                Self::Bubble
            }
        }
    }

    /// Short lowercase identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
        }
    }

    /// Display name, e.g. "Heap Sort".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
        }
    }

    /// Next variant in menu order (wraps).
    #[must_use]
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous variant in menu order (wraps).
    #[must_use]
    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|&a| a == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Build the lazy step source for `input`. The input is copied.
    #[must_use]
    pub fn steps(self, input: &[Value]) -> StepSource {
        match self {
            Self::Bubble => StepSource::Bubble(BubbleSteps::new(input)),
            Self::Selection => StepSource::Selection(SelectionSteps::new(input)),
            Self::Insertion => StepSource::Insertion(InsertionSteps::new(input)),
            Self::Merge => StepSource::Merge(MergeSteps::new(input)),
            Self::Quick => StepSource::Quick(QuickSteps::new(input)),
            Self::Heap => StepSource::Heap(HeapSteps::new(input)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for Algorithm {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.id().to_string()
    }
}

/// Statically dispatched step source for any [`Algorithm`].
#[derive(Debug, Clone)]
pub enum StepSource {
    /// Bubble sort steps.
    Bubble(BubbleSteps),
    /// Selection sort steps.
    Selection(SelectionSteps),
    /// Insertion sort steps.
    Insertion(InsertionSteps),
    /// Merge sort steps.
    Merge(MergeSteps),
    /// Quick sort steps.
    Quick(QuickSteps),
    /// Heap sort steps.
    Heap(HeapSteps),
}

impl StepSource {
    /// The variant producing these steps.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bubble(_) => Algorithm::Bubble,
            Self::Selection(_) => Algorithm::Selection,
            Self::Insertion(_) => Algorithm::Insertion,
            Self::Merge(_) => Algorithm::Merge,
            Self::Quick(_) => Algorithm::Quick,
            Self::Heap(_) => Algorithm::Heap,
        }
    }
}

impl Iterator for StepSource {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Self::Bubble(s) => s.next(),
            Self::Selection(s) => s.next(),
            Self::Insertion(s) => s.next(),
            Self::Merge(s) => s.next(),
            Self::Quick(s) => s.next(),
            Self::Heap(s) => s.next(),
        }
    }
}

/// Working buffer shared by every source: the owned copy of the input plus
/// the "terminal step already emitted" latch.
#[derive(Debug, Clone)]
pub(crate) struct Working {
    values: Vec<Value>,
    finished: bool,
}

impl Working {
    pub(crate) fn new(input: &[Value]) -> Self {
        Self {
            values: input.to_vec(),
            finished: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    pub(crate) fn pair(&self, a: usize, b: usize) -> Step {
        Step::pair(&self.values, a, b)
    }

    /// Emit the terminal step once, then `None` forever.
    pub(crate) fn finish(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(Step::plain(&self.values))
    }
}
