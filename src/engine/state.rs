//! Step snapshots.
//!
//! A [`Step`] is one observable moment of a sorting run: a copy of the working
//! sequence plus at most two highlighted positions. Once emitted a step is
//! never mutated; step sources keep their own working buffer and clone it into
//! each snapshot.

use serde::{Deserialize, Serialize};

/// Element type sorted by every step source.
pub type Value = u32;

/// Set of zero, one or two highlighted indices.
///
/// Highlights form a set, so a pair whose indices coincide collapses to
/// [`Highlights::One`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlights {
    /// Nothing highlighted (terminal steps).
    #[default]
    None,
    /// A single index.
    One(usize),
    /// Two distinct indices, in emission order.
    Pair(usize, usize),
}

impl Highlights {
    /// Highlight two indices, collapsing duplicates.
    #[must_use]
    pub const fn pair(a: usize, b: usize) -> Self {
        if a == b {
            Self::One(a)
        } else {
            Self::Pair(a, b)
        }
    }

    /// Number of highlighted indices (0–2).
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    /// Whether nothing is highlighted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether `index` is highlighted.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        match *self {
            Self::None => false,
            Self::One(a) => a == index,
            Self::Pair(a, b) => a == index || b == index,
        }
    }

    /// Highlighted indices in emission order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Self::None => Vec::new(),
            Self::One(a) => vec![a],
            Self::Pair(a, b) => vec![a, b],
        }
    }
}

/// Immutable snapshot emitted by a step source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    values: Vec<Value>,
    highlights: Highlights,
}

impl Step {
    /// Create a step from a snapshot and its highlights.
    #[must_use]
    pub fn new(values: Vec<Value>, highlights: Highlights) -> Self {
        Self { values, highlights }
    }

    /// Snapshot `values` highlighting the pair `(a, b)`.
    #[must_use]
    pub fn pair(values: &[Value], a: usize, b: usize) -> Self {
        Self::new(values.to_vec(), Highlights::pair(a, b))
    }

    /// Snapshot `values` highlighting a single index.
    #[must_use]
    pub fn single(values: &[Value], index: usize) -> Self {
        Self::new(values.to_vec(), Highlights::One(index))
    }

    /// Snapshot `values` with no highlights.
    #[must_use]
    pub fn plain(values: &[Value]) -> Self {
        Self::new(values.to_vec(), Highlights::None)
    }

    /// Array contents at this step.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Highlighted positions.
    #[must_use]
    pub const fn highlights(&self) -> Highlights {
        self.highlights
    }

    /// Number of elements in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the values are in non-decreasing order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    /// Whether this is a terminal step: sorted and highlight-free.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.highlights.is_empty() && self.is_sorted()
    }

    /// Consume the step and return its values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
