//! Bottom-up merge sort.
//!
//! Width doubles from 1 while it is smaller than the input. Every block merge
//! emits exactly one step highlighting the block's first and last index, even
//! when the block was already in order, so pass boundaries stay visible on
//! sorted input.

use super::Working;
use crate::engine::{Step, Value};

/// Lazy merge sort step source.
#[derive(Debug, Clone)]
pub struct MergeSteps {
    work: Working,
    width: usize,
    /// Start of the next block in the current pass.
    start: usize,
    /// Scratch buffer reused across merges.
    scratch: Vec<Value>,
}

impl MergeSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        Self {
            work: Working::new(input),
            width: 1,
            start: 0,
            scratch: Vec::with_capacity(input.len()),
        }
    }

    /// Merge `[lo, mid)` and `[mid, hi)` in place through the scratch buffer.
    fn merge_block(&mut self, lo: usize, mid: usize, hi: usize) {
        let values = self.work.values_mut();
        self.scratch.clear();

        let (mut l, mut r) = (lo, mid);
        while l < mid && r < hi {
            if values[l] <= values[r] {
                self.scratch.push(values[l]);
                l += 1;
            } else {
                self.scratch.push(values[r]);
                r += 1;
            }
        }
        self.scratch.extend_from_slice(&values[l..mid]);
        self.scratch.extend_from_slice(&values[r..hi]);

        values[lo..hi].copy_from_slice(&self.scratch);
    }
}

impl Iterator for MergeSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.work.len();
        while self.width < n {
            if self.start < n {
                let lo = self.start;
                let mid = (lo + self.width).min(n);
                let hi = (lo + 2 * self.width).min(n);
                self.start += 2 * self.width;

                self.merge_block(lo, mid, hi);
                return Some(self.work.pair(lo, hi - 1));
            }
            self.width *= 2;
            self.start = 0;
        }
        self.work.finish()
    }
}
