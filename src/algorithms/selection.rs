//! Selection sort.

use super::Working;
use crate::engine::{Step, Value};

/// Lazy selection sort step source.
///
/// Emits `(i, min)` only when the minimum of the remainder is not already at
/// position `i`.
#[derive(Debug, Clone)]
pub struct SelectionSteps {
    work: Working,
    i: usize,
}

impl SelectionSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        Self {
            work: Working::new(input),
            i: 0,
        }
    }
}

impl Iterator for SelectionSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.work.len();
        while self.i < n {
            let i = self.i;
            self.i += 1;

            let values = self.work.values();
            // Strict `<` keeps the first occurrence of the minimum.
            let min = (i + 1..n).fold(i, |min, j| if values[j] < values[min] { j } else { min });

            if min != i {
                self.work.swap(i, min);
                return Some(self.work.pair(i, min));
            }
        }
        self.work.finish()
    }
}
