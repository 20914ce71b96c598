//! Insertion sort.
//!
//! The key travels left through adjacent exchanges, so every snapshot holds a
//! permutation of the input (a plain shift would briefly duplicate a
//! predecessor and drop the key). Each exchange highlights the two positions
//! involved; once the key stops, a placement step highlights where it landed.
//! Keys that are already in place produce no steps at all.

use super::Working;
use crate::engine::{Step, Value};

/// Lazy insertion sort step source.
#[derive(Debug, Clone)]
pub struct InsertionSteps {
    work: Working,
    /// Next outer index to pick a key from.
    i: usize,
    /// Current position of the key being inserted.
    key_at: Option<usize>,
    /// Whether the current key has moved at least once.
    moved: bool,
}

impl InsertionSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        Self {
            work: Working::new(input),
            i: 1,
            key_at: None,
            moved: false,
        }
    }
}

impl Iterator for InsertionSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(pos) = self.key_at {
                let values = self.work.values();
                if pos > 0 && values[pos - 1] > values[pos] {
                    self.work.swap(pos - 1, pos);
                    self.key_at = Some(pos - 1);
                    self.moved = true;
                    return Some(self.work.pair(pos - 1, pos));
                }

                self.key_at = None;
                if self.moved {
                    return Some(Step::single(self.work.values(), pos));
                }
                continue;
            }

            if self.i >= self.work.len() {
                return self.work.finish();
            }
            self.key_at = Some(self.i);
            self.moved = false;
            self.i += 1;
        }
    }
}
