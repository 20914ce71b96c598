//! Iterative quick sort with Lomuto partition.
//!
//! Ranges live on an explicit stack of inclusive `(lo, hi)` pairs. The left
//! sub-range is pushed before the right one, so the right side is partitioned
//! first. Elements equal to the pivot go to the low side.

use super::Working;
use crate::engine::{Step, Value};

/// An in-flight Lomuto partition of `[lo, hi]`.
#[derive(Debug, Clone, Copy)]
struct Partition {
    lo: usize,
    hi: usize,
    pivot: Value,
    /// Next free slot on the low side.
    i: usize,
    /// Scan cursor.
    j: usize,
}

/// Lazy quick sort step source.
#[derive(Debug, Clone)]
pub struct QuickSteps {
    work: Working,
    stack: Vec<(usize, usize)>,
    partition: Option<Partition>,
}

impl QuickSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        let stack = if input.is_empty() {
            Vec::new()
        } else {
            vec![(0, input.len() - 1)]
        };
        Self {
            work: Working::new(input),
            stack,
            partition: None,
        }
    }
}

impl Iterator for QuickSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(p) = self.partition.as_mut() {
                while p.j < p.hi {
                    let j = p.j;
                    p.j += 1;
                    if self.work.values()[j] <= p.pivot {
                        let i = p.i;
                        p.i += 1;
                        self.work.swap(i, j);
                        return Some(self.work.pair(i, j));
                    }
                }

                let Partition { lo, hi, i, .. } = *p;
                self.partition = None;
                self.work.swap(i, hi);
                // Empty or single-element ranges would be popped and skipped
                // without emitting, so they are never pushed.
                if i > lo + 1 {
                    self.stack.push((lo, i - 1));
                }
                if i + 1 < hi {
                    self.stack.push((i + 1, hi));
                }
                return Some(self.work.pair(i, hi));
            }

            let Some((lo, hi)) = self.stack.pop() else {
                return self.work.finish();
            };
            if lo < hi {
                self.partition = Some(Partition {
                    lo,
                    hi,
                    pivot: self.work.values()[hi],
                    i: lo,
                    j: lo,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Highlights;

    #[test]
    fn test_two_elements_swap_pivot_into_place() {
        let steps: Vec<Step> = QuickSteps::new(&[2, 1]).collect();
        assert_eq!(
            steps,
            vec![Step::pair(&[1, 2], 0, 1), Step::plain(&[1, 2])]
        );
    }

    #[test]
    fn test_short_inputs_emit_only_terminal() {
        assert_eq!(QuickSteps::new(&[]).collect::<Vec<_>>(), vec![Step::plain(&[])]);
        assert_eq!(QuickSteps::new(&[7]).collect::<Vec<_>>(), vec![Step::plain(&[7])]);
    }

    #[test]
    fn test_exhausted_after_terminal() {
        let mut steps = QuickSteps::new(&[3, 1, 2]);
        let last = steps.by_ref().last();
        assert_eq!(last, Some(Step::plain(&[1, 2, 3])));
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_partition_emission_order() {
        // pivot 3: j=0 (1<=3) self-swap at 0, j=1 (4) skipped, j=2 (2<=3)
        // swaps into slot 1, then pivot lands at 2.
        let steps: Vec<Step> = QuickSteps::new(&[1, 4, 2, 3]).collect();
        assert_eq!(steps[0].highlights(), Highlights::One(0));
        assert_eq!(steps[1].highlights(), Highlights::Pair(1, 2));
        assert_eq!(steps[1].values(), &[1, 2, 4, 3]);
        assert_eq!(steps[2].highlights(), Highlights::Pair(2, 3));
        assert_eq!(steps[2].values(), &[1, 2, 3, 4]);
        assert_eq!(steps.last().map(Step::values), Some(&[1, 2, 3, 4][..]));
    }

    #[test]
    fn test_ties_go_to_low_side() {
        let steps: Vec<Step> = QuickSteps::new(&[2, 2, 2]).collect();
        assert!(steps.iter().all(|s| s.values() == [2, 2, 2]));
        assert!(steps.last().is_some_and(Step::is_terminal));
    }

    #[test]
    fn test_sorted_input_terminates() {
        let input: Vec<Value> = (0..50).collect();
        let steps: Vec<Step> = QuickSteps::new(&input).collect();
        assert_eq!(steps.last().map(Step::values), Some(input.as_slice()));
    }

    #[test]
    fn test_right_range_is_processed_first() {
        // pivot 3 lands at index 2; right range (3, 4) is popped before (0, 1).
        let steps: Vec<Step> = QuickSteps::new(&[2, 1, 5, 4, 3]).collect();
        let pivot_step = steps
            .iter()
            .position(|s| s.highlights() == Highlights::Pair(2, 4))
            .expect("pivot placement");
        let next = &steps[pivot_step + 1];
        assert!(next.highlights().indices().iter().all(|&i| i >= 3));
    }
}
