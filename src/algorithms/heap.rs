//! Heap sort.
//!
//! Sift-down is naturally recursive: after swapping a node with its larger
//! child it continues in that child's subtree. The recursive call is the last
//! action, so the in-flight sift is kept as `(node, heap_len)` state and each
//! call to `next` resumes it, producing the same emission points as the
//! recursive form.

use super::Working;
use crate::engine::{Step, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Building the max-heap; holds the next parent to sift, if any.
    Build(Option<usize>),
    /// Extracting the root into position `end`.
    Extract { end: usize },
}

/// An in-flight sift-down.
#[derive(Debug, Clone, Copy)]
struct Sift {
    node: usize,
    heap_len: usize,
}

/// Lazy heap sort step source.
#[derive(Debug, Clone)]
pub struct HeapSteps {
    work: Working,
    phase: Phase,
    sift: Option<Sift>,
}

impl HeapSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        let last_parent = (input.len() / 2).checked_sub(1);
        Self {
            work: Working::new(input),
            phase: Phase::Build(last_parent),
            sift: None,
        }
    }

    /// One level of sift-down. Returns the swap step, or `None` once the node
    /// is at least as large as both children.
    fn sift_once(&mut self, Sift { node, heap_len }: Sift) -> Option<Step> {
        let values = self.work.values();
        let left = 2 * node + 1;
        let right = 2 * node + 2;

        let mut largest = node;
        if left < heap_len && values[left] > values[largest] {
            largest = left;
        }
        if right < heap_len && values[right] > values[largest] {
            largest = right;
        }

        if largest == node {
            self.sift = None;
            return None;
        }

        self.work.swap(node, largest);
        self.sift = Some(Sift {
            node: largest,
            heap_len,
        });
        Some(self.work.pair(node, largest))
    }
}

impl Iterator for HeapSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.work.len();
        loop {
            if let Some(sift) = self.sift {
                if let Some(step) = self.sift_once(sift) {
                    return Some(step);
                }
                continue;
            }

            match self.phase {
                Phase::Build(Some(parent)) => {
                    self.phase = Phase::Build(parent.checked_sub(1));
                    self.sift = Some(Sift {
                        node: parent,
                        heap_len: n,
                    });
                }
                Phase::Build(None) => {
                    if n < 2 {
                        return self.work.finish();
                    }
                    self.phase = Phase::Extract { end: n - 1 };
                }
                Phase::Extract { end } if end > 0 => {
                    self.phase = Phase::Extract { end: end - 1 };
                    self.work.swap(0, end);
                    self.sift = Some(Sift {
                        node: 0,
                        heap_len: end,
                    });
                    return Some(self.work.pair(0, end));
                }
                Phase::Extract { .. } => return self.work.finish(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Highlights;

    #[test]
    fn test_build_then_extract() {
        // [1,3,2]: build swaps root with 3, then two extractions.
        let steps: Vec<Step> = HeapSteps::new(&[1, 3, 2]).collect();
        assert_eq!(steps[0], Step::pair(&[3, 1, 2], 0, 1));
        assert_eq!(steps[1], Step::pair(&[2, 1, 3], 0, 2));
        assert_eq!(steps[2], Step::pair(&[1, 2, 3], 0, 1));
        assert_eq!(steps[3], Step::plain(&[1, 2, 3]));
        assert_eq!(steps.len(), 4);
    }

    #[test]
    fn test_sift_descends_through_subtree() {
        // Root 1 must sink two levels during the build phase.
        let steps: Vec<Step> = HeapSteps::new(&[1, 5, 4, 3, 2]).collect();
        assert_eq!(steps[0].highlights(), Highlights::Pair(0, 1));
        assert_eq!(steps[1].highlights(), Highlights::Pair(1, 3));
        assert_eq!(steps[1].values(), &[5, 3, 4, 1, 2]);
    }

    #[test]
    fn test_two_elements() {
        let steps: Vec<Step> = HeapSteps::new(&[1, 2]).collect();
        assert_eq!(
            steps,
            vec![
                Step::pair(&[2, 1], 0, 1),
                Step::pair(&[1, 2], 0, 1),
                Step::plain(&[1, 2]),
            ]
        );
    }

    #[test]
    fn test_sorted_input_still_sorts() {
        let input: Vec<Value> = (1..=16).collect();
        let steps: Vec<Step> = HeapSteps::new(&input).collect();
        assert_eq!(steps.last().map(Step::values), Some(input.as_slice()));
    }

    #[test]
    fn test_every_extraction_moves_root() {
        let steps: Vec<Step> = HeapSteps::new(&[7, 7, 7, 7]).collect();
        let extractions = steps
            .iter()
            .filter(|s| matches!(s.highlights(), Highlights::Pair(0, _)))
            .count();
        // No sift swaps on equal values; one root swap per extraction.
        assert_eq!(extractions, 3);
    }
}
