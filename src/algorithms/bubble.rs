//! Bubble sort.
//!
//! Runs every pass over the unsorted prefix with no early exit; only actual
//! swaps produce a step.

use super::Working;
use crate::engine::{Step, Value};

/// Lazy bubble sort step source.
#[derive(Debug, Clone)]
pub struct BubbleSteps {
    work: Working,
    /// Completed outer passes.
    pass: usize,
    /// Left index of the next adjacent pair in the current pass.
    j: usize,
}

impl BubbleSteps {
    /// Start a run over a copy of `input`.
    #[must_use]
    pub fn new(input: &[Value]) -> Self {
        Self {
            work: Working::new(input),
            pass: 0,
            j: 0,
        }
    }
}

impl Iterator for BubbleSteps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.work.len();
        while self.pass + 1 < n {
            while self.j + 1 < n - self.pass {
                let j = self.j;
                self.j += 1;
                if self.work.values()[j] > self.work.values()[j + 1] {
                    self.work.swap(j, j + 1);
                    return Some(self.work.pair(j, j + 1));
                }
            }
            self.pass += 1;
            self.j = 0;
        }
        self.work.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Highlights;

    #[test]
    fn test_first_swap_highlights_leading_pair() {
        let steps: Vec<Step> = BubbleSteps::new(&[5, 3, 8, 1]).collect();
        assert_eq!(steps[0].values(), &[3, 5, 8, 1]);
        assert_eq!(steps[0].highlights(), Highlights::Pair(0, 1));
        assert_eq!(steps.last().map(Step::values), Some(&[1, 3, 5, 8][..]));
    }

    #[test]
    fn test_emits_one_step_per_swap() {
        // [5,3,8,1]: swaps (0,1) (2,3) | (1,2) | (0,1)
        let steps: Vec<Step> = BubbleSteps::new(&[5, 3, 8, 1]).collect();
        let highlights: Vec<Highlights> = steps.iter().map(Step::highlights).collect();
        assert_eq!(
            highlights,
            vec![
                Highlights::Pair(0, 1),
                Highlights::Pair(2, 3),
                Highlights::Pair(1, 2),
                Highlights::Pair(0, 1),
                Highlights::None,
            ]
        );
    }

    #[test]
    fn test_sorted_input_is_silent() {
        let steps: Vec<Step> = BubbleSteps::new(&[1, 2, 3, 4, 5]).collect();
        assert_eq!(steps, vec![Step::plain(&[1, 2, 3, 4, 5])]);
    }

    #[test]
    fn test_reversed_input_swaps_every_inversion() {
        let steps: Vec<Step> = BubbleSteps::new(&[4, 3, 2, 1]).collect();
        // n(n-1)/2 inversions + terminal
        assert_eq!(steps.len(), 6 + 1);
    }

    #[test]
    fn test_equal_neighbours_are_not_swapped() {
        let steps: Vec<Step> = BubbleSteps::new(&[2, 2, 1]).collect();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].values(), &[2, 1, 2]);
        assert_eq!(steps[1].values(), &[1, 2, 2]);
    }
}
