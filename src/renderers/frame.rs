//! Renderer-agnostic bar data.
//!
//! A [`BarFrame`] holds everything needed to draw one step as a bar chart,
//! decoupled from the drawing backend. Bar heights are relative to the
//! largest value in the snapshot; value labels are only produced for small
//! inputs so they stay legible.

use serde::{Deserialize, Serialize};

use crate::engine::{Highlights, Step, Value};

/// Default maximum input size that still shows value labels.
pub const DEFAULT_LABEL_THRESHOLD: usize = 40;

/// Frame layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOptions {
    /// Show value labels when the input has at most this many elements.
    pub label_threshold: usize,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            label_threshold: DEFAULT_LABEL_THRESHOLD,
        }
    }
}

/// One bar of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Underlying value.
    pub value: Value,
    /// Height relative to the tallest bar, in `[0, 1]`.
    pub height: f64,
    /// Whether this position is highlighted in the step.
    pub highlighted: bool,
    /// Value label, present only below the label threshold.
    pub label: Option<String>,
}

impl Bar {
    /// Height scaled to `rows` cells, at least one cell for non-zero values.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn scaled_height(&self, rows: u16) -> u16 {
        if self.value == 0 || rows == 0 {
            return 0;
        }
        let cells = (self.height * f64::from(rows)).round() as u16;
        cells.clamp(1, rows)
    }
}

/// Bar chart data for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarFrame {
    /// Bars in sequence order.
    pub bars: Vec<Bar>,
    /// Largest value in the snapshot.
    pub max_value: Value,
    /// Highlights of the source step.
    pub highlights: Highlights,
    /// Whether labels are shown.
    pub show_labels: bool,
}

impl BarFrame {
    /// Build the frame for a step.
    #[must_use]
    pub fn from_step(step: &Step, options: &FrameOptions) -> Self {
        Self::from_values(step.values(), step.highlights(), options)
    }

    /// Build a frame from raw values.
    #[must_use]
    pub fn from_values(values: &[Value], highlights: Highlights, options: &FrameOptions) -> Self {
        let max_value = values.iter().copied().max().unwrap_or(0);
        let show_labels = values.len() <= options.label_threshold;

        let bars = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Bar {
                value,
                height: if max_value == 0 {
                    0.0
                } else {
                    f64::from(value) / f64::from(max_value)
                },
                highlighted: highlights.contains(i),
                label: show_labels.then(|| value.to_string()),
            })
            .collect();

        Self {
            bars,
            max_value,
            highlights,
            show_labels,
        }
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the frame has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_relative_to_max() {
        let frame = BarFrame::from_step(&Step::plain(&[100, 50, 200]), &FrameOptions::default());
        assert_eq!(frame.max_value, 200);
        assert!((frame.bars[0].height - 0.5).abs() < f64::EPSILON);
        assert!((frame.bars[1].height - 0.25).abs() < f64::EPSILON);
        assert!((frame.bars[2].height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_highlight_flags() {
        let frame = BarFrame::from_step(&Step::pair(&[3, 1, 2], 0, 2), &FrameOptions::default());
        let flags: Vec<bool> = frame.bars.iter().map(|b| b.highlighted).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_labels_only_below_threshold() {
        let options = FrameOptions { label_threshold: 3 };
        let small = BarFrame::from_step(&Step::plain(&[1, 2, 3]), &options);
        assert!(small.show_labels);
        assert_eq!(small.bars[2].label.as_deref(), Some("3"));

        let large = BarFrame::from_step(&Step::plain(&[1, 2, 3, 4]), &options);
        assert!(!large.show_labels);
        assert!(large.bars.iter().all(|b| b.label.is_none()));
    }

    #[test]
    fn test_default_threshold_is_forty() {
        let values: Vec<Value> = (1..=41).collect();
        let frame = BarFrame::from_step(&Step::plain(&values), &FrameOptions::default());
        assert!(!frame.show_labels);
        let frame = BarFrame::from_step(&Step::plain(&values[..40]), &FrameOptions::default());
        assert!(frame.show_labels);
    }

    #[test]
    fn test_empty_and_zero_frames() {
        let empty = BarFrame::from_step(&Step::plain(&[]), &FrameOptions::default());
        assert!(empty.is_empty());
        assert_eq!(empty.max_value, 0);

        let zeros = BarFrame::from_step(&Step::plain(&[0, 0]), &FrameOptions::default());
        assert_eq!(zeros.len(), 2);
        assert!(zeros.bars.iter().all(|b| b.scaled_height(10) == 0));
    }

    #[test]
    fn test_scaled_height() {
        let frame = BarFrame::from_step(&Step::plain(&[1, 400]), &FrameOptions::default());
        assert_eq!(frame.bars[1].scaled_height(20), 20);
        assert_eq!(frame.bars[0].scaled_height(20), 1);
        assert_eq!(frame.bars[0].scaled_height(0), 0);
    }
}
