//! Plain-text renderer for headless playback.
//!
//! Each step becomes one line of block characters scaled to the largest
//! value, followed by a marker line under highlighted positions. Small inputs
//! also print their values, with highlighted ones in brackets:
//!
//! ```text
//!     1 ▃▆█▁  3 [5] [8] 1
//!       ^^
//! ```

use std::io::Write;

use super::frame::{BarFrame, FrameOptions};
use super::Renderer;
use crate::engine::Step;
use crate::error::SortResult;

const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Writes steps as text bars to any [`Write`] sink.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    options: FrameOptions,
    rendered: u64,
}

impl<W: Write> TextRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W, options: FrameOptions) -> Self {
        Self {
            out,
            options,
            rendered: 0,
        }
    }

    /// Lines written so far (one per step).
    #[must_use]
    pub const fn rendered(&self) -> u64 {
        self.rendered
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn bars_line(frame: &BarFrame) -> String {
        frame
            .bars
            .iter()
            .map(|bar| {
                let levels = BLOCKS.len() - 1;
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let level = (bar.height * levels as f64).round() as usize;
                if bar.value > 0 {
                    BLOCKS[level.clamp(1, levels)]
                } else {
                    BLOCKS[0]
                }
            })
            .collect()
    }

    fn labels_line(frame: &BarFrame) -> String {
        frame
            .bars
            .iter()
            .filter_map(|bar| {
                bar.label.as_ref().map(|label| {
                    if bar.highlighted {
                        format!("[{label}]")
                    } else {
                        label.clone()
                    }
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn marker_line(frame: &BarFrame) -> String {
        let line: String = frame
            .bars
            .iter()
            .map(|bar| if bar.highlighted { '^' } else { ' ' })
            .collect();
        line.trim_end().to_string()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, step: &Step) -> SortResult<()> {
        let frame = BarFrame::from_step(step, &self.options);
        self.rendered += 1;

        let bars = Self::bars_line(&frame);
        if frame.show_labels {
            writeln!(
                self.out,
                "{:>5} {bars}  {}",
                self.rendered,
                Self::labels_line(&frame)
            )?;
        } else {
            writeln!(self.out, "{:>5} {bars}", self.rendered)?;
        }

        if !frame.highlights.is_empty() {
            writeln!(self.out, "      {}", Self::marker_line(&frame))?;
        }
        self.out.flush()?;
        Ok(())
    }
}
