//! Renderers for playback steps.
//!
//! The driver only knows the [`Renderer`] trait. Front ends turn each step
//! into a [`BarFrame`] (renderer-agnostic bar data) and draw it however they
//! like: plain text for the CLI, a ratatui chart for the TUI, or a closure
//! in tests.
//!
//! ```text
//! PlaybackDriver
//!       ↓ &Step
//! ┌─────────────────────┐
//! │      Renderer       │
//! └─────────────────────┘
//!       ↓           ↓
//!  TextRenderer     SortApp (TUI)
//! ```

pub mod frame;
pub mod text;

pub use frame::{Bar, BarFrame, FrameOptions};
pub use text::TextRenderer;

use crate::engine::Step;
use crate::error::SortResult;

/// Consumer of playback steps.
pub trait Renderer {
    /// Draw one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is gone; the driver aborts the run.
    fn render(&mut self, step: &Step) -> SortResult<()>;
}

impl<F> Renderer for F
where
    F: FnMut(&Step) -> SortResult<()>,
{
    fn render(&mut self, step: &Step) -> SortResult<()> {
        self(step)
    }
}

/// Discards every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _step: &Step) -> SortResult<()> {
        Ok(())
    }
}
