//! Pacing between steps.
//!
//! The driver has exactly one suspension point per step: after rendering it
//! hands the current delay to a [`Pacer`]. Swapping the pacer changes how the
//! wait happens (thread sleep, polling terminal input, recording in tests)
//! without touching the playback loop.

use std::time::Duration;

use crate::error::SortResult;

/// The driver's suspension point between two steps.
pub trait Pacer {
    /// Wait for `delay` before the next step is pulled.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting fails (for example a terminal read
    /// error); the driver aborts the run.
    fn pause(&mut self, delay: Duration) -> SortResult<()>;
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) -> SortResult<()> {
        (**self).pause(delay)
    }
}

/// Blocks the calling thread for the delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) -> SortResult<()> {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        Ok(())
    }
}

/// Records requested delays without waiting.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Vec<Duration>,
}

impl RecordingPacer {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { pauses: Vec::new() }
    }

    /// Delays requested so far, in order.
    #[must_use]
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    /// Sum of all requested delays.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) -> SortResult<()> {
        self.pauses.push(delay);
        Ok(())
    }
}

/// Convert a delay to whole nanoseconds, saturating at `u64::MAX`.
#[must_use]
pub fn duration_to_nanos(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX)
}
