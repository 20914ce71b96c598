//! Core playback engine.
//!
//! Implements the playback loop with:
//! - Lazy step pulling (one step per iteration, never ahead of the renderer)
//! - A single suspension point per step (the [`Pacer`])
//! - Cooperative stop, checked once per step boundary
//! - Step guard for stop-on-error
//! - At most one running playback per driver

pub mod clock;
pub mod guard;
pub mod rng;
pub mod state;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use clock::{Pacer, RecordingPacer, ThreadPacer};
pub use guard::{GuardConfig, StepGuard};
pub use rng::DataRng;
pub use state::{Highlights, Step, Value};

use crate::algorithms::Algorithm;
use crate::config::VisualizerConfig;
use crate::error::{SortError, SortResult};
use crate::renderers::Renderer;

/// Whether a playback is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No run in progress.
    Idle,
    /// A run is pulling and rendering steps.
    Running,
}

/// How a call to [`PlaybackDriver::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackOutcome {
    /// The source was exhausted.
    Completed,
    /// A stop was requested and observed at a step boundary.
    Stopped,
    /// Another run was in progress; nothing happened.
    AlreadyRunning,
}

/// Summary of one playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackReport {
    /// How the run ended.
    pub outcome: PlaybackOutcome,
    /// Steps pulled from the source and rendered.
    pub steps_rendered: u64,
    /// The closing render (input sequence, no highlights), if any.
    pub final_step: Option<Step>,
}

impl PlaybackReport {
    const fn already_running() -> Self {
        Self {
            outcome: PlaybackOutcome::AlreadyRunning,
            steps_rendered: 0,
            final_step: None,
        }
    }
}

#[derive(Debug)]
struct Shared {
    running: AtomicBool,
    stop_requested: AtomicBool,
    delay_nanos: AtomicU64,
}

/// Control surface of a driver, shareable with renderers, pacers and other
/// threads.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    shared: Arc<Shared>,
}

impl PlaybackHandle {
    /// Create idle playback state with the given delay.
    ///
    /// Every driver built from clones of one handle shares its running flag,
    /// so at most one of them plays at a time.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                stop_requested: AtomicBool::new(false),
                delay_nanos: AtomicU64::new(clock::duration_to_nanos(delay)),
            }),
        }
    }

    /// Ask the running playback to stop at the next step boundary.
    pub fn stop(&self) {
        self.shared.stop_requested.store(true, Ordering::Release);
    }

    /// Change the per-step delay. A pause already in progress is not
    /// affected; the new value applies from the next step.
    pub fn set_delay(&self, delay: Duration) {
        self.shared
            .delay_nanos
            .store(clock::duration_to_nanos(delay), Ordering::Release);
    }

    /// Current per-step delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_nanos(self.shared.delay_nanos.load(Ordering::Acquire))
    }

    /// Whether a playback is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Current playback status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        if self.is_running() {
            PlaybackStatus::Running
        } else {
            PlaybackStatus::Idle
        }
    }

    /// Claim the running flag. `None` if a run is already in progress.
    fn try_start(&self) -> Option<RunningGuard<'_>> {
        self.shared
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.shared.stop_requested.store(false, Ordering::Release);
        Some(RunningGuard {
            shared: &self.shared,
        })
    }

    fn stop_requested(&self) -> bool {
        self.shared.stop_requested.load(Ordering::Acquire)
    }
}

/// Releases the running flag on every exit path.
struct RunningGuard<'a> {
    shared: &'a Shared,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.shared.stop_requested.store(false, Ordering::Release);
        self.shared.running.store(false, Ordering::Release);
    }
}

/// Playback driver.
///
/// Pulls steps from a source one at a time, checks each with a
/// [`StepGuard`], hands it to a [`Renderer`], then waits on its [`Pacer`].
/// When the loop ends (source exhausted or stop observed) it renders the
/// input sequence once more with no highlights.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sortviz::algorithms::Algorithm;
/// use sortviz::engine::{PlaybackDriver, PlaybackOutcome, RecordingPacer, Step};
/// use sortviz::error::SortResult;
///
/// let driver = PlaybackDriver::with_pacer(Duration::from_millis(5), RecordingPacer::new());
/// let mut frames = Vec::new();
/// let mut render = |step: &Step| -> SortResult<()> {
///     frames.push(step.clone());
///     Ok(())
/// };
/// let report = driver.run(&[5, 3, 8, 1], Algorithm::Bubble, &mut render).unwrap();
/// assert_eq!(report.outcome, PlaybackOutcome::Completed);
/// assert_eq!(frames[0].values(), &[3, 5, 8, 1]);
/// ```
#[derive(Debug)]
pub struct PlaybackDriver<P = ThreadPacer> {
    handle: PlaybackHandle,
    pacer: RefCell<P>,
    guard: GuardConfig,
}

impl PlaybackDriver<ThreadPacer> {
    /// Create a driver that sleeps the calling thread between steps.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self::with_pacer(delay, ThreadPacer)
    }
}

impl<P: Pacer> PlaybackDriver<P> {
    /// Create a driver with a custom pacer.
    #[must_use]
    pub fn with_pacer(delay: Duration, pacer: P) -> Self {
        Self::with_handle(PlaybackHandle::new(delay), pacer)
    }

    /// Create a driver controlled by an existing handle.
    #[must_use]
    pub fn with_handle(handle: PlaybackHandle, pacer: P) -> Self {
        Self {
            handle,
            pacer: RefCell::new(pacer),
            guard: GuardConfig::default(),
        }
    }

    /// Create a driver from configuration (delay and guard settings).
    #[must_use]
    pub fn from_config(config: &VisualizerConfig, pacer: P) -> Self {
        Self::with_pacer(config.delay(), pacer).with_guard(config.guard)
    }

    /// Replace the guard configuration.
    #[must_use]
    pub const fn with_guard(mut self, guard: GuardConfig) -> Self {
        self.guard = guard;
        self
    }

    /// Control handle sharing this driver's state.
    #[must_use]
    pub fn handle(&self) -> PlaybackHandle {
        self.handle.clone()
    }

    /// Mutable access to the pacer between runs.
    pub fn pacer_mut(&mut self) -> &mut P {
        self.pacer.get_mut()
    }

    /// Consume the driver and return its pacer.
    pub fn into_pacer(self) -> P {
        self.pacer.into_inner()
    }

    /// Play `algorithm` over a copy of `input`.
    ///
    /// # Errors
    ///
    /// Returns the first guard violation, renderer error or pacer error.
    /// The driver is idle again afterwards in every case.
    pub fn run<R>(
        &self,
        input: &[Value],
        algorithm: Algorithm,
        renderer: &mut R,
    ) -> SortResult<PlaybackReport>
    where
        R: Renderer + ?Sized,
    {
        tracing::info!(
            algorithm = algorithm.id(),
            len = input.len(),
            delay_ms = self.handle.delay().as_millis(),
            "starting playback"
        );
        self.run_source(input, algorithm.steps(input), renderer)
    }

    /// Play an arbitrary step source produced from `input`.
    ///
    /// Starting while another run of this driver is in progress returns
    /// immediately with [`PlaybackOutcome::AlreadyRunning`].
    ///
    /// # Errors
    ///
    /// Returns the first guard violation, renderer error or pacer error.
    pub fn run_source<I, R>(
        &self,
        input: &[Value],
        source: I,
        renderer: &mut R,
    ) -> SortResult<PlaybackReport>
    where
        I: IntoIterator<Item = Step>,
        R: Renderer + ?Sized,
    {
        let Some(_running) = self.handle.try_start() else {
            tracing::warn!("playback already running, start request ignored");
            return Ok(PlaybackReport::already_running());
        };

        match self.drive(input, source.into_iter(), renderer) {
            Ok(report) => {
                tracing::info!(
                    outcome = ?report.outcome,
                    steps = report.steps_rendered,
                    "playback finished"
                );
                Ok(report)
            }
            Err(err) => {
                tracing::error!(error = %err, "playback aborted");
                Err(err)
            }
        }
    }

    fn drive<I, R>(
        &self,
        input: &[Value],
        mut steps: I,
        renderer: &mut R,
    ) -> SortResult<PlaybackReport>
    where
        I: Iterator<Item = Step>,
        R: Renderer + ?Sized,
    {
        let mut pacer = self
            .pacer
            .try_borrow_mut()
            .map_err(|_| SortError::render("pacer already in use"))?;
        let mut guard = StepGuard::new(input, self.guard);
        let mut steps_rendered = 0;
        let mut last: Option<Step> = None;
        let mut outcome = PlaybackOutcome::Completed;

        loop {
            if self.handle.stop_requested() {
                tracing::debug!(steps = steps_rendered, "stop observed");
                outcome = PlaybackOutcome::Stopped;
                break;
            }
            let Some(step) = steps.next() else {
                break;
            };

            guard.check(&step)?;
            renderer.render(&step)?;
            steps_rendered += 1;
            tracing::debug!(
                step = steps_rendered,
                highlights = ?step.highlights().indices(),
                "rendered step"
            );
            last = Some(step);

            // Latched here: a delay change lands on the next pause.
            pacer.pause(self.handle.delay())?;
        }

        if outcome == PlaybackOutcome::Completed {
            guard.check_terminal(last.as_ref())?;
        }

        let final_step = Step::plain(input);
        renderer.render(&final_step)?;

        Ok(PlaybackReport {
            outcome,
            steps_rendered,
            final_step: Some(final_step),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_into(frames: &mut Vec<Step>) -> impl FnMut(&Step) -> SortResult<()> + '_ {
        move |step: &Step| {
            frames.push(step.clone());
            Ok(())
        }
    }

    #[test]
    fn test_completed_run_renders_every_step_then_input() {
        let driver = PlaybackDriver::with_pacer(Duration::from_millis(2), RecordingPacer::new());
        let mut frames = Vec::new();
        let report = driver
            .run(&[5, 3, 8, 1], Algorithm::Bubble, &mut collect_into(&mut frames))
            .expect("run");

        assert_eq!(report.outcome, PlaybackOutcome::Completed);
        assert_eq!(report.steps_rendered, 5);
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0].highlights(), Highlights::Pair(0, 1));
        assert_eq!(frames[4], Step::plain(&[1, 3, 5, 8]));
        assert_eq!(frames[5], Step::plain(&[5, 3, 8, 1]));
        assert_eq!(report.final_step, Some(Step::plain(&[5, 3, 8, 1])));
        assert!(!driver.handle().is_running());
    }

    #[test]
    fn test_one_pause_per_step() {
        let mut driver =
            PlaybackDriver::with_pacer(Duration::from_millis(7), RecordingPacer::new());
        let mut frames = Vec::new();
        driver
            .run(&[2, 1], Algorithm::Quick, &mut collect_into(&mut frames))
            .expect("run");
        assert_eq!(
            driver.pacer_mut().pauses(),
            &[Duration::from_millis(7), Duration::from_millis(7)]
        );
    }

    #[test]
    fn test_stop_is_observed_at_next_boundary() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let handle = driver.handle();
        let mut frames = Vec::new();
        let mut render = |step: &Step| -> SortResult<()> {
            frames.push(step.clone());
            if frames.len() == 2 {
                handle.stop();
            }
            Ok(())
        };

        let input = [9, 8, 7, 6, 5, 4];
        let report = driver
            .run(&input, Algorithm::Bubble, &mut render)
            .expect("run");

        assert_eq!(report.outcome, PlaybackOutcome::Stopped);
        assert_eq!(report.steps_rendered, 2);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2], Step::plain(&input));
        assert!(!driver.handle().is_running());
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let mut nested = Vec::new();
        let mut render = |_: &Step| -> SortResult<()> {
            let mut sink = |_: &Step| -> SortResult<()> { Ok(()) };
            nested.push(driver.run(&[2, 1], Algorithm::Heap, &mut sink)?);
            Ok(())
        };

        let report = driver
            .run(&[3, 2, 1], Algorithm::Selection, &mut render)
            .expect("run");
        assert_eq!(report.outcome, PlaybackOutcome::Completed);
        assert!(nested
            .iter()
            .all(|r| r.outcome == PlaybackOutcome::AlreadyRunning));
        assert!(!nested.is_empty());
    }

    #[test]
    fn test_drivers_sharing_a_handle_exclude_each_other() {
        let handle = PlaybackHandle::new(Duration::ZERO);
        let first = PlaybackDriver::with_handle(handle.clone(), RecordingPacer::new());
        let second = PlaybackDriver::with_handle(handle, RecordingPacer::new());

        let mut outcomes = Vec::new();
        let mut render = |_: &Step| -> SortResult<()> {
            let mut sink = |_: &Step| -> SortResult<()> { Ok(()) };
            outcomes.push(second.run(&[1], Algorithm::Bubble, &mut sink)?.outcome);
            Ok(())
        };
        first
            .run(&[2, 1], Algorithm::Bubble, &mut render)
            .expect("run");

        assert!(outcomes
            .iter()
            .all(|&o| o == PlaybackOutcome::AlreadyRunning));
        assert!(!outcomes.is_empty());
    }

    #[test]
    fn test_running_flag_visible_during_run() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let handle = driver.handle();
        let mut statuses = Vec::new();
        let mut render = |_: &Step| -> SortResult<()> {
            statuses.push(handle.status());
            Ok(())
        };
        driver
            .run(&[1, 2, 3], Algorithm::Insertion, &mut render)
            .expect("run");
        assert!(statuses.iter().all(|&s| s == PlaybackStatus::Running));
        assert_eq!(driver.handle().status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_delay_change_applies_from_next_pause() {
        let mut driver =
            PlaybackDriver::with_pacer(Duration::from_millis(10), RecordingPacer::new());
        let handle = driver.handle();
        let mut count = 0;
        let mut render = |_: &Step| -> SortResult<()> {
            count += 1;
            if count == 2 {
                handle.set_delay(Duration::from_millis(1));
            }
            Ok(())
        };
        driver
            .run(&[4, 3, 2, 1], Algorithm::Selection, &mut render)
            .expect("run");

        let pauses = driver.pacer_mut().pauses().to_vec();
        assert_eq!(pauses[0], Duration::from_millis(10));
        assert!(pauses[1..].iter().all(|&d| d == Duration::from_millis(1)));
    }

    #[test]
    fn test_renderer_error_aborts_and_resets_flag() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let mut render = |_: &Step| -> SortResult<()> { Err(SortError::render("closed")) };
        let err = driver
            .run(&[2, 1], Algorithm::Bubble, &mut render)
            .unwrap_err();
        assert!(matches!(err, SortError::Render(_)));
        assert!(!driver.handle().is_running());

        let mut ok = |_: &Step| -> SortResult<()> { Ok(()) };
        let report = driver.run(&[2, 1], Algorithm::Bubble, &mut ok).expect("rerun");
        assert_eq!(report.outcome, PlaybackOutcome::Completed);
    }

    #[test]
    fn test_malformed_source_is_rejected() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let bogus = vec![Step::pair(&[2, 2], 0, 1), Step::plain(&[1, 2])];
        let mut frames = Vec::new();
        let err = driver
            .run_source(&[2, 1], bogus, &mut collect_into(&mut frames))
            .unwrap_err();
        assert!(err.is_guard_violation());
        assert!(frames.is_empty());
        assert!(!driver.handle().is_running());
    }

    #[test]
    fn test_unsorted_terminal_is_rejected() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        let unfinished = vec![Step::plain(&[2, 1])];
        let mut sink = |_: &Step| -> SortResult<()> { Ok(()) };
        let err = driver.run_source(&[2, 1], unfinished, &mut sink).unwrap_err();
        assert!(matches!(err, SortError::InvalidTerminal { .. }));
    }

    #[test]
    fn test_stop_requested_while_idle_does_not_leak_into_next_run() {
        let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
        driver.handle().stop();
        let mut sink = |_: &Step| -> SortResult<()> { Ok(()) };
        let report = driver.run(&[3, 1, 2], Algorithm::Merge, &mut sink).expect("run");
        assert_eq!(report.outcome, PlaybackOutcome::Completed);
    }

    #[test]
    fn test_stop_from_another_thread() {
        let driver = PlaybackDriver::new(Duration::from_millis(5));
        let handle = driver.handle();
        let input: Vec<Value> = (0..200).rev().collect();

        let stopper = std::thread::spawn(move || {
            while !handle.is_running() {
                std::thread::yield_now();
            }
            std::thread::sleep(Duration::from_millis(20));
            handle.stop();
        });

        let mut sink = |_: &Step| -> SortResult<()> { Ok(()) };
        let report = driver.run(&input, Algorithm::Bubble, &mut sink).expect("run");
        stopper.join().expect("join");

        assert_eq!(report.outcome, PlaybackOutcome::Stopped);
        assert!(report.steps_rendered > 0);
        assert_eq!(report.final_step, Some(Step::plain(&input)));
    }

    #[test]
    fn test_from_config_uses_delay() {
        let config = VisualizerConfig::builder().delay_ms(25).build();
        let driver = PlaybackDriver::from_config(&config, RecordingPacer::new());
        assert_eq!(driver.handle().delay(), Duration::from_millis(25));
    }
}
