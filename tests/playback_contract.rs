//! End-to-end playback contract: start, stop, delay changes and the final
//! render, driven through the public API only.

use sortviz::prelude::*;
use sortviz::renderers::NullRenderer;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Pacer that drives the handle from inside the playback loop, the way a UI
/// polling keys between steps does.
struct ScriptedPacer {
    handle: PlaybackHandle,
    pauses: usize,
    stop_after: Option<usize>,
    new_delay_after: Option<(usize, Duration)>,
    seen: Vec<Duration>,
}

impl ScriptedPacer {
    fn new(handle: PlaybackHandle) -> Self {
        Self {
            handle,
            pauses: 0,
            stop_after: None,
            new_delay_after: None,
            seen: Vec::new(),
        }
    }
}

impl Pacer for ScriptedPacer {
    fn pause(&mut self, delay: Duration) -> SortResult<()> {
        self.seen.push(delay);
        self.pauses += 1;
        if self.stop_after == Some(self.pauses) {
            self.handle.stop();
        }
        if let Some((after, delay)) = self.new_delay_after {
            if after == self.pauses {
                self.handle.set_delay(delay);
            }
        }
        Ok(())
    }
}

fn reversed(n: Value) -> Vec<Value> {
    (1..=n).rev().collect()
}

#[test]
fn stop_mid_run_renders_input_exactly_once_more() {
    let handle = PlaybackHandle::new(Duration::ZERO);
    let mut pacer = ScriptedPacer::new(handle.clone());
    pacer.stop_after = Some(3);
    let driver = PlaybackDriver::with_handle(handle.clone(), pacer);

    let input = reversed(12);
    let mut frames: Vec<Step> = Vec::new();
    let mut render = |step: &Step| -> SortResult<()> {
        frames.push(step.clone());
        Ok(())
    };
    let report = driver
        .run(&input, Algorithm::Heap, &mut render)
        .expect("run");

    assert_eq!(report.outcome, PlaybackOutcome::Stopped);
    assert_eq!(report.steps_rendered, 3);
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[3], Step::plain(&input));
    assert_eq!(handle.status(), PlaybackStatus::Idle);

    let source_prefix: Vec<Step> = Algorithm::Heap.steps(&input).take(3).collect();
    assert_eq!(&frames[..3], source_prefix.as_slice());
}

#[test]
fn delay_change_applies_from_the_next_pause() {
    let handle = PlaybackHandle::new(Duration::from_millis(40));
    let mut pacer = ScriptedPacer::new(handle.clone());
    pacer.new_delay_after = Some((2, Duration::from_millis(5)));
    let driver = PlaybackDriver::with_handle(handle, pacer);

    let input = [4, 3, 2, 1];
    let report = driver
        .run(&input, Algorithm::Bubble, &mut NullRenderer)
        .expect("run");
    let seen = driver.into_pacer().seen;

    assert_eq!(seen.len() as u64, report.steps_rendered);
    assert_eq!(&seen[..2], &[Duration::from_millis(40); 2]);
    assert!(seen[2..].iter().all(|d| *d == Duration::from_millis(5)));
}

#[test]
fn start_while_running_is_ignored() {
    let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
    let handle = driver.handle();
    let shadow = PlaybackDriver::with_handle(handle, RecordingPacer::new());

    let mut nested = Vec::new();
    let mut render = |_: &Step| -> SortResult<()> {
        let report = shadow.run(&[3, 2, 1], Algorithm::Selection, &mut NullRenderer)?;
        nested.push(report.outcome);
        Ok(())
    };
    let report = driver
        .run(&[2, 1], Algorithm::Insertion, &mut render)
        .expect("run");

    assert_eq!(report.outcome, PlaybackOutcome::Completed);
    assert!(!nested.is_empty());
    assert!(nested.iter().all(|o| *o == PlaybackOutcome::AlreadyRunning));

    // Once idle, the second driver starts normally.
    let report = shadow
        .run(&[3, 2, 1], Algorithm::Selection, &mut NullRenderer)
        .expect("run");
    assert_eq!(report.outcome, PlaybackOutcome::Completed);
}

#[test]
fn stop_from_another_thread_ends_a_paced_run() {
    let driver = PlaybackDriver::new(Duration::from_millis(20));
    let handle = driver.handle();
    let (started_tx, started_rx) = mpsc::channel();

    let stopper = thread::spawn(move || {
        started_rx.recv().expect("first step");
        handle.stop();
    });

    let input = reversed(200);
    let mut signalled = false;
    let mut render = |_: &Step| -> SortResult<()> {
        if !signalled {
            started_tx.send(()).expect("send");
            signalled = true;
        }
        Ok(())
    };
    let report = driver
        .run(&input, Algorithm::Bubble, &mut render)
        .expect("run");
    stopper.join().expect("join");

    assert_eq!(report.outcome, PlaybackOutcome::Stopped);
    assert!(report.steps_rendered >= 1);
    assert!(report.steps_rendered < 200 * 199 / 2);
    assert_eq!(report.final_step, Some(Step::plain(&input)));
}

#[test]
fn renderer_failure_leaves_driver_idle() {
    let driver = PlaybackDriver::with_pacer(Duration::ZERO, RecordingPacer::new());
    let mut calls = 0;
    let mut render = |_: &Step| -> SortResult<()> {
        calls += 1;
        if calls == 2 {
            return Err(SortError::render("display went away"));
        }
        Ok(())
    };
    let err = driver
        .run(&[3, 1, 2], Algorithm::Bubble, &mut render)
        .expect_err("renderer error propagates");
    assert!(matches!(err, SortError::Render(_)));
    assert!(!driver.handle().is_running());

    let report = driver
        .run(&[3, 1, 2], Algorithm::Bubble, &mut NullRenderer)
        .expect("restart");
    assert_eq!(report.outcome, PlaybackOutcome::Completed);
}

#[test]
fn text_renderer_prints_every_frame() {
    let config = VisualizerConfig::builder()
        .algorithm(Algorithm::Merge)
        .size(8)
        .delay_ms(0)
        .build();
    let input = config.generate_input();
    let driver = PlaybackDriver::from_config(&config, RecordingPacer::new());
    let mut renderer = TextRenderer::new(Vec::new(), config.frame_options());

    let report = driver
        .run(&input, config.algorithm, &mut renderer)
        .expect("run");
    assert_eq!(renderer.rendered(), report.steps_rendered + 1);

    let text = String::from_utf8(renderer.into_inner()).expect("utf8");
    assert!(text.lines().any(|line| line.contains('[')));
}
