//! Explicit frame scheduling: "wait for the next frame signal, then run one
//! frame", repeated until stopped. The host supplies the signal (the browser's
//! animation frame timestamps, or a synthetic clock in native runs).

use std::cell::Cell;
use std::rc::Rc;

use hearth_core::constants::FRAME_GAP_LIMIT_MS;

/// Shared stop flag. Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Result of offering one frame signal to a [`FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame body ran.
    Ran,
    /// The gap since the last frame was too long; the clock was resynced instead.
    /// Never returned twice in a row.
    Skipped,
    /// The loop has been stopped; callers must not reschedule.
    Stopped,
}

#[derive(Debug)]
pub struct FrameLoop {
    name: String,
    last_timestamp: Option<f64>,
    last_skipped: bool,
    gap_limit_ms: f64,
    stop: StopHandle,
    frames_run: u64,
    frames_skipped: u64,
}

impl FrameLoop {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_timestamp: None,
            last_skipped: false,
            gap_limit_ms: FRAME_GAP_LIMIT_MS,
            stop: StopHandle::default(),
            frames_run: 0,
            frames_skipped: 0,
        }
    }

    pub fn with_gap_limit(mut self, gap_limit_ms: f64) -> Self {
        self.gap_limit_ms = gap_limit_ms;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Offer one frame signal. `frame` receives `(timestamp, delta_ms)`.
    ///
    /// A gap longer than the limit (e.g. a backgrounded tab) skips the frame
    /// and resyncs the timestamp, so the next frame sees a normal delta. The
    /// frame after a skip always runs, so a host that is steadily slower than
    /// the limit still animates.
    pub fn step(&mut self, timestamp: f64, frame: impl FnOnce(f64, f64)) -> FrameOutcome {
        if self.stop.is_stopped() {
            return FrameOutcome::Stopped;
        }

        let delta = self.last_timestamp.map_or(0.0, |last| timestamp - last);
        self.last_timestamp = Some(timestamp);

        if delta > self.gap_limit_ms && !self.last_skipped {
            self.last_skipped = true;
            self.frames_skipped += 1;
            log::debug!("{}: skipping frame after {delta:.0}ms gap", self.name);
            return FrameOutcome::Skipped;
        }

        self.last_skipped = false;
        frame(timestamp, delta);
        self.frames_run += 1;
        FrameOutcome::Ran
    }

    /// Drive the loop from a signal source until it is stopped or the
    /// source runs dry. Returns the number of frames that ran.
    pub fn run(
        &mut self,
        mut next_signal: impl FnMut() -> Option<f64>,
        mut frame: impl FnMut(f64, f64),
    ) -> u64 {
        let start = self.frames_run;
        while self.is_running() {
            let Some(timestamp) = next_signal() else {
                break;
            };
            if self.step(timestamp, &mut frame) == FrameOutcome::Stopped {
                break;
            }
        }
        let ran = self.frames_run - start;
        log::info!("Frame loop '{}' ended after {ran} frames", self.name);
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_runs_and_reports_delta() {
        let mut frame_loop = FrameLoop::new("test");
        let mut deltas = Vec::new();
        for ts in [0.0, 16.0, 33.0] {
            let outcome = frame_loop.step(ts, |_, delta| deltas.push(delta));
            assert_eq!(outcome, FrameOutcome::Ran);
        }
        assert_eq!(deltas, [0.0, 16.0, 17.0]);
        assert_eq!(frame_loop.frames_run(), 3);
    }

    #[test]
    fn test_long_gap_skips_one_frame() {
        let mut frame_loop = FrameLoop::new("test");
        let mut ran = Vec::new();
        for ts in [1000.0, 1016.0, 5000.0, 5016.0] {
            frame_loop.step(ts, |ts, _| ran.push(ts));
        }
        assert_eq!(ran, [1000.0, 1016.0, 5016.0]);
        assert_eq!(frame_loop.frames_skipped(), 1);
    }

    #[test]
    fn test_slow_steady_cadence_keeps_running() {
        let mut frame_loop = FrameLoop::new("slow");
        let mut ran = 0;
        for i in 0..20 {
            frame_loop.step(i as f64 * 150.0, |_, delta| {
                assert!(delta == 0.0 || delta == 150.0);
                ran += 1;
            });
        }
        // Only the first 150ms gap is treated as a stall.
        assert_eq!(frame_loop.frames_skipped(), 1);
        assert_eq!(ran, 19);
    }

    #[test]
    fn test_never_skips_twice_in_a_row() {
        let mut frame_loop = FrameLoop::new("test");
        let outcomes: Vec<_> = [0.0, 500.0, 1000.0, 1016.0, 3000.0, 3016.0]
            .into_iter()
            .map(|ts| frame_loop.step(ts, |_, _| {}))
            .collect();
        use FrameOutcome::{Ran, Skipped};
        assert_eq!(outcomes, [Ran, Skipped, Ran, Ran, Skipped, Ran]);
    }

    #[test]
    fn test_stop_handle_halts_loop() {
        let mut frame_loop = FrameLoop::new("test");
        let stop = frame_loop.stop_handle();
        let mut clock = 0.0;
        let mut count = 0;
        let ran = frame_loop.run(
            || {
                clock += 16.0;
                Some(clock)
            },
            |_, _| {
                count += 1;
                if count == 10 {
                    stop.stop();
                }
            },
        );
        assert_eq!(ran, 10);
        assert!(!frame_loop.is_running());
        assert_eq!(frame_loop.step(1e6, |_, _| panic!("stopped loop ran")), FrameOutcome::Stopped);
    }

    #[test]
    fn test_run_ends_when_signal_source_dries_up() {
        let mut frame_loop = FrameLoop::new("test");
        let mut signals = vec![48.0, 32.0, 16.0];
        let ran = frame_loop.run(|| signals.pop(), |_, _| {});
        assert_eq!(ran, 3);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn test_stop_handle_clones_share_flag() {
        let a = StopHandle::default();
        let b = a.clone();
        b.stop();
        assert!(a.is_stopped());
    }
}
