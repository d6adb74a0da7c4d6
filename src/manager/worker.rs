//! Worker thread driving the engine with queued input frames.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::exchange::{BoundedFrameQueue, LatestResultSlot};
use crate::frame::Scoped;
use crate::integration::{ExtractOptions, InputFrame, TrackingEngine, track_frame};
use crate::manager::stats::WorkerStats;

/// Queue of type-erased input frames shared with the producer.
pub(crate) type InputQueue = BoundedFrameQueue<Box<dyn InputFrame>>;

/// Lifecycle phase of the worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerPhase {
    /// Polling the engine until the tracker is initialized
    AwaitingInit = 0,
    /// Processing input frames
    TrackingActive = 1,
    /// Not running; also the phase before the first start
    Stopped = 2,
}

impl WorkerPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::AwaitingInit,
            1 => Self::TrackingActive,
            _ => Self::Stopped,
        }
    }
}

/// Stop flag and phase shared by the controller and the worker.
#[derive(Debug)]
pub(crate) struct WorkerControl {
    stop: AtomicBool,
    phase: AtomicU8,
}

impl WorkerControl {
    pub(crate) fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
            phase: AtomicU8::new(WorkerPhase::Stopped as u8),
        }
    }

    /// Prepare for a new session.
    pub(crate) fn reset(&self) {
        self.stop.store(false, Ordering::SeqCst);
        self.set_phase(WorkerPhase::AwaitingInit);
    }

    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub(crate) fn phase(&self) -> WorkerPhase {
        WorkerPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub(crate) fn set_phase(&self, phase: WorkerPhase) {
        self.phase.store(phase as u8, Ordering::Release);
    }
}

/// One session's worker: `AwaitingInit -> TrackingActive -> Stopped`.
///
/// The engine lock is taken once per initialization attempt and once per
/// inject/step/extract sequence, never across a whole iteration.
pub(crate) struct WorkerLoop<E: TrackingEngine> {
    engine: Arc<Mutex<E>>,
    queue: Arc<InputQueue>,
    slot: Arc<LatestResultSlot>,
    control: Arc<WorkerControl>,
    stats: Arc<WorkerStats>,
    options: ExtractOptions,
    idle_backoff: Duration,
}

impl<E: TrackingEngine> WorkerLoop<E> {
    pub(crate) fn new(
        engine: Arc<Mutex<E>>,
        queue: Arc<InputQueue>,
        slot: Arc<LatestResultSlot>,
        control: Arc<WorkerControl>,
        stats: Arc<WorkerStats>,
        options: ExtractOptions,
        idle_backoff: Duration,
    ) -> Self {
        Self {
            engine,
            queue,
            slot,
            control,
            stats,
            options,
            idle_backoff,
        }
    }

    /// Run the loop on a new named thread.
    pub(crate) fn spawn(self, thread_name: &str) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || self.run())
    }

    /// Run until a stop is requested.
    pub(crate) fn run(self) {
        info!("tracking worker started");

        if self.await_init() {
            self.control.set_phase(WorkerPhase::TrackingActive);
            info!("tracker initialized");
            while !self.control.stop_requested() {
                if !self.engine.lock().is_initialized() {
                    info!("tracker no longer initialized, leaving tracking phase");
                    break;
                }
                if !self.run_iteration() {
                    self.idle();
                }
            }
        }

        self.control.set_phase(WorkerPhase::Stopped);
        let stats = self.stats.snapshot();
        info!(
            frames_evaluated = stats.frames_evaluated,
            results_published = stats.results_published,
            inputs_dropped = stats.inputs_dropped,
            engine_errors = stats.engine_errors,
            "tracking worker exited"
        );
    }

    /// Poll the engine until it reports an initialized tracker.
    ///
    /// Returns `false` if a stop was requested first.
    fn await_init(&self) -> bool {
        loop {
            if self.control.stop_requested() {
                return false;
            }
            let ready = self.engine.lock().initialize();
            match ready {
                Ok(true) => return true,
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "tracker initialization step failed");
                    self.stats.record_engine_error();
                }
            }
            self.idle();
        }
    }

    /// Process at most one queued input frame.
    ///
    /// Returns `false` when there was nothing to do.
    pub(crate) fn run_iteration(&self) -> bool {
        let input = match self.queue.pop() {
            Ok(Some(input)) => input,
            Ok(None) => return false,
            Err(err) => {
                debug!(error = %err, "input queue gone, stopping worker");
                self.control.request_stop();
                return false;
            }
        };

        let frame = {
            let mut input = Scoped::new(input);
            input.evaluate()
        };
        let Some(frame) = frame else {
            trace!("input frame produced no data");
            self.stats.record_evaluation_miss();
            return true;
        };
        self.stats.record_evaluated();
        let frame = Scoped::new(frame);

        let outcome = {
            let mut engine = self.engine.lock();
            track_frame(&mut *engine, &frame, &self.options)
        };

        match outcome {
            Ok(Some(result)) => {
                let result = Scoped::new(result);
                match self.slot.push(&result) {
                    Ok(()) => self.stats.record_published(),
                    Err(err) => debug!(error = %err, "result slot rejected frame"),
                }
            }
            Ok(None) => trace!(timestamp = frame.timestamp(), "no result for frame"),
            Err(err) => {
                warn!(
                    error = %err,
                    timestamp = frame.timestamp(),
                    "tracking step failed, skipping frame"
                );
                self.stats.record_engine_error();
            }
        }
        true
    }

    fn idle(&self) {
        if self.idle_backoff.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(self.idle_backoff);
        }
    }
}
