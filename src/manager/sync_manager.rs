//! Host-facing manager tying producer, worker and consumer together.

use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tracing::{error, info, trace, warn};

use crate::error::{Result, SyncTrackError};
use crate::exchange::LatestResultSlot;
use crate::frame::Disposable;
use crate::integration::{InputFrame, TrackingEngine};
use crate::manager::config::ManagerConfig;
use crate::manager::events::{EventSink, TrackingEvent, emit_drain};
use crate::manager::stats::{StatsSnapshot, WorkerStats};
use crate::manager::worker::{InputQueue, WorkerControl, WorkerLoop, WorkerPhase};

/// Synchronous image-injection tracking session.
///
/// The host pushes input frames from its main loop and calls [`tick`] once
/// per update. A dedicated worker thread feeds the newest input into the
/// engine and publishes the latest result for the next tick.
///
/// [`tick`]: SyncTrackingManager::tick
pub struct SyncTrackingManager<E: TrackingEngine> {
    engine: Arc<Mutex<E>>,
    queue: Arc<InputQueue>,
    slot: Arc<LatestResultSlot>,
    control: Arc<WorkerControl>,
    stats: Arc<WorkerStats>,
    worker: Option<JoinHandle<()>>,
    config: ManagerConfig,
}

impl<E: TrackingEngine> SyncTrackingManager<E> {
    pub fn new(engine: E, config: ManagerConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            queue: Arc::new(InputQueue::with_capacity(config.input_capacity)),
            slot: Arc::new(LatestResultSlot::new()),
            control: Arc::new(WorkerControl::new()),
            stats: Arc::new(WorkerStats::new()),
            worker: None,
            config,
        }
    }

    pub fn with_default_config(engine: E) -> Self {
        Self::new(engine, ManagerConfig::default())
    }

    /// Start tracking with the configuration at `uri` and spawn the worker.
    ///
    /// Fails with [`SyncTrackError::AlreadyStarted`] while a session runs.
    pub fn start(&mut self, uri: &str) -> Result<()> {
        if self.worker.is_some() {
            return Err(SyncTrackError::AlreadyStarted);
        }

        self.engine
            .lock()
            .start_tracking(uri)
            .map_err(SyncTrackError::engine)?;

        self.stats.reset();
        self.control.reset();
        let worker = WorkerLoop::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.queue),
            Arc::clone(&self.slot),
            Arc::clone(&self.control),
            Arc::clone(&self.stats),
            self.config.extract_options(),
            self.config.idle_backoff,
        );

        match worker.spawn(&self.config.thread_name) {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => {
                self.control.set_phase(WorkerPhase::Stopped);
                self.stop_engine();
                return Err(err.into());
            }
        }

        info!(uri, capacity = self.queue.capacity(), "tracking session started");
        Ok(())
    }

    /// Stop the worker, stop the engine and drop all pending frames.
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        if let Some(handle) = self.worker.take() {
            self.control.request_stop();
            if handle.join().is_err() {
                error!("tracking worker panicked");
            }
            self.control.set_phase(WorkerPhase::Stopped);
            self.stop_engine();
            info!("tracking session stopped");
        }
        self.queue.clear();
        self.slot.clear();
    }

    fn stop_engine(&self) {
        if let Err(err) = self.engine.lock().stop_tracking() {
            warn!(error = %err, "failed to stop engine tracking");
        }
    }

    /// Queue an input frame for the worker. Never blocks.
    ///
    /// If the queue is full the oldest pending frame is disposed.
    pub fn push_input_frame<I: InputFrame + 'static>(&self, frame: I) -> Result<()> {
        let input: Box<dyn InputFrame> = Box::new(frame);
        if let Some(mut dropped) = self.queue.push_and_get_overflow(input)? {
            self.stats.record_dropped_input();
            trace!("input queue full, dropping oldest frame");
            dropped.dispose();
        }
        Ok(())
    }

    /// Drain the latest result and return the events for this tick.
    pub fn tick(&self) -> Result<Vec<TrackingEvent>> {
        let mut events = Vec::new();
        self.tick_into(&mut |event: TrackingEvent| events.push(event))?;
        Ok(events)
    }

    /// Like [`SyncTrackingManager::tick`], delivering events to `sink`.
    ///
    /// Does nothing until the tracker is initialized.
    pub fn tick_into<S: EventSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        if !self.is_ready() {
            return Ok(());
        }
        let drain = self.slot.pop()?;
        emit_drain(drain, sink)
    }

    /// Whether the tracker has finished initializing.
    pub fn is_ready(&self) -> bool {
        self.control.phase() == WorkerPhase::TrackingActive
    }

    pub fn phase(&self) -> WorkerPhase {
        self.control.phase()
    }

    /// Whether a session is started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Run `command` with exclusive access to the engine.
    ///
    /// Blocks while the worker is inside a tracking step.
    pub fn execute<R>(&self, command: impl FnOnce(&mut E) -> R) -> R {
        let mut engine = self.engine.lock();
        command(&mut *engine)
    }

    /// Like [`SyncTrackingManager::execute`] for fallible engine commands.
    pub fn try_execute<R>(
        &self,
        command: impl FnOnce(&mut E) -> std::result::Result<R, E::Error>,
    ) -> Result<R> {
        self.execute(command).map_err(SyncTrackError::engine)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of input frames waiting for the worker.
    pub fn pending_inputs(&self) -> usize {
        self.queue.len()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}

impl<E: TrackingEngine> Drop for SyncTrackingManager<E> {
    fn drop(&mut self) {
        self.stop();
        self.queue.dispose();
        self.slot.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::integration::mock::MockEngine;
    use crate::integration::{ReadyFrame, TrackerKind};
    use std::thread;
    use std::time::{Duration, Instant};

    fn idle_engine() -> MockEngine {
        let mut engine = MockEngine::with_kind(TrackerKind::ModelTracker);
        engine.init_after = usize::MAX;
        engine
    }

    fn wait_for(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "condition not reached in time");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_stop_without_start() {
        let mut manager = SyncTrackingManager::with_default_config(idle_engine());
        manager.stop();
        manager.stop();
        assert_eq!(manager.phase(), WorkerPhase::Stopped);
        assert!(!manager.is_running());
    }

    #[test]
    fn test_start_twice_fails() {
        let mut manager = SyncTrackingManager::with_default_config(idle_engine());
        manager.start("tracker.vl").unwrap();
        let err = manager.start("tracker.vl").unwrap_err();
        assert!(matches!(err, SyncTrackError::AlreadyStarted));
        manager.stop();
        assert!(manager.execute(|engine| engine.calls.contains(&"stop".to_string())));
    }

    #[test]
    fn test_start_error_is_reported() {
        let mut manager = SyncTrackingManager::with_default_config(idle_engine());
        let err = manager.start("").unwrap_err();
        assert!(matches!(err, SyncTrackError::Engine(_)));
        assert!(!manager.is_running());
    }

    #[test]
    fn test_push_drops_oldest_and_counts() {
        let manager = SyncTrackingManager::with_default_config(idle_engine());
        for ts in 0..5 {
            manager
                .push_input_frame(ReadyFrame::new(Frame::new(ts as f64)))
                .unwrap();
        }
        assert_eq!(manager.pending_inputs(), 2);
        assert_eq!(manager.stats().inputs_dropped, 3);
    }

    #[test]
    fn test_tick_before_ready_is_empty() {
        let mut manager = SyncTrackingManager::with_default_config(idle_engine());
        manager.start("tracker.vl").unwrap();
        manager
            .push_input_frame(ReadyFrame::new(Frame::new(1.0)))
            .unwrap();
        assert!(!manager.is_ready());
        assert!(manager.tick().unwrap().is_empty());
        assert_eq!(manager.pending_inputs(), 1);

        manager.stop();
        assert_eq!(manager.pending_inputs(), 0);
    }

    #[test]
    fn test_result_reaches_tick() {
        let config = ManagerConfig::default()
            .with_anchor("Engine")
            .with_idle_backoff(Duration::ZERO);
        let mut manager =
            SyncTrackingManager::new(MockEngine::with_kind(TrackerKind::ModelTracker), config);
        manager.start("tracker.vl").unwrap();
        wait_for(|| manager.is_ready());

        manager
            .push_input_frame(ReadyFrame::new(Frame::new(3.0)))
            .unwrap();
        wait_for(|| manager.stats().results_published == 1);

        let events = manager.tick().unwrap();
        assert!(events.iter().any(|event| matches!(
            event,
            TrackingEvent::AnchorTransform { anchor, .. } if anchor == "Engine"
        )));
        assert!(manager.tick().unwrap().is_empty());
    }

    #[test]
    fn test_try_execute_maps_errors() {
        let manager = SyncTrackingManager::with_default_config(idle_engine());
        let err = manager
            .try_execute(|engine| engine.start_tracking(""))
            .unwrap_err();
        assert!(matches!(err, SyncTrackError::Engine(_)));
        assert!(manager.try_execute(|engine| engine.initialize()).is_ok());
    }
}
