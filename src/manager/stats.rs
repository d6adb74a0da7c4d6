//! Counters updated by the worker and the producer.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters shared between the producer and the worker thread.
#[derive(Debug, Default)]
pub struct WorkerStats {
    inputs_dropped: AtomicU64,
    frames_evaluated: AtomicU64,
    evaluation_misses: AtomicU64,
    results_published: AtomicU64,
    engine_errors: AtomicU64,
}

/// Point-in-time copy of [`WorkerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Input frames evicted from the full queue
    pub inputs_dropped: u64,
    /// Input frames that produced a frame
    pub frames_evaluated: u64,
    /// Input frames that produced nothing
    pub evaluation_misses: u64,
    /// Results pushed to the result slot
    pub results_published: u64,
    /// Engine errors contained by the worker
    pub engine_errors: u64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_dropped_input(&self) {
        self.inputs_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evaluated(&self) {
        self.frames_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_evaluation_miss(&self) {
        self.evaluation_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_published(&self) {
        self.results_published.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn record_engine_error(&self) {
        self.engine_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inputs_dropped: self.inputs_dropped.load(Ordering::Relaxed),
            frames_evaluated: self.frames_evaluated.load(Ordering::Relaxed),
            evaluation_misses: self.evaluation_misses.load(Ordering::Relaxed),
            results_published: self.results_published.load(Ordering::Acquire),
            engine_errors: self.engine_errors.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter. Called when a new session starts.
    pub fn reset(&self) {
        self.inputs_dropped.store(0, Ordering::Relaxed);
        self.frames_evaluated.store(0, Ordering::Relaxed);
        self.evaluation_misses.store(0, Ordering::Relaxed);
        self.results_published.store(0, Ordering::Relaxed);
        self.engine_errors.store(0, Ordering::Relaxed);
    }
}
