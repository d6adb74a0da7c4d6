//! Session management: configuration, worker thread and per-tick events.
//!
//! [`SyncTrackingManager`] owns the input queue, the result slot and the
//! engine lock shared with its worker thread.

mod config;
mod events;
mod stats;
mod sync_manager;
mod worker;

pub use config::ManagerConfig;
pub use events::{EventSink, TrackingEvent, emit_drain, emit_frame};
pub use stats::{StatsSnapshot, WorkerStats};
pub use sync_manager::SyncTrackingManager;
pub use worker::WorkerPhase;
