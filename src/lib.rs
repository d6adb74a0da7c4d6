//! Frame exchange core for synchronous image-injection tracking.
//!
//! The host's main loop pushes input frames into a small bounded queue. A
//! worker thread feeds the newest one into a tracking engine and publishes
//! the result into a latest-wins slot. Once per tick the host drains that
//! slot and receives events for the newest result, preceded by the tracking
//! states of any results it missed.
//!
//! Engines plug in through [`TrackingEngine`]; the session is driven by
//! [`SyncTrackingManager`].

pub mod error;
pub mod exchange;
pub mod frame;
pub mod integration;
pub mod manager;

pub use error::{Result, SyncTrackError};
pub use exchange::{BoundedFrameQueue, LatestResultSlot, SlotDrain};
pub use frame::{Disposable, Frame, FrameBuilder, TrackingState};
pub use integration::{DeferredFrame, InputFrame, ReadyFrame, TrackerKind, TrackingEngine};
pub use manager::{ManagerConfig, SyncTrackingManager, TrackingEvent, WorkerPhase};
