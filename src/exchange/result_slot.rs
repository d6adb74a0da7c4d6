//! Latest-wins result store that keeps every overwritten tracking state.

use parking_lot::Mutex;

use crate::error::{Result, SyncTrackError};
use crate::frame::{Disposable, Frame, TrackingState};

const RESOURCE: &str = "result slot";

/// Everything published since the previous drain.
///
/// Owns `current`; dropping the drain releases the frame.
#[derive(Debug, Default)]
pub struct SlotDrain {
    /// Newest result frame, if any was published
    pub current: Option<Frame>,
    /// States of results overwritten before being observed, oldest first
    pub dropped: Vec<TrackingState>,
}

impl SlotDrain {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.dropped.is_empty()
    }
}

#[derive(Default)]
struct SlotInner {
    current: Option<Frame>,
    dropped: Vec<TrackingState>,
    disposed: bool,
}

/// Single-slot store for the newest result frame.
///
/// Frame payloads are latest-wins, but the tracking state of every
/// overwritten result is appended to a dropped-list so the consumer can
/// replay state transitions it never saw.
#[derive(Default)]
pub struct LatestResultSlot {
    inner: Mutex<SlotInner>,
}

impl LatestResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a clone of `result`, retiring the previous one.
    ///
    /// The previous result's tracking state goes to the dropped-list and its
    /// frame is disposed.
    pub fn push(&self, result: &Frame) -> Result<()> {
        let stored = result.try_clone()?;
        let retired = {
            let mut inner = self.inner.lock();
            if inner.disposed {
                return Err(SyncTrackError::Disposed(RESOURCE));
            }
            let retired = inner.current.replace(stored);
            if let Some(previous) = &retired {
                let state = previous.tracking_state().clone();
                inner.dropped.push(state);
            }
            retired
        };
        if let Some(mut previous) = retired {
            previous.dispose();
        }
        Ok(())
    }

    /// Take the current result and the dropped-list, leaving the slot empty.
    pub fn pop(&self) -> Result<SlotDrain> {
        let mut inner = self.inner.lock();
        if inner.disposed {
            return Err(SyncTrackError::Disposed(RESOURCE));
        }
        Ok(SlotDrain {
            current: inner.current.take(),
            dropped: std::mem::take(&mut inner.dropped),
        })
    }

    /// Dispose the current result and forget dropped states.
    pub fn clear(&self) {
        let retired = {
            let mut inner = self.inner.lock();
            inner.dropped.clear();
            inner.current.take()
        };
        if let Some(mut frame) = retired {
            frame.dispose();
        }
    }

    /// Clear and reject further `push`/`pop` calls.
    pub fn dispose(&self) {
        let retired = {
            let mut inner = self.inner.lock();
            inner.disposed = true;
            inner.dropped.clear();
            inner.current.take()
        };
        if let Some(mut frame) = retired {
            frame.dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    /// Whether a result is waiting to be drained.
    pub fn has_result(&self) -> bool {
        self.inner.lock().current.is_some()
    }
}
