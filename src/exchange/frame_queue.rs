//! Bounded FIFO of disposable frames with drop-oldest eviction.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{Result, SyncTrackError};
use crate::frame::Disposable;

const RESOURCE: &str = "frame queue";

struct QueueInner<T> {
    items: VecDeque<T>,
    disposed: bool,
}

/// Fixed-capacity, internally synchronized FIFO.
///
/// When full, pushing evicts the oldest item. `push` disposes it, while
/// `push_and_get_overflow` hands it back to the caller. No operation blocks
/// on another thread beyond the short critical section.
pub struct BoundedFrameQueue<T: Disposable> {
    inner: Mutex<QueueInner<T>>,
    capacity: usize,
}

impl<T: Disposable> BoundedFrameQueue<T> {
    /// Capacity used by the synchronous tracking manager.
    pub const DEFAULT_CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Queue holding at most `capacity` items (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(QueueInner {
                items: VecDeque::with_capacity(capacity),
                disposed: false,
            }),
            capacity,
        }
    }

    /// Append `item`, disposing the oldest item first if the queue is full.
    ///
    /// On a disposed queue the item is disposed and `Disposed` is returned.
    pub fn push(&self, item: T) -> Result<()> {
        if let Some(mut overflow) = self.push_and_get_overflow(item)? {
            overflow.dispose();
        }
        Ok(())
    }

    /// Append `item` and return the evicted oldest item, if any, undisposed.
    pub fn push_and_get_overflow(&self, mut item: T) -> Result<Option<T>> {
        let mut inner = self.inner.lock();
        if inner.disposed {
            drop(inner);
            item.dispose();
            return Err(SyncTrackError::Disposed(RESOURCE));
        }
        let overflow = if inner.items.len() >= self.capacity {
            inner.items.pop_front()
        } else {
            None
        };
        inner.items.push_back(item);
        Ok(overflow)
    }

    /// Remove and return the oldest item. Never blocks waiting for data.
    pub fn pop(&self) -> Result<Option<T>> {
        let mut inner = self.inner.lock();
        if inner.disposed {
            return Err(SyncTrackError::Disposed(RESOURCE));
        }
        Ok(inner.items.pop_front())
    }

    /// Dispose and remove every held item.
    pub fn clear(&self) {
        let drained: Vec<T> = self.inner.lock().items.drain(..).collect();
        dispose_all(drained);
    }

    /// Clear the queue and reject all further `push`/`pop` calls.
    pub fn dispose(&self) {
        let drained: Vec<T> = {
            let mut inner = self.inner.lock();
            inner.disposed = true;
            inner.items.drain(..).collect()
        };
        dispose_all(drained);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn dispose_all<T: Disposable>(items: Vec<T>) {
    for mut item in items {
        item.dispose();
    }
}

impl<T: Disposable> Default for BoundedFrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Disposable> Drop for BoundedFrameQueue<T> {
    fn drop(&mut self) {
        let drained: Vec<T> = self.inner.get_mut().items.drain(..).collect();
        dispose_all(drained);
    }
}
