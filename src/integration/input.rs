//! Producer-side input frames, evaluated lazily on the worker thread.

use crate::frame::{Disposable, Frame};

/// Deferred producer of a [`Frame`].
///
/// The worker calls `evaluate` at most once and disposes the input frame
/// afterwards, whether or not a frame was produced. Returning `None` means
/// "no new frame this time" and is not an error.
pub trait InputFrame: Disposable + Send {
    fn evaluate(&mut self) -> Option<Frame>;
}

/// Input frame whose data is already assembled.
#[derive(Debug)]
pub struct ReadyFrame {
    frame: Option<Frame>,
    disposed: bool,
}

impl ReadyFrame {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Some(frame),
            disposed: false,
        }
    }
}

impl From<Frame> for ReadyFrame {
    fn from(frame: Frame) -> Self {
        Self::new(frame)
    }
}

impl InputFrame for ReadyFrame {
    fn evaluate(&mut self) -> Option<Frame> {
        if self.disposed {
            return None;
        }
        self.frame.take()
    }
}

impl Disposable for ReadyFrame {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(mut frame) = self.frame.take() {
            frame.dispose();
        }
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Input frame built by a closure when the worker gets to it.
///
/// Useful when converting the camera buffer is expensive and should happen
/// off the producer thread. Disposing drops the closure together with any
/// buffers it captured.
pub struct DeferredFrame<F>
where
    F: FnOnce() -> Option<Frame> + Send,
{
    producer: Option<F>,
    disposed: bool,
}

impl<F> DeferredFrame<F>
where
    F: FnOnce() -> Option<Frame> + Send,
{
    pub fn new(producer: F) -> Self {
        Self {
            producer: Some(producer),
            disposed: false,
        }
    }
}

impl<F> InputFrame for DeferredFrame<F>
where
    F: FnOnce() -> Option<Frame> + Send,
{
    fn evaluate(&mut self) -> Option<Frame> {
        if self.disposed {
            return None;
        }
        self.producer.take().and_then(|produce| produce())
    }
}

impl<F> Disposable for DeferredFrame<F>
where
    F: FnOnce() -> Option<Frame> + Send,
{
    fn dispose(&mut self) {
        self.producer = None;
        self.disposed = true;
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
