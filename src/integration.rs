//! Integration module for connecting a native tracking engine to the frame
//! exchange.
//!
//! This module provides the engine trait, the producer-side input frame
//! trait, and the inject/step/extract sequence run on the worker thread.

mod engine;
mod extraction;
mod input;

#[cfg(test)]
pub(crate) mod mock;

pub use engine::{TrackerKind, TrackingEngine, nodes};
pub use extraction::{ExtractOptions, extract_result, inject_frame, track_frame};
pub use input::{DeferredFrame, InputFrame, ReadyFrame};
