//! Thread-safe containers that move frames between the producer thread and
//! the tracking worker.
//!
//! Every `push`/`pop` transfers ownership; nothing is lent to both threads at
//! once. Each container has its own lock and no operation takes both.

mod frame_queue;
mod result_slot;

pub use frame_queue::BoundedFrameQueue;
pub use result_slot::{LatestResultSlot, SlotDrain};
