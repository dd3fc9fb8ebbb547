//! Frame-paced batching of inbound envelopes.

mod batch;
mod tick;

pub use batch::{BatchConfig, BatchScheduler, QueuedEnvelope, TickOutcome};
pub use tick::{FrameTicker, TickSource};
