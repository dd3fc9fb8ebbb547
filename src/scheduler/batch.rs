//! Frame-aligned coalescing of incoming envelopes.
//!
//! Envelopes are appended to a FIFO queue as they arrive and applied in
//! bursts on display-frame ticks. A tick that lands less than one frame
//! interval after the previous drain is deferred to the following frame,
//! unless the queue has grown past the burst threshold.

use std::collections::VecDeque;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::tick::TickSource;
use crate::session::SessionId;

/// Timing knobs for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Minimum spacing between two drains (~16 ms for 60 fps).
    pub frame_interval: Duration,
    /// Queue length at which throttling is bypassed.
    pub burst_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            burst_threshold: 50,
        }
    }
}

/// A raw envelope waiting to be applied to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedEnvelope {
    pub session: SessionId,
    pub envelope: Value,
}

/// What a tick did.
#[derive(Debug, PartialEq)]
pub enum TickOutcome {
    /// Too soon after the last drain; another tick was requested.
    Throttled,
    /// The whole queue, in arrival order.
    Drained(Vec<QueuedEnvelope>),
}

pub struct BatchScheduler {
    config: BatchConfig,
    queue: VecDeque<QueuedEnvelope>,
    ticks: Box<dyn TickSource>,
    tick_scheduled: bool,
    last_drain: Option<Instant>,
}

impl BatchScheduler {
    pub fn new(config: BatchConfig, ticks: Box<dyn TickSource>) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            ticks,
            tick_scheduled: false,
            last_drain: None,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_tick_scheduled(&self) -> bool {
        self.tick_scheduled
    }

    /// Append an envelope and make sure a tick is on its way.
    pub fn enqueue(&mut self, session: SessionId, envelope: Value) {
        self.queue.push_back(QueuedEnvelope { session, envelope });
        if !self.tick_scheduled {
            self.tick_scheduled = true;
            self.ticks.schedule();
        }
    }

    /// Handle a display-frame tick delivered at `now`.
    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        let too_soon = self
            .last_drain
            .is_some_and(|last| now.saturating_duration_since(last) < self.config.frame_interval);

        if too_soon && self.queue.len() < self.config.burst_threshold {
            self.tick_scheduled = true;
            self.ticks.schedule();
            return TickOutcome::Throttled;
        }

        self.tick_scheduled = false;
        TickOutcome::Drained(self.drain(now))
    }

    /// Drain everything immediately, regardless of timing.
    ///
    /// Used when the stream ends so nothing is left unapplied.
    pub fn flush(&mut self, now: Instant) -> Vec<QueuedEnvelope> {
        self.cancel_tick();
        self.drain(now)
    }

    /// Drop every queued envelope and any outstanding tick.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.cancel_tick();
        self.last_drain = None;
    }

    fn cancel_tick(&mut self) {
        if self.tick_scheduled {
            self.ticks.cancel();
            self.tick_scheduled = false;
        }
    }

    fn drain(&mut self, now: Instant) -> Vec<QueuedEnvelope> {
        self.last_drain = Some(now);
        self.queue.drain(..).collect()
    }
}
