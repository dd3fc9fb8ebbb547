//! Tick sources: "call me on the next display frame".

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Something that can deliver one tick on the next display frame.
///
/// Requests are one-shot: after a tick is delivered the source is idle
/// until `schedule` is called again. Scheduling twice before the frame
/// still yields a single tick.
pub trait TickSource: Send {
    /// Request a tick on the next frame.
    fn schedule(&mut self);

    /// Drop any outstanding request.
    fn cancel(&mut self);
}

/// Frame-paced tick source for the tokio runtime.
///
/// The scheduler holds one clone and arms it; the task driving a stream
/// holds another and awaits [`FrameTicker::wait`]. Each request fires one
/// frame interval after it was made, even if `wait` is dropped and
/// re-created in between.
#[derive(Clone)]
pub struct FrameTicker {
    deadline: Arc<Mutex<Option<Instant>>>,
    wake: Arc<Notify>,
    interval: Duration,
}

impl FrameTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            deadline: Arc::new(Mutex::new(None)),
            wake: Arc::new(Notify::new()),
            interval,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.lock().is_some()
    }

    /// Resolve on the next armed frame, returning the frame timestamp.
    ///
    /// Never resolves while nothing is scheduled. A request cancelled
    /// during the frame wait does not fire.
    pub async fn wait(&self) -> Instant {
        loop {
            // Register interest before checking the deadline so a schedule()
            // racing with the check is not lost.
            let notified = self.wake.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let armed = *self.deadline.lock();
            match armed {
                Some(deadline) => {
                    tokio::time::sleep_until(deadline).await;
                    let mut slot = self.deadline.lock();
                    if *slot == Some(deadline) {
                        *slot = None;
                        return Instant::now();
                    }
                }
                None => notified.await,
            }
        }
    }
}

impl TickSource for FrameTicker {
    fn schedule(&mut self) {
        let mut slot = self.deadline.lock();
        if slot.is_none() {
            *slot = Some(Instant::now() + self.interval);
            self.wake.notify_waiters();
        }
    }

    fn cancel(&mut self) {
        *self.deadline.lock() = None;
    }
}
